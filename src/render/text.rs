//! Plain-text back end for the terminal.

use super::{DetailView, FavoritesView, FilterButton, PageView, ResultsView};

pub fn render_results(view: &ResultsView) -> String {
    let mut out = String::new();
    if let Some(info) = &view.info {
        out.push_str(info);
        out.push('\n');
    }
    for card in &view.cards {
        out.push_str(&format!("  [{}] {} ({})\n", card.index + 1, card.label, card.meta));
    }
    out
}

pub fn render_detail(view: &DetailView) -> String {
    let mut out = format!("== {} ==\n", view.label);
    out.push_str("Ingredients:\n");
    for line in &view.ingredients {
        out.push_str(&format!("  - {}\n", line));
    }
    out.push_str("Nutrition:\n");
    for n in &view.nutrition {
        out.push_str(&format!("  {}: {}\n", n.label, n.value));
    }
    out.push_str(&format!("Source: {}\n", view.source_url));
    out.push_str(&format!("{}\n", view.toggle_label));
    out
}

pub fn render_favorites(view: &FavoritesView) -> String {
    let mut out = String::from("Favorites:\n");
    if let Some(placeholder) = view.placeholder {
        out.push_str(&format!("  {}\n", placeholder));
    }
    for entry in &view.entries {
        out.push_str(&format!(
            "  [{}] {} ({})\n",
            entry.index + 1,
            entry.label,
            entry.meta
        ));
    }
    out
}

fn active_filters(page: &PageView) -> String {
    let diet = page.diet_buttons.iter().find(|b| b.active).map(|b| b.value);
    let health = page.health_buttons.iter().find(|b| b.active).map(|b| b.value);
    format!(
        "diet: {} | health: {}",
        diet.unwrap_or("any"),
        health.unwrap_or("any")
    )
}

/// Render the page for the terminal. Panels are drawn after the results,
/// the favorites panel last.
pub fn render_page(page: &PageView) -> String {
    let mut out = format!("♥ {} | {}\n", page.badge, active_filters(page));
    if let Some(notice) = &page.notice {
        out.push_str(&format!("! {}\n", notice));
    }
    out.push_str(&render_results(&page.results));
    if let Some(detail) = &page.detail {
        out.push('\n');
        out.push_str(&render_detail(detail));
    }
    if let Some(favorites) = &page.favorites {
        out.push('\n');
        out.push_str(&render_favorites(favorites));
    }
    out
}

/// The filter list shown by the `explore` shortcut.
pub fn render_filters(page: &PageView) -> String {
    let line = |buttons: &[FilterButton]| {
        buttons
            .iter()
            .map(|b| {
                if b.active {
                    format!("[{}]", b.value)
                } else {
                    b.value.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!(
        "Diet:   {}\nHealth: {}\n",
        line(page.diet_buttons.as_slice()),
        line(page.health_buttons.as_slice())
    )
}

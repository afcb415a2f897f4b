//! HTML back end. All text and attribute values are escaped.

use super::{CardView, DetailView, FavoritesView, FilterButton, PageView, ResultsView};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

pub fn render_results(view: &ResultsView) -> String {
    let mut out = String::new();
    let class = if view.is_error {
        "results-info error"
    } else {
        "results-info"
    };
    out.push_str(&format!(
        "<p id=\"resultsInfo\" class=\"{}\">{}</p>\n",
        class,
        text(view.info.as_deref().unwrap_or(""))
    ));

    out.push_str("<section id=\"gridSection\">\n");
    for card in &view.cards {
        out.push_str(&render_card(card));
    }
    out.push_str("</section>\n");
    out
}

fn render_card(card: &CardView) -> String {
    format!(
        concat!(
            "<div class=\"card\">\n",
            "  <img src=\"{image}\" alt=\"{alt}\">\n",
            "  <div class=\"card-body\">\n",
            "    <h3 class=\"card-title\">{label}</h3>\n",
            "    <p class=\"meta\">{meta}</p>\n",
            "    <button data-index=\"{index}\">View Recipe</button>\n",
            "  </div>\n",
            "</div>\n"
        ),
        image = attr(&card.image),
        alt = attr(&card.label),
        label = text(&card.label),
        meta = text(&card.meta),
        index = card.index,
    )
}

pub fn render_detail(view: &DetailView) -> String {
    let ingredients: String = view
        .ingredients
        .iter()
        .map(|line| format!("    <li>{}</li>\n", text(line)))
        .collect();
    let nutrition: String = view
        .nutrition
        .iter()
        .map(|n| format!("    <div>{}: {}</div>\n", n.label, text(&n.value)))
        .collect();
    let fav_class = if view.saved { "fav-btn saved" } else { "fav-btn" };

    format!(
        concat!(
            "<aside id=\"detailPanel\" class=\"detail-panel active\">\n",
            "  <h2 id=\"detailTitle\">{label}</h2>\n",
            "  <img id=\"detailImage\" src=\"{image}\" alt=\"{alt}\">\n",
            "  <ul id=\"ingredientsList\">\n{ingredients}  </ul>\n",
            "  <div id=\"nutritionBox\">\n{nutrition}  </div>\n",
            "  <a id=\"sourceLink\" href=\"{url}\" target=\"_blank\">View original recipe</a>\n",
            "  <button id=\"panelFavBtn\" class=\"{fav_class}\">{toggle}</button>\n",
            "</aside>\n"
        ),
        label = text(&view.label),
        image = attr(&view.image),
        alt = attr(&view.label),
        ingredients = ingredients,
        nutrition = nutrition,
        url = attr(&view.source_url),
        fav_class = fav_class,
        toggle = view.toggle_label,
    )
}

pub fn render_favorites(view: &FavoritesView) -> String {
    let mut out = String::from("<aside id=\"favPanel\" class=\"fav-panel active\">\n");
    out.push_str("  <div id=\"favList\">\n");
    if let Some(placeholder) = view.placeholder {
        out.push_str(&format!("    <p>{}</p>\n", placeholder));
    }
    for entry in &view.entries {
        out.push_str(&format!(
            concat!(
                "    <div class=\"fav-card\">\n",
                "      <img src=\"{image}\" alt=\"{alt}\">\n",
                "      <h4>{label}</h4>\n",
                "      <p>{meta}</p>\n",
                "      <button class=\"openFavBtn\" data-index=\"{index}\">Open</button>\n",
                "      <button class=\"removeFav\" data-index=\"{index}\">Remove</button>\n",
                "    </div>\n"
            ),
            image = attr(&entry.image),
            alt = attr(&entry.label),
            label = text(&entry.label),
            meta = text(&entry.meta),
            index = entry.index,
        ));
    }
    out.push_str("  </div>\n</aside>\n");
    out
}

fn render_filter_buttons(class: &str, data: &str, buttons: &[FilterButton]) -> String {
    buttons
        .iter()
        .map(|b| {
            format!(
                "  <button class=\"{}{}\" data-{}=\"{}\">{}</button>\n",
                class,
                if b.active { " active" } else { "" },
                data,
                b.value,
                b.value
            )
        })
        .collect()
}

/// Render the whole page body.
pub fn render_page(page: &PageView) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "<header>\n  <button id=\"favoritesBtn\">Favorites <span id=\"favCount\">{}</span></button>\n</header>\n",
        page.badge
    ));
    if let Some(notice) = &page.notice {
        out.push_str(&format!("<p class=\"notice\">{}</p>\n", text(notice)));
    }
    out.push_str(&format!(
        "<form id=\"searchForm\">\n  <input id=\"searchInput\" value=\"{}\">\n</form>\n",
        attr(&page.query)
    ));

    out.push_str("<section id=\"filtersSection\">\n");
    out.push_str(&render_filter_buttons("filterBtn", "diet", &page.diet_buttons));
    out.push_str(&render_filter_buttons("healthBtn", "health", &page.health_buttons));
    out.push_str("</section>\n");

    out.push_str(&render_results(&page.results));
    if let Some(detail) = &page.detail {
        out.push_str(&render_detail(detail));
    }
    if let Some(favorites) = &page.favorites {
        out.push_str(&render_favorites(favorites));
    }
    out
}

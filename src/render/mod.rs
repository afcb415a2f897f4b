//! One-way rendering from application state to views.
//!
//! The builders here turn state into plain view models; [`html`] and
//! [`text`] turn those into markup or terminal output. Views are rebuilt
//! wholesale on every change.

pub mod html;
pub mod text;

use crate::app::App;
use crate::client::RecipeSource;
use crate::favorites::FavoritesStore;
use crate::model::{DietTag, HealthTag, Recipe, CARBS, FAT, PROTEIN};
use crate::state::{ResultsState, SearchState, Section};
use crate::store::KeyValueStore;

pub const SEARCHING: &str = "Searching...";
pub const FETCH_ERROR: &str = "Error fetching recipes.";
pub const NO_FAVORITES: &str = "No favorites yet.";
pub const SAVED_LABEL: &str = "❤️ Saved";
pub const SAVE_LABEL: &str = "♡ Save";

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub index: usize,
    pub label: String,
    pub image: String,
    /// e.g. `523 kcal • 4 servings`
    pub meta: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultsView {
    /// Line above the grid; `None` before the first search
    pub info: Option<String>,
    pub cards: Vec<CardView>,
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NutritionLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub label: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub nutrition: Vec<NutritionLine>,
    pub source_url: String,
    pub saved: bool,
    pub toggle_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesView {
    pub entries: Vec<CardView>,
    /// Shown instead of entries when there are none
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterButton {
    pub value: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub query: String,
    pub diet_buttons: Vec<FilterButton>,
    pub health_buttons: Vec<FilterButton>,
    pub badge: usize,
    pub results: ResultsView,
    pub detail: Option<DetailView>,
    /// Present only while the favorites panel is open
    pub favorites: Option<FavoritesView>,
    pub notice: Option<String>,
    pub focus: Section,
}

fn card_meta(recipe: &Recipe) -> String {
    format!(
        "{} kcal • {} servings",
        recipe.rounded_calories(),
        recipe.servings
    )
}

fn card(index: usize, recipe: &Recipe) -> CardView {
    CardView {
        index,
        label: recipe.label.clone(),
        image: recipe.image.clone(),
        meta: card_meta(recipe),
    }
}

pub fn results_view(results: &ResultsState) -> ResultsView {
    match results {
        ResultsState::Idle => ResultsView::default(),
        ResultsState::Searching { .. } => ResultsView {
            info: Some(SEARCHING.to_string()),
            ..Default::default()
        },
        ResultsState::Loaded { query, recipes } if recipes.is_empty() => ResultsView {
            info: Some(format!("No recipes found for \"{}\".", query)),
            ..Default::default()
        },
        ResultsState::Loaded { query, recipes } => ResultsView {
            info: Some(format!(
                "Found {} recipes for \"{}\"",
                recipes.len(),
                query
            )),
            cards: recipes.iter().enumerate().map(|(i, r)| card(i, r)).collect(),
            is_error: false,
        },
        ResultsState::Failed { .. } => ResultsView {
            info: Some(FETCH_ERROR.to_string()),
            cards: Vec::new(),
            is_error: true,
        },
    }
}

fn grams(recipe: &Recipe, code: &str) -> String {
    recipe
        .nutrient_grams(code)
        .map(|q| format!("{} g", q))
        .unwrap_or_else(|| "-".to_string())
}

pub fn detail_view(recipe: &Recipe, saved: bool) -> DetailView {
    DetailView {
        label: recipe.label.clone(),
        image: recipe.image.clone(),
        ingredients: recipe.ingredient_lines.clone(),
        nutrition: vec![
            NutritionLine {
                label: "Calories",
                value: format!("{} kcal", recipe.rounded_calories()),
            },
            NutritionLine {
                label: "Protein",
                value: grams(recipe, PROTEIN),
            },
            NutritionLine {
                label: "Carbs",
                value: grams(recipe, CARBS),
            },
            NutritionLine {
                label: "Fat",
                value: grams(recipe, FAT),
            },
        ],
        source_url: recipe.url.clone(),
        saved,
        toggle_label: if saved { SAVED_LABEL } else { SAVE_LABEL },
    }
}

pub fn favorites_view<S: KeyValueStore>(favorites: &FavoritesStore<S>) -> FavoritesView {
    if favorites.is_empty() {
        return FavoritesView {
            entries: Vec::new(),
            placeholder: Some(NO_FAVORITES),
        };
    }
    FavoritesView {
        entries: favorites
            .list()
            .iter()
            .enumerate()
            .map(|(i, r)| card(i, r))
            .collect(),
        placeholder: None,
    }
}

fn filter_buttons(search: &SearchState) -> (Vec<FilterButton>, Vec<FilterButton>) {
    let diet = DietTag::ALL
        .iter()
        .map(|tag| FilterButton {
            value: tag.as_str(),
            active: search.diet == Some(*tag),
        })
        .collect();
    let health = HealthTag::ALL
        .iter()
        .map(|tag| FilterButton {
            value: tag.as_str(),
            active: search.health == Some(*tag),
        })
        .collect();
    (diet, health)
}

/// Build the full page from the controller's current state.
pub fn page_view<R: RecipeSource, S: KeyValueStore>(app: &App<R, S>) -> PageView {
    let favorites = app.favorites();
    let (diet_buttons, health_buttons) = filter_buttons(app.search());

    PageView {
        query: app.search().query.clone(),
        diet_buttons,
        health_buttons,
        badge: app.badge_count(),
        results: results_view(app.results()),
        detail: app
            .detail()
            .map(|r| detail_view(r, favorites.is_favorite(&r.uri))),
        favorites: app.favorites_open().then(|| favorites_view(favorites)),
        notice: app.notice().map(str::to_string),
        focus: app.focus(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Nutrient;
    use crate::store::MemoryStore;

    fn recipe(uri: &str, label: &str) -> Recipe {
        Recipe {
            uri: uri.to_string(),
            label: label.to_string(),
            image: format!("https://img.example.com/{}.jpg", uri),
            url: format!("https://example.com/{}", uri),
            servings: 4.0,
            calories: 812.6,
            ingredient_lines: vec!["1 cup rice".to_string(), "2 eggs".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_no_results_message() {
        let view = results_view(&ResultsState::Loaded {
            query: "chicken".to_string(),
            recipes: vec![],
        });
        assert_eq!(view.info.as_deref(), Some("No recipes found for \"chicken\"."));
        assert!(view.cards.is_empty());
        assert!(!view.is_error);
    }

    #[test]
    fn test_found_results_in_order() {
        let view = results_view(&ResultsState::Loaded {
            query: "pasta".to_string(),
            recipes: vec![
                recipe("a", "Alfredo"),
                recipe("b", "Bolognese"),
                recipe("c", "Carbonara"),
            ],
        });
        assert_eq!(view.info.as_deref(), Some("Found 3 recipes for \"pasta\""));
        let labels: Vec<_> = view.cards.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Alfredo", "Bolognese", "Carbonara"]);
        assert_eq!(view.cards[0].meta, "813 kcal • 4 servings");
    }

    #[test]
    fn test_searching_and_error_states() {
        let searching = results_view(&ResultsState::Searching {
            query: "x".to_string(),
        });
        assert_eq!(searching.info.as_deref(), Some(SEARCHING));

        let failed = results_view(&ResultsState::Failed {
            query: "x".to_string(),
        });
        assert_eq!(failed.info.as_deref(), Some(FETCH_ERROR));
        assert!(failed.is_error);
        assert!(failed.cards.is_empty());

        assert_eq!(results_view(&ResultsState::Idle), ResultsView::default());
    }

    #[test]
    fn test_detail_nutrition_with_missing_nutrients() {
        let mut r = recipe("a", "Omelette");
        r.total_nutrients.insert(
            PROTEIN.to_string(),
            Nutrient {
                label: Some("Protein".to_string()),
                quantity: Some(20.4),
                unit: "g".to_string(),
            },
        );

        let view = detail_view(&r, false);
        let lines: Vec<_> = view
            .nutrition
            .iter()
            .map(|n| format!("{}: {}", n.label, n.value))
            .collect();
        assert_eq!(
            lines,
            vec!["Calories: 813 kcal", "Protein: 20 g", "Carbs: -", "Fat: -"]
        );
        assert_eq!(view.toggle_label, SAVE_LABEL);
        assert_eq!(detail_view(&r, true).toggle_label, SAVED_LABEL);
    }

    #[test]
    fn test_favorites_placeholder() {
        let mut store = FavoritesStore::load(MemoryStore::new());
        let empty = favorites_view(&store);
        assert_eq!(empty.placeholder, Some(NO_FAVORITES));

        store.add(recipe("a", "A")).unwrap();
        let view = favorites_view(&store);
        assert_eq!(view.placeholder, None);
        assert_eq!(view.entries.len(), 1);
    }

    #[test]
    fn test_fractional_servings() {
        let mut r = recipe("a", "A");
        r.servings = 2.5;
        r.calories = 99.5;
        assert_eq!(card_meta(&r), "100 kcal • 2.5 servings");
    }
}

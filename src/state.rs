use crate::client::Filters;
use crate::model::{DietTag, HealthTag, Recipe};

/// Current search text and the active filters.
///
/// An empty `query` means no search has been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub diet: Option<DietTag>,
    pub health: Option<HealthTag>,
}

impl SearchState {
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn filters(&self) -> Filters {
        Filters {
            diet: self.diet,
            health: self.health,
        }
    }
}

/// What the results area currently shows
#[derive(Debug, Clone, Default)]
pub enum ResultsState {
    #[default]
    Idle,
    Searching {
        query: String,
    },
    Loaded {
        query: String,
        recipes: Vec<Recipe>,
    },
    Failed {
        query: String,
    },
}

impl ResultsState {
    /// Recipes currently on display; empty unless a search has succeeded.
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            ResultsState::Loaded { recipes, .. } => recipes,
            _ => &[],
        }
    }
}

/// Page section that currently has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Top,
    Filters,
    Results,
}

/// Identifies one outstanding fetch. Tickets increase monotonically and only
/// the newest one may update the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(pub(crate) u64);

/// A fetch the controller wants performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub query: String,
    pub filters: Filters,
}

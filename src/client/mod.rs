mod edamam;

pub use edamam::EdamamClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{DietTag, HealthTag, Recipe};

/// Optional filters applied to a search, at most one of each kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filters {
    pub diet: Option<DietTag>,
    pub health: Option<HealthTag>,
}

/// Anything that can answer a recipe search.
///
/// Implementations make exactly one attempt per call and must keep the
/// order of results as the backend returns them. An empty vector is a
/// valid answer. Callers are expected to pass a query that is non-empty
/// after trimming.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Short name used in log lines
    fn source_name(&self) -> &str;

    async fn search(&self, query: &str, filters: &Filters) -> Result<Vec<Recipe>>;
}

use crate::client::RecipeSource;
use crate::error::Result;
use crate::favorites::FavoritesStore;
use crate::model::{DietTag, HealthTag, Recipe};
use crate::state::{FetchRequest, FetchTicket, ResultsState, SearchState, Section};
use crate::store::KeyValueStore;
use log::{debug, error, info, warn};

/// Application controller.
///
/// Owns the search state, the current results, the favorites and the panel
/// state. Every user action is a method here; rendering reads the state back
/// through the accessors and never mutates it.
///
/// Fetches follow latest-request-wins: each fetch takes a [`FetchTicket`] and
/// a completion is only applied if its ticket is the newest one issued.
pub struct App<R: RecipeSource, S: KeyValueStore> {
    source: R,
    favorites: FavoritesStore<S>,
    search: SearchState,
    results: ResultsState,
    detail: Option<Recipe>,
    favorites_open: bool,
    focus: Section,
    notice: Option<String>,
    next_ticket: u64,
    pending: Option<FetchRequest>,
}

impl<R: RecipeSource, S: KeyValueStore> App<R, S> {
    pub fn new(source: R, favorites: FavoritesStore<S>) -> Self {
        Self {
            source,
            favorites,
            search: SearchState::default(),
            results: ResultsState::Idle,
            detail: None,
            favorites_open: false,
            focus: Section::Top,
            notice: None,
            next_ticket: 0,
            pending: None,
        }
    }

    // --- Search & filters ---

    /// Record a search submission.
    ///
    /// Whitespace-only input is ignored and returns `None` without touching
    /// any state. Otherwise the query is stored, the results area switches to
    /// `Searching` and the fetch to perform is returned.
    pub fn prepare_search(&mut self, input: &str) -> Option<FetchRequest> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }
        self.search.query = query.to_string();
        Some(self.begin_fetch())
    }

    /// Set or clear the diet filter. A fetch is requested only when a query
    /// has already been submitted.
    pub fn set_diet(&mut self, diet: Option<DietTag>) -> Option<FetchRequest> {
        self.search.diet = diet;
        self.refetch_if_searching()
    }

    /// Set or clear the health filter, independently of the diet filter.
    pub fn set_health(&mut self, health: Option<HealthTag>) -> Option<FetchRequest> {
        self.search.health = health;
        self.refetch_if_searching()
    }

    fn refetch_if_searching(&mut self) -> Option<FetchRequest> {
        if self.search.has_query() {
            Some(self.begin_fetch())
        } else {
            debug!("Filters changed without a query; not fetching");
            None
        }
    }

    /// Issue a ticket for a fetch of the current query and filters.
    /// Any older outstanding fetch becomes stale.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.next_ticket += 1;
        let request = FetchRequest {
            ticket: FetchTicket(self.next_ticket),
            query: self.search.query.clone(),
            filters: self.search.filters(),
        };
        self.results = ResultsState::Searching {
            query: request.query.clone(),
        };
        self.pending = Some(request.clone());
        request
    }

    /// Apply the outcome of a fetch. Returns false if the ticket is stale and
    /// the outcome was dropped.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, outcome: Result<Vec<Recipe>>) -> bool {
        let request = match self.pending.take() {
            Some(request) if request.ticket == ticket => request,
            other => {
                debug!("Dropping stale fetch result {:?}", ticket);
                self.pending = other;
                return false;
            }
        };

        self.results = match outcome {
            Ok(recipes) => {
                info!("Showing {} recipes for {:?}", recipes.len(), request.query);
                self.focus = Section::Results;
                ResultsState::Loaded {
                    query: request.query,
                    recipes,
                }
            }
            Err(e) => {
                error!("Error fetching recipes for {:?}: {}", request.query, e);
                ResultsState::Failed {
                    query: request.query,
                }
            }
        };
        true
    }

    /// Run a fetch against the recipe source and apply its outcome.
    pub async fn run_fetch(&mut self, request: FetchRequest) -> bool {
        let outcome = self.source.search(&request.query, &request.filters).await;
        self.complete_fetch(request.ticket, outcome)
    }

    /// Submit the search box. Returns whether a fetch was performed.
    pub async fn submit_search(&mut self, input: &str) -> bool {
        match self.prepare_search(input) {
            Some(request) => self.run_fetch(request).await,
            None => false,
        }
    }

    pub async fn select_diet(&mut self, diet: DietTag) -> bool {
        match self.set_diet(Some(diet)) {
            Some(request) => self.run_fetch(request).await,
            None => false,
        }
    }

    pub async fn clear_diet(&mut self) -> bool {
        match self.set_diet(None) {
            Some(request) => self.run_fetch(request).await,
            None => false,
        }
    }

    pub async fn select_health(&mut self, health: HealthTag) -> bool {
        match self.set_health(Some(health)) {
            Some(request) => self.run_fetch(request).await,
            None => false,
        }
    }

    pub async fn clear_health(&mut self) -> bool {
        match self.set_health(None) {
            Some(request) => self.run_fetch(request).await,
            None => false,
        }
    }

    // --- Detail panel ---

    /// Open the detail panel for the result at `index`.
    pub fn open_detail(&mut self, index: usize) -> bool {
        match self.results.recipes().get(index).cloned() {
            Some(recipe) => {
                self.detail = Some(recipe);
                true
            }
            None => false,
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Toggle the favorite state of the recipe in the detail panel.
    /// Returns the new saved state, or `None` if no panel is open.
    pub fn toggle_favorite(&mut self) -> Option<bool> {
        let recipe = self.detail.clone()?;
        let outcome = self.favorites.toggle(&recipe);
        self.record_storage_outcome(outcome.map(|_| ()));
        Some(self.favorites.is_favorite(&recipe.uri))
    }

    // --- Favorites panel ---

    pub fn open_favorites(&mut self) {
        self.favorites_open = true;
    }

    pub fn close_favorites(&mut self) {
        self.favorites_open = false;
    }

    /// Open the favorite at `index` in the detail panel and close the
    /// favorites panel.
    pub fn open_favorite(&mut self, index: usize) -> bool {
        match self.favorites.get(index).cloned() {
            Some(recipe) => {
                self.detail = Some(recipe);
                self.favorites_open = false;
                true
            }
            None => false,
        }
    }

    /// Remove the favorite at `index`. Returns false if there is none.
    pub fn remove_favorite(&mut self, index: usize) -> bool {
        let Some(uri) = self.favorites.get(index).map(|r| r.uri.clone()) else {
            return false;
        };
        let outcome = self.favorites.remove(&uri);
        self.record_storage_outcome(outcome.map(|_| ()));
        true
    }

    /// Jump to the filters section.
    pub fn explore(&mut self) {
        self.focus = Section::Filters;
    }

    fn record_storage_outcome(&mut self, outcome: Result<()>) {
        match outcome {
            Ok(()) => self.notice = None,
            Err(e) => {
                warn!("Favorites change not saved: {}", e);
                self.notice = Some("Favorites could not be saved.".to_string());
            }
        }
    }

    // --- Accessors ---

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn results(&self) -> &ResultsState {
        &self.results
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn detail(&self) -> Option<&Recipe> {
        self.detail.as_ref()
    }

    pub fn favorites_open(&self) -> bool {
        self.favorites_open
    }

    pub fn focus(&self) -> Section {
        self.focus
    }

    /// Non-fatal message about the last favorites change, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn badge_count(&self) -> usize {
        self.favorites.count()
    }
}

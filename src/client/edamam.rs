use crate::client::{Filters, RecipeSource};
use crate::config::ApiConfig;
use crate::error::{RecipeError, Result};
use crate::model::{Recipe, SearchResponse};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;

const SEARCH_PATH: &str = "/api/recipes/v2";
const ACCOUNT_USER_HEADER: &str = "edamam-account-user";

pub struct EdamamClient {
    client: Client,
    base_url: String,
    app_id: String,
    app_key: String,
    user_id: String,
}

impl EdamamClient {
    /// Create a client from configuration.
    ///
    /// Credentials missing from the config are looked up in the
    /// EDAMAM_APP_ID, EDAMAM_APP_KEY and EDAMAM_USER_ID environment variables.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let app_id = config
            .app_id
            .clone()
            .or_else(|| std::env::var("EDAMAM_APP_ID").ok())
            .ok_or(RecipeError::MissingCredential("EDAMAM_APP_ID"))?;
        let app_key = config
            .app_key
            .clone()
            .or_else(|| std::env::var("EDAMAM_APP_KEY").ok())
            .ok_or(RecipeError::MissingCredential("EDAMAM_APP_KEY"))?;
        let user_id = config
            .user_id
            .clone()
            .or_else(|| std::env::var("EDAMAM_USER_ID").ok())
            .ok_or(RecipeError::MissingCredential("EDAMAM_USER_ID"))?;

        Self::with_credentials(
            config.base_url.clone(),
            app_id,
            app_key,
            user_id,
            Duration::from_secs(config.timeout),
        )
    }

    #[doc(hidden)]
    pub fn with_credentials(
        base_url: String,
        app_id: String,
        app_key: String,
        user_id: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(EdamamClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id,
            app_key,
            user_id,
        })
    }

    fn query_params<'a>(
        &'a self,
        query: &'a str,
        filters: &Filters,
    ) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![
            ("type", "public"),
            ("q", query),
            ("app_id", self.app_id.as_str()),
            ("app_key", self.app_key.as_str()),
        ];
        if let Some(diet) = filters.diet {
            params.push(("diet", diet.as_str()));
        }
        if let Some(health) = filters.health {
            params.push(("health", health.as_str()));
        }
        params
    }
}

#[async_trait]
impl RecipeSource for EdamamClient {
    fn source_name(&self) -> &str {
        "edamam"
    }

    async fn search(&self, query: &str, filters: &Filters) -> Result<Vec<Recipe>> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCOUNT_USER_HEADER, HeaderValue::from_str(&self.user_id)?);

        debug!(
            "GET {}{} q={:?} diet={:?} health={:?}",
            self.base_url, SEARCH_PATH, query, filters.diet, filters.health
        );

        let response = self
            .client
            .get(format!("{}{}", self.base_url, SEARCH_PATH))
            .headers(headers)
            .query(&self.query_params(query, filters))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecipeError::Api {
                status: status.as_u16(),
            });
        }

        let body: SearchResponse = response.json().await?;
        let recipes = body.into_recipes();
        info!(
            "{} returned {} recipes for {:?}",
            self.source_name(),
            recipes.len(),
            query
        );

        Ok(recipes)
    }
}

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use thiserror::Error;

use crate::search::domain::photo::{SearchOptions, SearchPage};
use crate::search::domain::photo_search::PhotoSearch;
use crate::shared::constants::PEXELS_API_URL;
use crate::shared::credentials::ApiKeys;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("search response from {url} could not be decoded")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Blocking client for the Pexels photo search API.
///
/// The API key is sent verbatim in the `Authorization` header.
pub struct PexelsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PexelsClient {
    pub fn new(keys: &ApiKeys) -> Self {
        Self {
            client: Client::new(),
            api_key: keys.pexels().to_string(),
            base_url: PEXELS_API_URL.to_string(),
        }
    }

    /// Points the client at a different API root (no trailing slash).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    fn fetch_page(&self, options: &SearchOptions) -> Result<SearchPage, SearchError> {
        let url = self.search_url();
        log::debug!("GET {url} query={:?} per_page={:?}", options.query, options.per_page);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, self.api_key.as_str())
            .query(options)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| SearchError::Request {
                url: url.clone(),
                source: e,
            })?;

        response
            .json::<SearchPage>()
            .map_err(|e| SearchError::Decode { url, source: e })
    }
}

impl PhotoSearch for PexelsClient {
    fn search(&self, options: &SearchOptions) -> Result<SearchPage, Box<dyn std::error::Error>> {
        let page = self.fetch_page(options)?;
        log::info!(
            "Search \"{}\" returned {} photos ({} total matches)",
            options.query,
            page.photos.len(),
            page.total_results
        );
        Ok(page)
    }
}

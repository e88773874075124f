use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::RedditApi;
use crate::app::Result;
use crate::domain::{Listing, ListingOptions, ListingPage, Post, Subreddit};

pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

const USER_AGENT: &str = concat!("srr/", env!("CARGO_PKG_VERSION"));

/// `RedditApi` over reqwest against the public `.json` endpoints.
#[derive(Debug)]
pub struct HttpRedditApi {
    client: Client,
    base_url: String,
}

impl HttpRedditApi {
    /// Builds a client for `base_url`, which must parse as an absolute URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Url::parse(base_url)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Cursor parameters for a listing request. Reddit expects a count
    /// alongside a cursor; a cursor arriving without one is logged but
    /// still sent as given.
    fn query_params(options: &ListingOptions) -> Vec<(&'static str, String)> {
        if options.has_cursor() && options.count.is_none() {
            tracing::warn!(
                "invalid request options: must include count if using before or after"
            );
        }
        options.to_params()
    }

    async fn get_listing<T>(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<ListingPage<T>>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(url, "fetching listing");

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let listing: Listing<T> = serde_json::from_str(&body)?;
        Ok(listing.data)
    }
}

#[async_trait]
impl RedditApi for HttpRedditApi {
    async fn subreddits(
        &self,
        search: &str,
        options: &ListingOptions,
    ) -> Result<ListingPage<Subreddit>> {
        let mut params = Self::query_params(options);
        let url = if search.is_empty() {
            format!("{}/subreddits.json", self.base_url)
        } else {
            params.insert(0, ("q", search.to_string()));
            format!("{}/subreddits/search.json", self.base_url)
        };

        self.get_listing(&url, &params).await
    }

    async fn posts(&self, topic: &str, options: &ListingOptions) -> Result<ListingPage<Post>> {
        let params = Self::query_params(options);
        let url = format!("{}/r/{}.json", self.base_url, topic);

        self.get_listing(&url, &params).await
    }
}

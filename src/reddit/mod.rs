pub mod http;

pub use http::{HttpRedditApi, DEFAULT_BASE_URL};

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::app::{Result, SrrError};
use crate::domain::{ListingOptions, ListingPage, Post, Subreddit};

/// First page of posts for each topic, keyed by topic name. The map keeps
/// topics in sorted order, matching how the feed is stored and shown.
pub type FeedData = BTreeMap<String, ListingPage<Post>>;

/// Read-only view of Reddit's public listing endpoints.
#[async_trait]
pub trait RedditApi {
    /// One page of subreddits. An empty `search` browses the front
    /// listing, anything else queries the search endpoint.
    async fn subreddits(
        &self,
        search: &str,
        options: &ListingOptions,
    ) -> Result<ListingPage<Subreddit>>;

    /// One page of posts from the named subreddit.
    async fn posts(&self, topic: &str, options: &ListingOptions) -> Result<ListingPage<Post>>;
}

/// Fetches the first page of every topic in turn.
///
/// An empty topic list is refused before any request goes out, so callers
/// can rely on `NoTopics` never having produced network traffic.
pub async fn load_feeds(api: &dyn RedditApi, topics: &[String]) -> Result<FeedData> {
    if topics.is_empty() {
        return Err(SrrError::NoTopics);
    }

    let mut feeds = FeedData::new();
    for topic in topics {
        let page = api.posts(topic, &ListingOptions::default()).await?;
        feeds.insert(topic.clone(), page);
    }

    Ok(feeds)
}

//! Keyed request cache for the TUI.
//!
//! Every remote fetch is tracked under a string key derived from what was
//! asked for and which page of it. A key is inserted as `Loading` when the
//! request is spawned and overwritten when its outcome arrives, so repeated
//! renders of the same page never refetch and a key can only have one
//! request in flight at a time.

use std::collections::HashMap;

use crate::domain::{ListingOptions, ListingPage, Post, Subreddit};

/// Key for a page of subreddit results. An empty `search` is the browse
/// listing, anything else the search listing.
pub fn subreddits_key(search: &str, options: &ListingOptions) -> String {
    format!("{}{}", subreddits_prefix(search), options.cache_key())
}

/// Prefix covering every cached page of one search's subreddit results.
pub fn subreddits_prefix(search: &str) -> String {
    format!("subreddits:{search}:")
}

/// Key for a page of posts from one subreddit.
pub fn posts_key(topic: &str, options: &ListingOptions) -> String {
    format!("{}{}", posts_prefix(topic), options.cache_key())
}

/// Prefix covering every cached page of one subreddit's posts.
pub fn posts_prefix(topic: &str) -> String {
    format!("posts:{topic}:")
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

/// Outcome of a spawned fetch, sent back to the event loop over the
/// result channel.
#[derive(Debug)]
pub enum QueryOutcome {
    Subreddits {
        key: String,
        result: Result<ListingPage<Subreddit>, String>,
    },
    Posts {
        key: String,
        result: Result<ListingPage<Post>, String>,
    },
}

pub struct QueryCache<T> {
    entries: HashMap<String, QueryState<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as loading. Returns false without touching the entry
    /// when the key is already tracked, loading or settled.
    pub fn begin(&mut self, key: &str) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), QueryState::Loading);
        true
    }

    /// Records the outcome for `key`. Always overwrites, so the latest
    /// resolution wins even if an older one somehow lands after it.
    pub fn resolve(&mut self, key: &str, result: Result<T, String>) {
        let state = match result {
            Ok(value) => QueryState::Ready(value),
            Err(message) => QueryState::Failed(message),
        };
        self.entries.insert(key.to_string(), state);
    }

    pub fn get(&self, key: &str) -> Option<&QueryState<T>> {
        self.entries.get(key)
    }

    /// Drops every entry whose key starts with `prefix`, so a reload of
    /// one query scope also forgets its deeper pages.
    pub fn invalidate_prefix(&mut self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_refuses_a_key_already_in_flight() {
        let mut cache: QueryCache<u32> = QueryCache::new();

        assert!(cache.begin("posts:rust:||"));
        assert!(!cache.begin("posts:rust:||"));
        assert_eq!(cache.get("posts:rust:||"), Some(&QueryState::Loading));
    }

    #[test]
    fn begin_refuses_a_settled_key() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        cache.begin("k");
        cache.resolve("k", Ok(7));

        assert!(!cache.begin("k"));
        assert_eq!(cache.get("k"), Some(&QueryState::Ready(7)));
    }

    #[test]
    fn latest_resolution_wins() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        cache.begin("k");
        cache.resolve("k", Ok(1));
        cache.resolve("k", Ok(2));

        assert_eq!(cache.get("k"), Some(&QueryState::Ready(2)));
    }

    #[test]
    fn failures_keep_their_message() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        cache.begin("k");
        cache.resolve("k", Err("HTTP error: 503".to_string()));

        assert_eq!(
            cache.get("k"),
            Some(&QueryState::Failed("HTTP error: 503".to_string()))
        );
    }

    #[test]
    fn invalidated_key_is_fetchable_again() {
        let key = posts_key("rust", &ListingOptions::default());
        let mut cache: QueryCache<u32> = QueryCache::new();
        cache.begin(&key);
        cache.resolve(&key, Ok(1));

        cache.invalidate_prefix(&posts_prefix("rust"));

        assert!(cache.begin(&key));
    }

    #[test]
    fn invalidate_prefix_drops_only_matching_pages() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        cache.begin(&posts_key("rust", &ListingOptions::default()));
        cache.begin(&posts_key("news", &ListingOptions::default()));
        cache.begin(&subreddits_key("", &ListingOptions::default()));

        cache.invalidate_prefix(&posts_prefix("rust"));

        assert!(cache.get(&posts_key("rust", &ListingOptions::default())).is_none());
        assert!(cache.get(&posts_key("news", &ListingOptions::default())).is_some());
        assert!(cache
            .get(&subreddits_key("", &ListingOptions::default()))
            .is_some());
    }

    #[test]
    fn keys_separate_search_terms_and_pages() {
        let first = ListingOptions::default();
        let second = ListingOptions {
            after: Some("t5_abc".to_string()),
            count: Some("25".to_string()),
            ..ListingOptions::default()
        };

        assert_ne!(subreddits_key("rust", &first), subreddits_key("", &first));
        assert_ne!(subreddits_key("rust", &first), subreddits_key("rust", &second));
        assert_ne!(posts_key("rust", &first), posts_key("rust", &second));
    }
}

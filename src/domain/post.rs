use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A Reddit post as returned by `/r/<subreddit>.json`.
///
/// `selftext_html` carries the body of self posts with its markup
/// entity-escaped a second time; see the `sanitize` module.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub author: String,
    pub permalink: String,
    pub num_comments: u64,
    #[serde(default)]
    pub selftext_html: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_utc: Option<f64>,
}

impl Post {
    /// Absolute link to the post's comment page.
    pub fn comments_url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.permalink)
    }

    /// The link target for link posts. `url` points back at the comment
    /// page for self posts, in which case there is nothing external.
    pub fn external_url(&self, base: &str) -> Option<&str> {
        match self.url.as_deref() {
            Some(url) if url != self.comments_url(base) => Some(url),
            _ => None,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_utc
            .and_then(|secs| DateTime::from_timestamp(secs as i64, 0))
    }

    /// Short age label relative to `now`, e.g. "42m" or "3h".
    pub fn age_label(&self, now: DateTime<Utc>) -> Option<String> {
        let delta = now.signed_duration_since(self.created_at()?);
        let label = if delta.num_minutes() < 1 {
            "now".to_string()
        } else if delta.num_minutes() < 60 {
            format!("{}m", delta.num_minutes())
        } else if delta.num_hours() < 24 {
            format!("{}h", delta.num_hours())
        } else {
            format!("{}d", delta.num_days())
        };
        Some(label)
    }
}

use serde::Deserialize;

/// A subreddit summary row from `/subreddits.json` or
/// `/subreddits/search.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Subreddit {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub subscribers: Option<u64>,
}

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app::error::{Result, SrrError};
use crate::config::Config;
use crate::reddit::http::HttpRedditApi;
use crate::reddit::RedditApi;
use crate::store::{FileStore, MemoryStore, TopicStore};

pub struct AppContext {
    pub api: Arc<dyn RedditApi + Send + Sync>,
    pub store: Arc<dyn TopicStore + Send + Sync>,
    pub config: Config,
}

impl AppContext {
    pub fn new(config: Config, data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(p) => p,
            None => Self::default_data_dir()?,
        };

        let api = Self::build_api(&config)?;
        let store: Arc<dyn TopicStore + Send + Sync> = Arc::new(FileStore::new(data_dir));

        Ok(Self { api, store, config })
    }

    /// Context with a non-persistent store, used by tests.
    pub fn in_memory(config: Config) -> Result<Self> {
        let api = Self::build_api(&config)?;
        let store: Arc<dyn TopicStore + Send + Sync> = Arc::new(MemoryStore::new());

        Ok(Self { api, store, config })
    }

    /// The saved topic list, falling back to the configured defaults when
    /// the slot has never been written.
    pub fn topics(&self) -> Result<Vec<String>> {
        Ok(match self.store.load()? {
            Some(topics) => topics,
            None => self.config.reddit.default_topics.clone(),
        })
    }

    fn build_api(config: &Config) -> Result<Arc<dyn RedditApi + Send + Sync>> {
        let api = HttpRedditApi::new(
            &config.reddit.base_url,
            Duration::from_secs(config.reddit.timeout_secs),
        )?;
        Ok(Arc::new(api))
    }

    fn default_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| SrrError::Config("Could not find data directory".into()))?;
        let srr_dir = data_dir.join("srr");
        std::fs::create_dir_all(&srr_dir)?;
        Ok(srr_dir)
    }
}

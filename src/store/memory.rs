use std::sync::Mutex;

use super::{pack_topics, unpack_topics, TopicStore};
use crate::app::{Result, SrrError};

/// In-memory topic store for tests. Holds the same packed form a
/// [`super::FileStore`] slot would.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TopicStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<String>>> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| SrrError::Store(e.to_string()))?;

        let Some(packed) = slot.as_deref() else {
            return Ok(None);
        };

        let topics = unpack_topics(packed);
        if topics.is_empty() {
            return Ok(None);
        }

        Ok(Some(topics))
    }

    fn save(&self, topics: &[String]) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| SrrError::Store(e.to_string()))?;
        *slot = Some(pack_topics(topics));
        Ok(())
    }
}

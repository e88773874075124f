use std::fs;
use std::path::PathBuf;

use super::{pack_topics, unpack_topics, TopicStore};
use crate::app::Result;

/// Name of the single slot file holding the packed topic list.
const SLOT_NAME: &str = "srr_feed";

/// Topic persistence backed by one small file in the data directory.
pub struct FileStore {
    slot_path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            slot_path: data_dir.join(SLOT_NAME),
        }
    }

    pub fn slot_path(&self) -> &PathBuf {
        &self.slot_path
    }
}

impl TopicStore for FileStore {
    fn load(&self) -> Result<Option<Vec<String>>> {
        let packed = match fs::read_to_string(&self.slot_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let topics = unpack_topics(packed.trim());
        if topics.is_empty() {
            // A written-but-blank slot behaves the same as no slot at all.
            return Ok(None);
        }

        Ok(Some(topics))
    }

    fn save(&self, topics: &[String]) -> Result<()> {
        if let Some(parent) = self.slot_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.slot_path, pack_topics(topics))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn missing_slot_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        store.save(&topics(&["rust", "news", "askscience"])).unwrap();

        assert_eq!(
            store.load().unwrap(),
            Some(topics(&["askscience", "news", "rust"]))
        );
    }

    #[test]
    fn blank_slot_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        store.save(&[]).unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("srr");
        let store = FileStore::new(nested.clone());

        store.save(&topics(&["news"])).unwrap();

        assert!(nested.join("srr_feed").exists());
    }

    #[test]
    fn slot_file_holds_packed_form() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        store.save(&topics(&["zebra", "apple"])).unwrap();

        let raw = std::fs::read_to_string(store.slot_path()).unwrap();
        assert_eq!(raw, "apple,zebra");
    }
}

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::app::Result;

/// Packs a topic list into its slot form: sorted, comma-joined.
pub fn pack_topics(topics: &[String]) -> String {
    let mut sorted: Vec<&str> = topics.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(",")
}

/// Splits a packed slot back into topics. Empty segments are dropped, so
/// a blank slot unpacks to nothing.
pub fn unpack_topics(packed: &str) -> Vec<String> {
    packed
        .split(',')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// The single-slot persistence seam for the user's topic list.
pub trait TopicStore {
    /// The saved topics, or `None` when the slot has never been written
    /// or holds nothing.
    fn load(&self) -> Result<Option<Vec<String>>>;

    fn save(&self, topics: &[String]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn pack_sorts_and_joins() {
        assert_eq!(pack_topics(&topics(&["zebra", "apple", "news"])), "apple,news,zebra");
    }

    #[test]
    fn unpack_round_trips_to_sorted_order() {
        let list = topics(&["zebra", "apple", "news"]);
        let mut expected = list.clone();
        expected.sort();

        assert_eq!(unpack_topics(&pack_topics(&list)), expected);
    }

    #[test]
    fn unpack_drops_empty_segments() {
        assert_eq!(unpack_topics(""), Vec::<String>::new());
        assert_eq!(unpack_topics(",,news,"), topics(&["news"]));
    }

    #[test]
    fn pack_of_empty_list_is_blank() {
        assert_eq!(pack_topics(&[]), "");
    }
}

use std::collections::{BTreeMap, HashSet};

use ratatui::widgets::ListState;

use crate::domain::{ListingPage, Post, Subreddit};
use crate::query::{self, QueryCache, QueryState};

use super::pager::Pager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Feed,
    Manage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Topics,
    Results,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Topics => ActivePane::Results,
            ActivePane::Results => ActivePane::Topics,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

/// Feed-view state for one topic: whether its section is open, which page
/// of posts it shows, and which posts have their body expanded.
pub struct Section {
    pub open: bool,
    pub pager: Pager,
    pub expanded: HashSet<usize>,
}

impl Section {
    fn new(page_size: u32) -> Self {
        Self {
            open: true,
            pager: Pager::new(page_size),
            expanded: HashSet::new(),
        }
    }
}

/// One row of the flattened feed view. Post rows carry their index into
/// the section's current page rather than the post itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedRow {
    Header {
        topic: String,
        open: bool,
    },
    Loading {
        topic: String,
    },
    Error {
        topic: String,
        message: String,
    },
    Post {
        topic: String,
        index: usize,
        expanded: bool,
    },
    Pager {
        topic: String,
        page: u32,
        has_prev: bool,
        has_next: bool,
    },
    Empty,
}

impl FeedRow {
    pub fn topic(&self) -> Option<&str> {
        match self {
            FeedRow::Header { topic, .. }
            | FeedRow::Loading { topic }
            | FeedRow::Error { topic, .. }
            | FeedRow::Post { topic, .. }
            | FeedRow::Pager { topic, .. } => Some(topic.as_str()),
            FeedRow::Empty => None,
        }
    }
}

pub struct TuiApp {
    pub view: View,
    pub active_pane: ActivePane,
    /// Base URL posts link back to, from the reddit config.
    pub base_url: String,
    /// Saved topics, kept sorted to match the stored slot.
    pub topics: Vec<String>,
    pub sections: BTreeMap<String, Section>,
    pub posts: QueryCache<ListingPage<Post>>,
    pub subreddits: QueryCache<ListingPage<Subreddit>>,
    /// Submitted search term; empty browses the front listing.
    pub search: String,
    /// Some while the search box is being typed into.
    pub search_input: Option<String>,
    pub results_pager: Pager,
    pub feed_index: usize,
    pub topic_index: usize,
    pub result_index: usize,
    pub feed_list_state: ListState,
    pub topic_list_state: ListState,
    pub result_list_state: ListState,
    pub should_quit: bool,
    pub status_message: Option<String>,
    page_size: u32,
}

impl TuiApp {
    pub fn new(mut topics: Vec<String>, page_size: u32, base_url: String) -> Self {
        topics.sort();
        let sections = topics
            .iter()
            .map(|t| (t.clone(), Section::new(page_size)))
            .collect();

        let mut feed_list_state = ListState::default();
        feed_list_state.select(Some(0));
        let mut topic_list_state = ListState::default();
        topic_list_state.select(Some(0));
        let mut result_list_state = ListState::default();
        result_list_state.select(Some(0));

        Self {
            view: View::Manage,
            active_pane: ActivePane::Topics,
            base_url,
            topics,
            sections,
            posts: QueryCache::new(),
            subreddits: QueryCache::new(),
            search: String::new(),
            search_input: None,
            results_pager: Pager::new(page_size),
            feed_index: 0,
            topic_index: 0,
            result_index: 0,
            feed_list_state,
            topic_list_state,
            result_list_state,
            should_quit: false,
            status_message: None,
            page_size,
        }
    }

    // --- topic list ---

    /// Adds a topic in sorted position. A duplicate is a no-op returning
    /// false.
    pub fn add_topic(&mut self, name: &str) -> bool {
        let idx = match self.topics.binary_search_by(|t| t.as_str().cmp(name)) {
            Ok(_) => return false,
            Err(idx) => idx,
        };
        self.topics.insert(idx, name.to_string());
        self.sections
            .insert(name.to_string(), Section::new(self.page_size));
        true
    }

    /// Removes a topic and its section. Removing an absent topic is a
    /// no-op returning false.
    pub fn remove_topic(&mut self, name: &str) -> bool {
        let Ok(idx) = self.topics.binary_search_by(|t| t.as_str().cmp(name)) else {
            return false;
        };
        self.topics.remove(idx);
        self.sections.remove(name);

        if self.topic_index >= self.topics.len() && !self.topics.is_empty() {
            self.topic_index = self.topics.len() - 1;
        }
        self.topic_list_state.select(Some(self.topic_index));
        self.clamp_feed_selection();
        true
    }

    pub fn selected_topic(&self) -> Option<&String> {
        self.topics.get(self.topic_index)
    }

    // --- post queries ---

    pub fn posts_key_for(&self, topic: &str) -> Option<String> {
        self.sections
            .get(topic)
            .map(|s| query::posts_key(topic, s.pager.options()))
    }

    pub fn current_posts(&self, topic: &str) -> Option<&QueryState<ListingPage<Post>>> {
        let key = self.posts_key_for(topic)?;
        self.posts.get(&key)
    }

    pub fn post_at(&self, topic: &str, index: usize) -> Option<&Post> {
        match self.current_posts(topic)? {
            QueryState::Ready(page) => page.children.get(index).map(|c| &c.data),
            _ => None,
        }
    }

    // --- subreddit queries ---

    pub fn results_key(&self) -> String {
        query::subreddits_key(&self.search, self.results_pager.options())
    }

    pub fn current_results(&self) -> Option<&QueryState<ListingPage<Subreddit>>> {
        self.subreddits.get(&self.results_key())
    }

    pub fn results_len(&self) -> usize {
        match self.current_results() {
            Some(QueryState::Ready(page)) => page.children.len(),
            _ => 0,
        }
    }

    pub fn selected_result(&self) -> Option<&Subreddit> {
        match self.current_results()? {
            QueryState::Ready(page) => page.children.get(self.result_index).map(|c| &c.data),
            _ => None,
        }
    }

    // --- feed view ---

    /// The feed view flattened into rows: a header per topic, then that
    /// section's posts and pager when it is open.
    pub fn feed_rows(&self) -> Vec<FeedRow> {
        if self.topics.is_empty() {
            return vec![FeedRow::Empty];
        }

        let mut rows = Vec::new();
        for topic in &self.topics {
            let Some(section) = self.sections.get(topic) else {
                continue;
            };
            rows.push(FeedRow::Header {
                topic: topic.clone(),
                open: section.open,
            });
            if !section.open {
                continue;
            }

            let key = query::posts_key(topic, section.pager.options());
            match self.posts.get(&key) {
                None | Some(QueryState::Loading) => rows.push(FeedRow::Loading {
                    topic: topic.clone(),
                }),
                Some(QueryState::Failed(message)) => rows.push(FeedRow::Error {
                    topic: topic.clone(),
                    message: message.clone(),
                }),
                Some(QueryState::Ready(page)) => {
                    for index in 0..page.children.len() {
                        rows.push(FeedRow::Post {
                            topic: topic.clone(),
                            index,
                            expanded: section.expanded.contains(&index),
                        });
                    }
                    rows.push(FeedRow::Pager {
                        topic: topic.clone(),
                        page: section.pager.page(),
                        has_prev: page.before.is_some(),
                        has_next: page.after.is_some(),
                    });
                }
            }
        }
        rows
    }

    pub fn selected_feed_row(&self) -> Option<FeedRow> {
        self.feed_rows().into_iter().nth(self.feed_index)
    }

    pub fn toggle_section(&mut self, topic: &str) {
        if let Some(section) = self.sections.get_mut(topic) {
            section.open = !section.open;
        }
        self.clamp_feed_selection();
    }

    pub fn toggle_post(&mut self, topic: &str, index: usize) {
        if let Some(section) = self.sections.get_mut(topic) {
            if !section.expanded.remove(&index) {
                section.expanded.insert(index);
            }
        }
    }

    // --- search input ---

    pub fn in_search_input(&self) -> bool {
        self.search_input.is_some()
    }

    pub fn start_search(&mut self) {
        self.search_input = Some(self.search.clone());
    }

    pub fn search_push(&mut self, c: char) {
        if let Some(buf) = &mut self.search_input {
            buf.push(c);
        }
    }

    pub fn search_pop(&mut self) {
        if let Some(buf) = &mut self.search_input {
            buf.pop();
        }
    }

    pub fn cancel_search(&mut self) {
        self.search_input = None;
    }

    /// Applies the typed term and starts over from the first page.
    pub fn submit_search(&mut self) {
        if let Some(buf) = self.search_input.take() {
            self.search = buf.trim().to_string();
            self.results_pager.reset();
            self.result_index = 0;
            self.result_list_state.select(Some(0));
        }
    }

    // --- navigation ---

    pub fn move_up(&mut self) {
        match self.view {
            View::Feed => {
                if self.feed_index > 0 {
                    self.feed_index -= 1;
                    self.feed_list_state.select(Some(self.feed_index));
                }
            }
            View::Manage => match self.active_pane {
                ActivePane::Topics => {
                    if self.topic_index > 0 {
                        self.topic_index -= 1;
                        self.topic_list_state.select(Some(self.topic_index));
                    }
                }
                ActivePane::Results => {
                    if self.result_index > 0 {
                        self.result_index -= 1;
                        self.result_list_state.select(Some(self.result_index));
                    }
                }
            },
        }
    }

    pub fn move_down(&mut self) {
        match self.view {
            View::Feed => {
                let len = self.feed_rows().len();
                if len > 0 && self.feed_index < len - 1 {
                    self.feed_index += 1;
                    self.feed_list_state.select(Some(self.feed_index));
                }
            }
            View::Manage => match self.active_pane {
                ActivePane::Topics => {
                    if !self.topics.is_empty() && self.topic_index < self.topics.len() - 1 {
                        self.topic_index += 1;
                        self.topic_list_state.select(Some(self.topic_index));
                    }
                }
                ActivePane::Results => {
                    let len = self.results_len();
                    if len > 0 && self.result_index < len - 1 {
                        self.result_index += 1;
                        self.result_list_state.select(Some(self.result_index));
                    }
                }
            },
        }
    }

    pub fn clamp_feed_selection(&mut self) {
        let len = self.feed_rows().len();
        if len == 0 {
            self.feed_index = 0;
        } else if self.feed_index >= len {
            self.feed_index = len - 1;
        }
        self.feed_list_state.select(Some(self.feed_index));
    }

    pub fn clamp_result_selection(&mut self) {
        let len = self.results_len();
        if len == 0 {
            self.result_index = 0;
        } else if self.result_index >= len {
            self.result_index = len - 1;
        }
        self.result_list_state.select(Some(self.result_index));
    }

    // --- status ---

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ListingChild, ListingOptions};

    fn post(title: &str) -> Post {
        Post {
            id: "abc".to_string(),
            title: title.to_string(),
            author: "someone".to_string(),
            permalink: format!("/r/test/comments/abc/{title}/"),
            num_comments: 0,
            selftext_html: None,
            url: None,
            created_utc: None,
        }
    }

    fn page_of(posts: Vec<Post>, after: Option<&str>) -> ListingPage<Post> {
        ListingPage {
            children: posts
                .into_iter()
                .map(|p| ListingChild {
                    kind: "t3".to_string(),
                    data: p,
                })
                .collect(),
            before: None,
            after: after.map(str::to_string),
        }
    }

    fn app_with(topics: &[&str]) -> TuiApp {
        TuiApp::new(
            topics.iter().map(|t| t.to_string()).collect(),
            25,
            "https://www.reddit.com".to_string(),
        )
    }

    #[test]
    fn starts_in_manage_view_with_open_sections() {
        let app = app_with(&["news"]);

        assert_eq!(app.view, View::Manage);
        assert_eq!(app.active_pane, ActivePane::Topics);
        assert!(app.sections["news"].open);
    }

    #[test]
    fn add_topic_keeps_sorted_order_and_refuses_duplicates() {
        let mut app = app_with(&["news"]);

        assert!(app.add_topic("askscience"));
        assert!(!app.add_topic("askscience"));

        assert_eq!(app.topics, ["askscience", "news"]);
        assert!(app.sections.contains_key("askscience"));
    }

    #[test]
    fn remove_topic_is_a_no_op_when_absent() {
        let mut app = app_with(&["news"]);

        assert!(app.remove_topic("news"));
        assert!(!app.remove_topic("news"));

        assert!(app.topics.is_empty());
        assert!(!app.sections.contains_key("news"));
    }

    #[test]
    fn empty_topic_list_renders_the_empty_row() {
        let app = app_with(&[]);
        assert_eq!(app.feed_rows(), vec![FeedRow::Empty]);
    }

    #[test]
    fn ready_page_renders_posts_and_pager() {
        let mut app = app_with(&["news"]);
        let key = app.posts_key_for("news").unwrap();
        app.posts
            .resolve(&key, Ok(page_of(vec![post("a"), post("b")], Some("t3_x"))));

        let rows = app.feed_rows();

        assert_eq!(rows.len(), 4);
        assert!(matches!(&rows[0], FeedRow::Header { open: true, .. }));
        assert!(matches!(&rows[1], FeedRow::Post { index: 0, .. }));
        assert!(matches!(
            &rows[3],
            FeedRow::Pager {
                has_prev: false,
                has_next: true,
                ..
            }
        ));
    }

    #[test]
    fn closed_section_shows_only_its_header() {
        let mut app = app_with(&["news"]);
        let key = app.posts_key_for("news").unwrap();
        app.posts.resolve(&key, Ok(page_of(vec![post("a")], None)));

        app.toggle_section("news");

        let rows = app.feed_rows();
        assert_eq!(rows.len(), 1);
        assert!(matches!(&rows[0], FeedRow::Header { open: false, .. }));
    }

    #[test]
    fn unfetched_section_renders_a_loading_row() {
        let app = app_with(&["news"]);

        let rows = app.feed_rows();
        assert_eq!(rows.len(), 2);
        assert!(matches!(&rows[1], FeedRow::Loading { .. }));
    }

    #[test]
    fn failed_query_renders_its_message() {
        let mut app = app_with(&["news"]);
        let key = app.posts_key_for("news").unwrap();
        app.posts.resolve(&key, Err("HTTP error: 503".to_string()));

        let rows = app.feed_rows();
        assert!(matches!(&rows[1], FeedRow::Error { message, .. } if message == "HTTP error: 503"));
    }

    #[test]
    fn toggle_post_flips_expansion() {
        let mut app = app_with(&["news"]);

        app.toggle_post("news", 1);
        assert!(app.sections["news"].expanded.contains(&1));

        app.toggle_post("news", 1);
        assert!(!app.sections["news"].expanded.contains(&1));
    }

    #[test]
    fn submit_search_applies_the_term_and_resets_the_pager() {
        let mut app = app_with(&[]);
        app.results_pager.turn(None, Some("t5_x".to_string()));

        app.start_search();
        app.search_push('r');
        app.submit_search();

        assert_eq!(app.search, "r");
        assert_eq!(app.results_pager.page(), 1);
        assert_eq!(app.results_pager.options(), &ListingOptions::default());
        assert!(!app.in_search_input());
    }

    #[test]
    fn cancel_search_keeps_the_old_term() {
        let mut app = app_with(&[]);
        app.search = "rust".to_string();

        app.start_search();
        app.search_push('x');
        app.cancel_search();

        assert_eq!(app.search, "rust");
        assert!(!app.in_search_input());
    }

    #[test]
    fn move_down_stops_at_the_last_row() {
        let mut app = app_with(&["news"]);
        app.view = View::Feed;

        // header + loading row
        app.move_down();
        app.move_down();

        assert_eq!(app.feed_index, 1);
    }

    #[test]
    fn selected_result_tracks_the_results_pane() {
        let mut app = app_with(&[]);
        let key = app.results_key();
        let sub = |name: &str| ListingChild {
            kind: "t5".to_string(),
            data: Subreddit {
                display_name: name.to_string(),
                description: String::new(),
                kind: "public".to_string(),
                subscribers: None,
            },
        };
        app.subreddits.resolve(
            &key,
            Ok(ListingPage {
                children: vec![sub("rust"), sub("news")],
                before: None,
                after: None,
            }),
        );

        app.active_pane = ActivePane::Results;
        app.move_down();

        assert_eq!(
            app.selected_result().map(|s| s.display_name.as_str()),
            Some("news")
        );
    }
}

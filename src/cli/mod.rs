pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ListingOptions;

#[derive(Parser)]
#[command(name = "srr")]
#[command(about = "A streamlined terminal reader for Reddit", long_about = None)]
pub struct Cli {
    /// Directory holding the saved feed (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a subreddit to the feed
    Add {
        /// Subreddit name, without the r/ prefix
        topic: String,
    },
    /// Remove a subreddit from the feed
    Remove {
        /// Subreddit name, without the r/ prefix
        topic: String,
    },
    /// List the saved subreddits
    List,
    /// Search subreddits
    Search {
        /// Search term; empty browses the front listing
        #[arg(default_value = "")]
        query: String,

        #[command(flatten)]
        cursor: CursorArgs,
    },
    /// Print one page of posts from a subreddit
    Posts {
        /// Subreddit name, without the r/ prefix
        subreddit: String,

        #[command(flatten)]
        cursor: CursorArgs,
    },
    /// Print the first page of every saved subreddit
    Feed,
    /// Launch the TUI
    Tui,
}

/// Listing cursor flags shared by the paging commands.
#[derive(Args)]
pub struct CursorArgs {
    /// Cursor naming the entry to page back from
    #[arg(long)]
    pub before: Option<String>,

    /// Cursor naming the entry to page forward from
    #[arg(long)]
    pub after: Option<String>,

    /// Entries already seen; required alongside either cursor
    #[arg(long)]
    pub count: Option<String>,
}

impl CursorArgs {
    pub fn into_options(self) -> ListingOptions {
        ListingOptions {
            before: self.before,
            after: self.after,
            count: self.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_defaults_to_an_empty_query() {
        let cli = Cli::parse_from(["srr", "search"]);
        match cli.command {
            Commands::Search { query, cursor } => {
                assert_eq!(query, "");
                assert!(cursor.before.is_none() && cursor.after.is_none());
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn cursor_flags_become_listing_options() {
        let cli = Cli::parse_from([
            "srr", "posts", "rust", "--after", "t3_abc", "--count", "25",
        ]);
        match cli.command {
            Commands::Posts { subreddit, cursor } => {
                assert_eq!(subreddit, "rust");
                let options = cursor.into_options();
                assert_eq!(options.after.as_deref(), Some("t3_abc"));
                assert_eq!(options.count.as_deref(), Some("25"));
            }
            _ => panic!("expected posts command"),
        }
    }

    #[test]
    fn data_dir_is_global() {
        let cli = Cli::parse_from(["srr", "list", "--data-dir", "/tmp/srr"]);
        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("/tmp/srr")));
    }
}

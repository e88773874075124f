//! # srr
//!
//! A streamlined terminal reader for Reddit.
//!
//! ## Architecture
//!
//! Srr is a thin client over Reddit's public JSON listings:
//!
//! ```text
//! Reddit JSON API → Listing decode → Query cache → UI
//! ```
//!
//! - [`reddit`]: HTTP client for the listing endpoints
//! - [`domain`]: Listing envelope, posts, and subreddits
//! - [`store`]: Single-slot persistence for the curated topic list
//! - [`tui`]: Terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Find subreddits
//! srr search rust
//!
//! # Curate the feed
//! srr add rust
//! srr remove news
//!
//! # Read a page of everything saved
//! srr feed
//!
//! # Launch TUI
//! srr tui
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: TOML configuration and UI colors
//! - [`domain`]: Core domain models (Listing, Post, Subreddit)
//! - [`query`]: Keyed cache for in-flight and settled requests
//! - [`reddit`]: Reddit JSON API client
//! - [`sanitize`]: Entity decoding and tag stripping for post bodies
//! - [`store`]: Topic list persistence
//! - [`tui`]: Terminal user interface

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// API client, topic store, configuration.
pub mod app;

/// Command-line interface using clap.
///
/// Defines the CLI structure and subcommands:
/// - `add <topic>` - Add a subreddit to the feed
/// - `remove <topic>` - Remove a subreddit from the feed
/// - `list` - List the saved subreddits
/// - `search [query]` - Search subreddits
/// - `posts <subreddit>` - Print one page of posts
/// - `feed` - Print the first page of every saved subreddit
/// - `tui` - Launch the TUI
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/srr/config.toml`, supporting:
/// - Custom colors (named or hex)
/// - Request timeout, page size, and default topics
pub mod config;

/// Core domain models.
///
/// - [`Listing`](domain::Listing): Reddit's paginated response envelope
/// - [`Post`](domain::Post): One link or self post
/// - [`Subreddit`](domain::Subreddit): Community metadata from search
pub mod domain;

/// Keyed cache of query state shared by the TUI views.
///
/// Tracks each request from [`begin`](query::QueryCache::begin) to its
/// [`QueryOutcome`](query::QueryOutcome), so a page revisited while its
/// data is cached renders without refetching.
pub mod query;

/// Reddit JSON API client.
///
/// - [`RedditApi`](reddit::RedditApi): Async trait over the listing endpoints
/// - [`HttpRedditApi`](reddit::HttpRedditApi): reqwest-based implementation
pub mod reddit;

/// Entity decoding and tag stripping for Reddit self-text HTML.
pub mod sanitize;

/// Topic list persistence.
///
/// - [`TopicStore`](store::TopicStore): Trait defining the storage slot
/// - [`FileStore`](store::FileStore): Single-file implementation
/// - [`MemoryStore`](store::MemoryStore): Non-persistent test double
pub mod store;

/// Terminal user interface.
///
/// Two views built with ratatui:
/// - Feed: collapsible per-topic post sections with paging
/// - Manage: saved topics beside live subreddit search results
///
/// Keybindings: j/k navigate, Tab cycles panes, Enter selects,
/// n/p turn pages, o opens in browser, R reloads, q quits.
pub mod tui;

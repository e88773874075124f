pub mod listing;
pub mod post;
pub mod subreddit;

pub use listing::{Listing, ListingChild, ListingOptions, ListingPage};
pub use post::Post;
pub use subreddit::Subreddit;

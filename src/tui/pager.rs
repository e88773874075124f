//! Pagination state for one listing query.

use crate::domain::ListingOptions;

/// Tracks which page of a listing is showing and the cursor options that
/// fetch it.
///
/// Reddit paginates with opaque cursors plus a `count` of entries already
/// seen. The count here is reconstructed from the page number, so it is a
/// numbering hint only and never decides which entries come back.
#[derive(Debug, Clone)]
pub struct Pager {
    page: u32,
    options: ListingOptions,
    page_size: u32,
}

impl Pager {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            options: ListingOptions::default(),
            page_size,
        }
    }

    pub fn options(&self) -> &ListingOptions {
        &self.options
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Turns the page using cursors from the listing currently showing.
    /// Exactly one cursor decides the direction; both cursor fields are
    /// replaced, so a stale cursor never leaks into the next request.
    /// A turn with neither cursor is logged and ignored.
    pub fn turn(&mut self, before: Option<String>, after: Option<String>) {
        let count;
        if after.is_some() {
            self.page += 1;
            count = self.page * self.page_size;
        } else if before.is_some() {
            self.page = self.page.saturating_sub(1);
            count = self.page * self.page_size + 1;
        } else {
            tracing::error!("malformed listing options: neither cursor present");
            return;
        }

        self.options = ListingOptions {
            before,
            after,
            count: Some(count.to_string()),
        };
    }

    /// Back to the first page with no cursors, for a fresh query.
    pub fn reset(&mut self) {
        self.page = 1;
        self.options = ListingOptions::default();
    }
}

use serde::Deserialize;

/// Cursor options for Reddit's listing endpoints.
///
/// `before` and `after` are opaque cursors copied from a previous page;
/// `count` is the number of entries already seen, which Reddit expects
/// whenever a cursor is supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingOptions {
    pub before: Option<String>,
    pub after: Option<String>,
    pub count: Option<String>,
}

impl ListingOptions {
    pub fn has_cursor(&self) -> bool {
        self.before.is_some() || self.after.is_some()
    }

    /// Query parameters in wire order, with unset fields omitted.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(before) = &self.before {
            params.push(("before", before.clone()));
        }
        if let Some(after) = &self.after {
            params.push(("after", after.clone()));
        }
        if let Some(count) = &self.count {
            params.push(("count", count.clone()));
        }
        params
    }

    /// Stable key fragment distinguishing one page of a query from another.
    pub fn cache_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.before.as_deref().unwrap_or(""),
            self.after.as_deref().unwrap_or(""),
            self.count.as_deref().unwrap_or("")
        )
    }
}

/// Reddit's listing envelope: `{kind, data: {children, before, after}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    pub kind: String,
    pub data: ListingPage<T>,
}

/// One page of listing results with its pagination cursors.
///
/// Cursors come over the wire as `null` on the first and last pages and
/// are occasionally omitted outright, so both forms read as `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage<T> {
    pub children: Vec<ListingChild<T>>,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingChild<T> {
    pub kind: String,
    pub data: T,
}

impl<T> ListingPage<T> {
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.children.iter().map(|c| &c.data)
    }
}

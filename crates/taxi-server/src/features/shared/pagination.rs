//! Shared pagination utilities
//!
//! List views split their (possibly filtered) result set into fixed-size
//! pages. The `page` query parameter is either a 1-based number or `last`;
//! anything else, and any number past the final page, is an [`InvalidPage`].
//! An empty result set still has one (empty) page.
//!
//! # Examples
//!
//! ```rust,ignore
//! use taxi_server::features::shared::pagination::PageObj;
//!
//! let page = PageObj::resolve(Some("2"), 16, 5)?;
//! assert_eq!(page.num_pages, 4);
//! assert_eq!(page.offset(), 5);
//! ```

use serde::{ser::SerializeMap, Serialize, Serializer};
use thiserror::Error;

use super::search::SearchFilter;

/// Value of `page` that selects the final page
pub const LAST_PAGE: &str = "last";

/// Why a requested page cannot be served
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidPage {
    #[error("That page number is not an integer")]
    NotAnInteger,

    #[error("That page number is less than 1")]
    LessThanOne,

    #[error("That page contains no results")]
    NoResults,
}

/// Position of the current page within the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageObj {
    /// Current page number (1-indexed)
    pub number: i64,

    /// Total number of pages, at least 1
    pub num_pages: i64,

    /// Total number of records across all pages
    pub count: i64,

    pub per_page: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageObj {
    /// Resolve the raw `page` parameter against a result set of `count` records
    pub fn resolve(page: Option<&str>, count: i64, per_page: i64) -> Result<Self, InvalidPage> {
        let per_page = per_page.max(1);
        let num_pages = if count <= 0 {
            1
        } else {
            (count + per_page - 1) / per_page
        };

        let number = match page.map(str::trim) {
            None | Some("") => 1,
            Some(LAST_PAGE) => num_pages,
            Some(raw) => raw.parse::<i64>().map_err(|_| InvalidPage::NotAnInteger)?,
        };

        if number < 1 {
            return Err(InvalidPage::LessThanOne);
        }
        if number > num_pages {
            return Err(InvalidPage::NoResults);
        }

        Ok(Self {
            number,
            num_pages,
            count: count.max(0),
            per_page,
            has_next: number < num_pages,
            has_previous: number > 1,
        })
    }

    /// Calculate the offset for SQL OFFSET clause
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    /// Whether the result set spans more than one page
    pub fn is_paginated(&self) -> bool {
        self.num_pages > 1
    }
}

/// Link to `page` of the list at `path`, keeping an active search term
pub fn page_url(path: &str, search: &SearchFilter, page: i64) -> String {
    let mut params: Vec<(&str, String)> = Vec::with_capacity(2);
    if search.is_active() {
        params.push((search.field, search.value.clone()));
    }
    params.push(("page", page.to_string()));

    match serde_urlencoded::to_string(&params) {
        Ok(query) => format!("{}?{}", path, query),
        Err(e) => {
            tracing::warn!(error = %e, "Could not encode page link; dropping search term");
            format!("{}?page={}", path, page)
        },
    }
}

/// One page of a list view, rendered as the view context
///
/// Serializes as
/// `{ <list_key>: [...], is_paginated, page_obj, next_page_url, previous_page_url, search_form }`.
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub list_key: &'static str,
    pub path: &'static str,
    pub items: Vec<T>,
    pub page_obj: PageObj,
    pub search: SearchFilter,
}

impl<T> ListPage<T> {
    pub fn is_paginated(&self) -> bool {
        self.page_obj.is_paginated()
    }

    pub fn next_page_url(&self) -> Option<String> {
        self.page_obj
            .has_next
            .then(|| page_url(self.path, &self.search, self.page_obj.number + 1))
    }

    pub fn previous_page_url(&self) -> Option<String> {
        self.page_obj
            .has_previous
            .then(|| page_url(self.path, &self.search, self.page_obj.number - 1))
    }
}

impl<T: Serialize> Serialize for ListPage<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut search_form = std::collections::BTreeMap::new();
        search_form.insert(self.search.field, self.search.value.as_str());

        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry(self.list_key, &self.items)?;
        map.serialize_entry("is_paginated", &self.is_paginated())?;
        map.serialize_entry("page_obj", &self.page_obj)?;
        map.serialize_entry("next_page_url", &self.next_page_url())?;
        map.serialize_entry("previous_page_url", &self.previous_page_url())?;
        map.serialize_entry("search_form", &search_form)?;
        map.end()
    }
}

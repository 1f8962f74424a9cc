//! Page-based pagination for the inventory listing.
//!
//! Pages are 1-based and the page size is fixed by configuration, so clients only ever send
//! `page`. Anything below 1, or anything that doesn't parse, is treated as page 1.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PageQuery {
    /// Case-insensitive text filter
    pub q: Option<String>,

    /// 1-based page number (default: 1)
    #[param(default = 1, minimum = 1)]
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    pub page: Option<i64>,
}

impl PageQuery {
    /// Requested page, at least 1.
    #[inline]
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1) as usize
    }

    /// Trimmed search text, if any.
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Number of pages needed for `total_count` items; never less than 1.
#[inline]
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size.max(1)).max(1)
}

/// One page of results plus the numbers a pager needs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PagedResponse<T: ToSchema> {
    /// The items for the current page
    pub data: Vec<T>,
    /// Total number of items matching the filter (before pagination)
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T: ToSchema> PagedResponse<T> {
    pub fn new(data: Vec<T>, total_count: usize, page: usize, page_size: usize) -> Self {
        Self {
            data,
            total_count,
            page,
            page_size,
            total_pages: total_pages(total_count, page_size),
        }
    }
}

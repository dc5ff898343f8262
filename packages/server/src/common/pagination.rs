//! Page-number pagination for collection endpoints.
//!
//! Offers are served six per page by default; `page_size` may raise this
//! up to 100. The envelope mirrors the classic `{count, next, previous,
//! results}` shape.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 6;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters accepted by paginated list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageParams {
    /// 1-based page number; anything below 1 is treated as page 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Items per page, clamped to [1, MAX_PAGE_SIZE].
    pub fn size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size())
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.size())
    }
}

/// A single page of results.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Build a page envelope with relative next/previous links.
pub fn paginate<T>(path: &str, params: &PageParams, count: i64, results: Vec<T>) -> Page<T> {
    let page = params.page();
    let size = i64::from(params.size());

    let next = if i64::from(page) * size < count {
        Some(format!(
            "{}?page={}&page_size={}",
            path,
            page + 1,
            params.size()
        ))
    } else {
        None
    };

    let previous = if page > 1 {
        Some(format!(
            "{}?page={}&page_size={}",
            path,
            page - 1,
            params.size()
        ))
    } else {
        None
    };

    Page {
        count,
        next,
        previous,
        results,
    }
}

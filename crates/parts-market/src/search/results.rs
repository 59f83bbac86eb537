//! Ranked page and pagination.

use crate::search::RankedCandidate;
use serde::{Deserialize, Serialize};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Filtered total before paging.
    pub total: u64,
    /// `ceil(total / limit)`; 0 for an empty result.
    pub pages: u64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            u64::from(self.page.saturating_sub(1)) * u64::from(self.limit) + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.limit)).min(self.total)
    }
}

/// One response page.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPage {
    pub products: Vec<RankedCandidate>,
    pub pagination: Pagination,
}

impl RankedPage {
    pub fn new(products: Vec<RankedCandidate>, pagination: Pagination) -> Self {
        Self {
            products,
            pagination,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

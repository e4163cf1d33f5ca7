//! Pagination input and output shared by every listing.

use crate::{model::api::PaginatedDto, server::config::Config};

/// Resolved pagination input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// Zero-indexed page number.
    pub page: u64,
    /// Items per page, already clamped to the configured bounds.
    pub per_page: u64,
}

impl PageParams {
    /// Resolves raw query values against the configured default and maximum page size.
    pub fn resolve(page: u64, per_page: Option<u64>, config: &Config) -> Self {
        Self {
            page,
            per_page: config.page_size(per_page),
        }
    }
}

/// One page of domain items with pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Wraps repository output, deriving the page count from the item total.
    pub fn new(items: Vec<T>, total: u64, params: PageParams) -> Self {
        let total_pages = (total as f64 / params.per_page.max(1) as f64).ceil() as u64;

        Self {
            items,
            total,
            page: params.page,
            per_page: params.per_page,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }

    /// Converts the page into its wire form, converting each item with `f`.
    pub fn into_dto<D>(self, f: impl FnMut(T) -> D) -> PaginatedDto<D> {
        PaginatedDto {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let params = PageParams {
            page: 0,
            per_page: 2,
        };

        assert_eq!(Page::new(vec![1, 2], 5, params).total_pages, 3);
        assert_eq!(Page::new(Vec::<i32>::new(), 0, params).total_pages, 0);
        assert_eq!(Page::new(vec![1, 2], 4, params).total_pages, 2);
    }
}

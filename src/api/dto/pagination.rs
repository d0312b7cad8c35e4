//! Pagination-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::config::PaginationConfig;
use crate::error::{AppError, AppResult};

/// Query parameters for pagination. Missing values fall back to the
/// configured defaults.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-based)
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: Option<u32>,

    /// Number of items per page
    #[validate(range(min = 1, message = "Page size must be at least 1"))]
    #[param(minimum = 1, example = 20)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Applies defaults and rejects page sizes above the configured maximum.
    pub fn resolve(&self, config: &PaginationConfig) -> AppResult<Page> {
        let page_size = self.page_size.unwrap_or(config.default_page_size);
        if page_size > config.max_page_size {
            return Err(AppError::validation(
                "page_size",
                format!("Page size must be between 1 and {}", config.max_page_size),
            ));
        }

        Ok(Page {
            page: self.page.unwrap_or(1).max(1),
            page_size: page_size.max(1),
        })
    }
}

/// A resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub page_size: u32,
}

impl Page {
    /// Calculates the offset for database queries.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    /// Returns the limit for database queries.
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// Generic paged payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct PagedResponse<T> {
    /// The items on this page
    pub items: Vec<T>,

    pub pagination: PaginationMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page number (1-based)
    #[schema(example = 1)]
    pub page: u32,

    /// Number of items per page
    #[schema(example = 20)]
    pub page_size: u32,

    /// Total number of items across all pages
    #[schema(example = 100)]
    pub total_items: u64,

    /// Total number of pages
    #[schema(example = 5)]
    pub total_pages: u32,

    /// Whether there is a next page
    #[schema(example = true)]
    pub has_next: bool,

    /// Whether there is a previous page
    #[schema(example = false)]
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: Page, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(u64::from(page.page_size)) as u32;

        Self {
            page: page.page,
            page_size: page.page_size,
            total_items,
            total_pages,
            has_next: page.page < total_pages,
            has_prev: page.page > 1,
        }
    }
}

impl<T> PagedResponse<T> {
    /// Wraps one page of database results.
    pub fn new(items: Vec<T>, page: Page, total_items: i64) -> Self {
        Self {
            items,
            pagination: PaginationMeta::new(page, total_items.max(0) as u64),
        }
    }

    /// Cuts a page out of a fully loaded, already ordered list.
    pub fn from_vec(all: Vec<T>, page: Page) -> Self {
        let total_items = all.len() as u64;
        let items = all
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.page_size as usize)
            .collect();

        Self {
            items,
            pagination: PaginationMeta::new(page, total_items),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResponse<U> {
        PagedResponse {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PaginationConfig {
        PaginationConfig {
            default_page_size: 20,
            max_page_size: 50,
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let page = PaginationParams::default().resolve(&config()).unwrap();
        assert_eq!(page, Page { page: 1, page_size: 20 });
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 20);
    }

    #[test]
    fn test_resolve_rejects_oversized_pages() {
        let params = PaginationParams {
            page: Some(2),
            page_size: Some(51),
        };
        assert!(matches!(
            params.resolve(&config()),
            Err(AppError::Validation { field, .. }) if field == "page_size"
        ));
    }

    #[test]
    fn test_validation_rejects_zero() {
        let params = PaginationParams {
            page: Some(0),
            page_size: Some(0),
        };
        let errors = params.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("page"));
        assert!(errors.field_errors().contains_key("page_size"));
    }

    #[test]
    fn test_offset() {
        let page = Page { page: 3, page_size: 10 };
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn test_meta() {
        let meta = PaginationMeta::new(Page { page: 2, page_size: 10 }, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let last = PaginationMeta::new(Page { page: 3, page_size: 10 }, 25);
        assert!(!last.has_next);

        let empty = PaginationMeta::new(Page { page: 1, page_size: 10 }, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
    }

    #[test]
    fn test_from_vec_slices_in_order() {
        let paged = PagedResponse::from_vec((1..=7).collect(), Page { page: 2, page_size: 3 });
        assert_eq!(paged.items, vec![4, 5, 6]);
        assert_eq!(paged.pagination.total_items, 7);
        assert_eq!(paged.pagination.total_pages, 3);

        let beyond = PagedResponse::from_vec(vec![1, 2], Page { page: 5, page_size: 3 });
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.pagination.total_items, 2);
    }

    #[test]
    fn test_map_keeps_meta() {
        let paged = PagedResponse::new(vec![1, 2], Page { page: 1, page_size: 2 }, 4);
        let mapped = paged.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.pagination.total_items, 4);
    }
}

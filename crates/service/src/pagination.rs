//! Pagination utilities for service layer
//!
//! Provides a `Pagination` struct and validation into SeaORM page coordinates.

use crate::errors::ServiceError;

/// Pagination parameters as received from callers.
///
/// Fields are signed so out-of-range input reaches `validate` instead of
/// failing at deserialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: i64,
    /// items per page
    pub per_page: i64,
}

impl Pagination {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_PER_PAGE: i64 = 20;

    /// Fill in defaults for absent parameters.
    pub fn from_params(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(Self::DEFAULT_PAGE),
            per_page: per_page.unwrap_or(Self::DEFAULT_PER_PAGE),
        }
    }

    /// Reject out-of-range values and convert to a 0-based page index and page size.
    pub fn validate(self) -> Result<(u64, u64), ServiceError> {
        if self.page < 1 {
            return Err(ServiceError::Validation(format!("pageNumber must be >= 1, got {}", self.page)));
        }
        if self.per_page < 1 {
            return Err(ServiceError::Validation(format!("pageSize must be >= 1, got {}", self.per_page)));
        }
        Ok(((self.page - 1) as u64, self.per_page as u64))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: Self::DEFAULT_PAGE, per_page: Self::DEFAULT_PER_PAGE } }
}

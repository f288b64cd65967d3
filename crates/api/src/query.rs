//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Maximum page size for list endpoints.
pub const MAX_LIMIT: i64 = 100;

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: i64 = 50;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamp the requested limit into `[1, MAX_LIMIT]` with the default.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Non-negative offset with a zero default.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let p = PaginationParams {
            limit: None,
            offset: None,
        };
        assert_eq!(p.limit(), DEFAULT_LIMIT);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn limit_is_clamped() {
        let p = PaginationParams {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(p.limit(), MAX_LIMIT);
        assert_eq!(p.offset(), 0);
    }
}

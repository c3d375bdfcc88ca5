use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 { 1 }
fn default_per_page() -> u64 { 20 }

impl PaginationParams {
    /// Saturates for absurd page numbers; such pages are simply empty.
    pub fn offset(&self) -> u64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    pub fn limit(&self) -> u64 {
        self.per_page.clamp(1, 100)
    }

    /// `offset()` as a SQL `OFFSET`, capped at `i64::MAX`.
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset()).unwrap_or(i64::MAX)
    }

    pub fn sql_limit(&self) -> i64 {
        self.limit() as i64
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self { page: 1, per_page: 20 }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, params: &PaginationParams) -> Self {
        let per_page = params.limit();
        let page = params.page.max(1);
        let total_pages = total.div_ceil(per_page);
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_uses_clamped_limit() {
        let params = PaginationParams { page: 3, per_page: 500 };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 200);

        let params = PaginationParams { page: 0, per_page: 0 };
        assert_eq!(params.limit(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn huge_page_saturates_instead_of_overflowing() {
        let params = PaginationParams { page: u64::MAX, per_page: 20 };
        assert_eq!(params.offset(), u64::MAX);
        assert_eq!(params.sql_offset(), i64::MAX);
        assert_eq!(params.sql_limit(), 20);

        let page: Paginated<i32> = Paginated::new(vec![], 3, &params);
        assert_eq!(page.total_pages, 1);
        assert!(page.has_prev);
        assert!(!page.has_next);
    }

    #[test]
    fn page_flags() {
        let params = PaginationParams { page: 2, per_page: 5 };
        let page = Paginated::new(vec![1, 2, 3, 4, 5], 12, &params);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev);
        assert!(page.has_next);

        let empty: Paginated<i32> = Paginated::new(vec![], 0, &PaginationParams::default());
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_prev);
        assert!(!empty.has_next);
    }
}

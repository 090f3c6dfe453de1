//! Page/limit arithmetic shared by every paginated listing.

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: u32 = 10;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request, replacing zero values with the defaults.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Build a request from raw query-string values.
    ///
    /// Missing, non-numeric or non-positive values fall back to the defaults.
    #[must_use]
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        fn parse(value: Option<&str>) -> u32 {
            value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
        }
        Self::new(parse(page), parse(limit))
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Page count reported next to a listing.
    ///
    /// Always `total_results / limit + 1`, so an exact multiple of `limit`
    /// reports one trailing empty page.
    #[must_use]
    pub fn total_pages(&self, total_results: u64) -> u64 {
        total_results / u64::from(self.limit) + 1
    }
}

/// One page of results together with the unpaginated total.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
    pub total_results: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.request.total_pages(self.total_results)
    }
}

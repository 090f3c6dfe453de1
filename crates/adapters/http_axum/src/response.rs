//! JSON envelopes wrapped around every successful response.

use serde::Serialize;

use nutrihub_domain::pagination::Page;

const SUCCESS: &str = "success";

/// `{"status":"success","message":..,"data":..}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    pub message: &'static str,
    pub data: T,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn success(message: &'static str, data: T) -> Self {
        Self {
            status: SUCCESS,
            message,
            data,
        }
    }
}

/// Envelope without a payload, used by deletions.
#[derive(Debug, Serialize)]
pub struct MessageOnly {
    pub status: &'static str,
    pub message: &'static str,
}

impl MessageOnly {
    #[must_use]
    pub fn success(message: &'static str) -> Self {
        Self {
            status: SUCCESS,
            message,
        }
    }
}

/// Paginated subscriptions; the page travels under `results`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResults<T> {
    pub status: &'static str,
    pub message: &'static str,
    pub results: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub total_results: u64,
}

impl<T> PaginatedResults<T> {
    #[must_use]
    pub fn success(message: &'static str, page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        Self {
            status: SUCCESS,
            message,
            results: page.items,
            page: page.request.page,
            limit: page.request.limit,
            total_pages,
            total_results: page.total_results,
        }
    }
}

/// Paginated transactions; the page travels under `data`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedData<T> {
    pub status: &'static str,
    pub message: &'static str,
    pub data: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub total_results: u64,
}

impl<T> PaginatedData<T> {
    #[must_use]
    pub fn success(message: &'static str, page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        Self {
            status: SUCCESS,
            message,
            data: page.items,
            page: page.request.page,
            limit: page.request.limit,
            total_pages,
            total_results: page.total_results,
        }
    }
}

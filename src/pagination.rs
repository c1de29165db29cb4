//! Page discovery: probe a collection once for its total count and page size, then
//! spell out every page URL.
//!
//! The count is read once. If the remote collection grows or shrinks before the page
//! fetches run, the generated URL list is stale; that is not re-validated.

use crate::errors::EtlError;
use crate::json_utils::{page_results, u64_field};
use crate::source::JsonSource;
use anyhow::{Context, Result};

pub const PAGINATION_QUERY: &str = "?page=";

/// `ceil(total / first_page_len)`. A zero-length first page has no page size to divide by.
pub fn page_count(total: u64, first_page_len: usize) -> Result<usize, EtlError> {
    if first_page_len == 0 {
        return Err(EtlError::EmptyFirstPage);
    }
    let total = usize::try_from(total).map_err(|_| EtlError::CountOverflow { count: total })?;
    Ok(total.div_ceil(first_page_len))
}

/// One GET against the bare endpoint; reads `count` and the length of `results`.
pub async fn count_pages<S: JsonSource + ?Sized>(source: &S, endpoint: &str) -> Result<usize> {
    let first = source.get_json(endpoint).await?;
    let total = u64_field(&first, "count").with_context(|| format!("probing {}", endpoint))?;
    let per_page = page_results(&first).with_context(|| format!("probing {}", endpoint))?.len();
    let pages = page_count(total, per_page).with_context(|| format!("probing {}", endpoint))?;
    tracing::info!("{}: {} records, {} per page -> {} pages", endpoint, total, per_page, pages);
    Ok(pages)
}

/// `endpoint?page=1` .. `endpoint?page=pages`, in order.
pub fn page_urls(endpoint: &str, pages: usize) -> Vec<String> {
    (1..=pages).map(|n| format!("{}{}{}", endpoint, PAGINATION_QUERY, n)).collect()
}

pub async fn generate_page_urls<S: JsonSource + ?Sized>(source: &S, endpoint: &str) -> Result<Vec<String>> {
    let pages = count_pages(source, endpoint).await?;
    Ok(page_urls(endpoint, pages))
}

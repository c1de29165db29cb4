#[path = "common/mod.rs"]
mod common;

use common::*;
use serde_json::json;
use swapi_etl::{count_pages, generate_page_urls, page_count, page_urls, EtlError};

/// Page count is `ceil(count / first_page_len)` for exact and ragged totals.
#[test]
fn page_count_rounds_up() {
    assert_eq!(page_count(60, 10).unwrap(), 6);
    assert_eq!(page_count(61, 10).unwrap(), 7);
    assert_eq!(page_count(4, 2).unwrap(), 2);
    assert_eq!(page_count(1, 10).unwrap(), 1);
    assert_eq!(page_count(0, 10).unwrap(), 0);
}

/// An empty first page has no page size; that is reported instead of dividing by zero.
#[test]
fn page_count_rejects_empty_first_page() {
    assert_eq!(page_count(10, 0).unwrap_err(), EtlError::EmptyFirstPage);
}

/// URLs are 1-based `?page=N`, in order, exactly `pages` of them.
#[test]
fn page_urls_are_one_based_and_ordered() {
    let urls = page_urls(PLANETS_EP, 3);
    assert_eq!(
        urls,
        vec![
            format!("{}?page=1", PLANETS_EP),
            format!("{}?page=2", PLANETS_EP),
            format!("{}?page=3", PLANETS_EP),
        ]
    );
    assert!(page_urls(PLANETS_EP, 0).is_empty());
}

/// The probe is a single GET on the bare endpoint.
#[tokio::test]
async fn count_pages_probes_endpoint_once() {
    let catalog = planets_two_pages();
    let pages = count_pages(&catalog, PLANETS_EP).await.unwrap();
    assert_eq!(pages, 2);
    assert_eq!(catalog.hits(PLANETS_EP), 1);
    assert_eq!(catalog.total_hits(), 1);
}

#[tokio::test]
async fn generate_page_urls_matches_probe() {
    let catalog = FakeCatalog::new().route(PLANETS_EP, page(61, (0..10).map(|i| planet(&format!("p{}", i), 0)).collect()));
    let urls = generate_page_urls(&catalog, PLANETS_EP).await.unwrap();
    assert_eq!(urls.len(), 7);
    assert_eq!(urls[0], format!("{}?page=1", PLANETS_EP));
    assert_eq!(urls[6], format!("{}?page=7", PLANETS_EP));
}

/// A probe without `count` is a shape error.
#[tokio::test]
async fn count_pages_missing_count_is_shape_error() {
    let catalog = FakeCatalog::new().route(PLANETS_EP, json!({ "results": [planet("Hoth", 0)] }));
    let err = count_pages(&catalog, PLANETS_EP).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<EtlError>(),
        Some(&EtlError::MissingField { field: "count".to_string() })
    );
}

#[tokio::test]
async fn count_pages_empty_results_is_error() {
    let catalog = FakeCatalog::new().route(PLANETS_EP, page(5, vec![]));
    let err = count_pages(&catalog, PLANETS_EP).await.unwrap_err();
    assert_eq!(err.downcast_ref::<EtlError>(), Some(&EtlError::EmptyFirstPage));
    assert!(format!("{:#}", err).contains(PLANETS_EP), "{:#}", err);
}

/// Transport failure on the probe propagates.
#[tokio::test]
async fn count_pages_unreachable_endpoint_fails() {
    let catalog = FakeCatalog::new();
    assert!(count_pages(&catalog, PLANETS_EP).await.is_err());
}

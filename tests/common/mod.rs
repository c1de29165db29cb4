#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use swapi_etl::JsonSource;

pub const ROOT: &str = "http://catalog.test/api/";
pub const PLANETS_EP: &str = "http://catalog.test/api/planets";
pub const PEOPLE_EP: &str = "http://catalog.test/api/people";

struct Route {
    body: Option<Value>, // None = transport failure
    delay: Duration,
}

/// In-memory `JsonSource`: URL -> body, with an optional artificial delay per URL so
/// completion order can differ from request order. Counts every request it serves.
#[derive(Default)]
pub struct FakeCatalog {
    routes: Mutex<HashMap<String, Route>>,
    hits: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, url: &str, body: Value) -> Self {
        self.route_delayed(url, body, Duration::ZERO)
    }

    pub fn route_delayed(self, url: &str, body: Value, delay: Duration) -> Self {
        self.routes.lock().unwrap().insert(url.to_string(), Route { body: Some(body), delay });
        self
    }

    /// Requests to `url` fail after `delay`, like a dropped connection.
    pub fn failing(self, url: &str, delay: Duration) -> Self {
        self.routes.lock().unwrap().insert(url.to_string(), Route { body: None, delay });
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JsonSource for FakeCatalog {
    async fn get_json(&self, url: &str) -> Result<Value> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let (body, delay) = {
            let routes = self.routes.lock().unwrap();
            match routes.get(url) {
                Some(r) => (r.body.clone(), r.delay),
                None => (None, Duration::ZERO),
            }
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        *self.hits.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        body.ok_or_else(|| anyhow!("connection refused: {}", url))
    }
}

/// A collection page in the catalog's shape.
pub fn page(count: u64, results: Vec<Value>) -> Value {
    json!({ "count": count, "next": null, "previous": null, "results": results })
}

pub fn planet(name: &str, residents: usize) -> Value {
    let residents: Vec<String> = (0..residents).map(|i| format!("{}people/{}/", ROOT, i + 1)).collect();
    json!({ "name": name, "residents": residents, "climate": "arid" })
}

pub fn person(name: &str, homeworld: &str) -> Value {
    json!({ "name": name, "homeworld": homeworld })
}

pub fn page_url(endpoint: &str, n: usize) -> String {
    format!("{}?page={}", endpoint, n)
}

/// Two planet pages: Tatooine (2 residents) then Alderaan (none), count=4 page size 2
/// as seen by the probe.
pub fn planets_two_pages() -> FakeCatalog {
    let p1 = page(4, vec![planet("Tatooine", 2), planet("Yavin IV", 0)]);
    let p2 = page(4, vec![planet("Alderaan", 0), planet("Hoth", 1)]);
    FakeCatalog::new()
        .route(PLANETS_EP, p1.clone())
        .route_delayed(&page_url(PLANETS_EP, 1), p1, Duration::from_millis(40))
        .route(&page_url(PLANETS_EP, 2), p2)
}

/// Three people on one page: two from planets/1, one from planets/2, plus the two
/// planet resources.
pub fn people_catalog() -> FakeCatalog {
    let hw1 = format!("{}planets/1/", ROOT);
    let hw2 = format!("{}planets/2/", ROOT);
    let p1 = page(3, vec![person("Luke", &hw1), person("Leia", &hw2), person("Owen", &hw1)]);
    FakeCatalog::new()
        .route(PEOPLE_EP, p1.clone())
        .route(&page_url(PEOPLE_EP, 1), p1)
        .route_delayed(&hw1, json!({ "name": "Tatooine" }), Duration::from_millis(30))
        .route(&hw2, json!({ "name": "Alderaan" }))
}

/// Read a text file line-by-line into strings.
pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root of the public catalog API. Collections hang directly off it.
pub const API_ROOT: &str = "https://swapi.dev/api/";
pub const PLANETS: &str = "planets";
pub const PEOPLE: &str = "people";

pub const OUTPUT_ROOT: &str = "./output";
pub const PLANETS_CSV: &str = "planets.csv";
pub const PEOPLE_CSV: &str = "people.csv";

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct EtlOptions {
    pub api_root: String,              // always ends with '/'
    pub output_dir: PathBuf,
    pub concurrency: Option<usize>,    // None = every page request in flight at once
    pub timeout: Option<Duration>,     // None = requests may hang indefinitely
    pub progress: bool,                // show progress bars
    pub user_agent: String,
}

impl Default for EtlOptions {
    fn default() -> Self {
        Self {
            api_root: API_ROOT.to_string(),
            output_dir: PathBuf::from(OUTPUT_ROOT),
            concurrency: None,
            timeout: None,
            progress: true,
            user_agent: format!("swapi-etl/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl EtlOptions {
    pub fn with_api_root(mut self, root: impl AsRef<str>) -> Self {
        let mut s = root.as_ref().trim().to_string();
        if !s.ends_with('/') {
            s.push('/');
        }
        self.api_root = s;
        self
    }
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }
    /// Cap the number of requests in flight. Without a cap, a collection with N pages
    /// issues N requests at once.
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = Some(n.max(1));
        self
    }
    pub fn with_unbounded_concurrency(mut self) -> Self {
        self.concurrency = None;
        self
    }
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Collection endpoint, e.g. `https://swapi.dev/api/planets`.
    pub fn endpoint(&self, collection: &str) -> String {
        format!("{}{}", self.api_root, collection.trim_matches('/'))
    }

    /// Defaults overlaid with environment overrides:
    /// - SWAPI_API_ROOT: base URL of the catalog
    /// - SWAPI_OUTPUT_DIR: directory receiving the CSV files
    /// - SWAPI_CONCURRENCY: positive cap on in-flight requests
    /// - SWAPI_TIMEOUT_SECS: per-request timeout in seconds
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with a pluggable lookup (lets callers and tests supply values).
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup("SWAPI_API_ROOT").filter(|s| !s.trim().is_empty()) {
            self = self.with_api_root(root);
        }
        if let Some(dir) = lookup("SWAPI_OUTPUT_DIR").filter(|s| !s.trim().is_empty()) {
            self = self.with_output_dir(dir.trim());
        }
        if let Some(raw) = lookup("SWAPI_CONCURRENCY") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self = self.with_concurrency(n),
                _ => tracing::warn!("SWAPI_CONCURRENCY must be a positive integer, ignoring {:?}", raw),
            }
        }
        if let Some(raw) = lookup("SWAPI_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self = self.with_timeout(Duration::from_secs(secs)),
                _ => tracing::warn!("SWAPI_TIMEOUT_SECS must be a positive integer, ignoring {:?}", raw),
            }
        }
        self
    }
}

mod config;
mod errors;
mod util;
mod progress;

mod source;
mod json_utils;
mod pagination;
mod fetch;
mod extract;
mod aggregate;
mod export;
mod pipeline;

pub use crate::config::{EtlOptions, API_ROOT, OUTPUT_ROOT, PEOPLE, PEOPLE_CSV, PLANETS, PLANETS_CSV};
pub use crate::errors::EtlError;
pub use crate::pipeline::{HomeworldCount, RunSummary, SwapiETL};

// Expose multiprogress so binaries can group bars.
pub use crate::progress::set_global_multiprogress;
pub use crate::util::init_tracing_once;

// Transport seam: plug in any JSON source (HTTP by default).
pub use crate::source::{HttpSource, JsonSource};

// Pipeline stages, usable on their own.
pub use crate::pagination::{count_pages, generate_page_urls, page_count, page_urls, PAGINATION_QUERY};
pub use crate::fetch::Fetcher;
pub use crate::extract::{homeworld_histogram, planet_records, resource_name, PlanetRecord};
pub use crate::aggregate::{reduce, Aggregator, Histogram};
pub use crate::export::{write_counts, write_records, Columns};

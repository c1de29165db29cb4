use crate::aggregate::{reduce, Histogram};
use crate::config::{EtlOptions, PEOPLE, PEOPLE_CSV, PLANETS, PLANETS_CSV};
use crate::export::{write_counts, write_records};
use crate::extract::{homeworld_histogram, planet_records, resource_name, PlanetRecord};
use crate::fetch::Fetcher;
use crate::pagination::generate_page_urls;
use crate::source::{HttpSource, JsonSource};
use crate::util::init_tracing_once;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct SwapiETL {
    pub(crate) opts: EtlOptions,
    source: Option<Arc<dyn JsonSource>>,
}

/// People per homeworld, with the homeworld URL resolved to the planet's name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworldCount {
    pub homeworld: String,
    pub count: u64,
}

/// What a full `run()` wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub planets_csv: PathBuf,
    pub planet_rows: usize,
    pub people_csv: PathBuf,
    pub people_rows: usize,
}

impl Default for SwapiETL {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapiETL {
    pub fn new() -> Self {
        Self { opts: EtlOptions::default(), source: None }
    }

    pub fn with_options(opts: EtlOptions) -> Self {
        Self { opts, source: None }
    }

    // -------- Builder methods --------
    pub fn api_root(mut self, root: impl AsRef<str>) -> Self { self.opts = self.opts.with_api_root(root); self }
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self { self.opts = self.opts.with_output_dir(dir); self }
    pub fn concurrency(mut self, n: usize) -> Self { self.opts = self.opts.with_concurrency(n); self }
    pub fn unbounded_concurrency(mut self) -> Self { self.opts = self.opts.with_unbounded_concurrency(); self }
    pub fn timeout(mut self, timeout: Duration) -> Self { self.opts = self.opts.with_timeout(timeout); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self { self.opts = self.opts.with_user_agent(ua); self }

    /// Replace the HTTP transport (e.g. with an in-memory catalog).
    pub fn source(mut self, source: Arc<dyn JsonSource>) -> Self { self.source = Some(source); self }

    pub fn options(&self) -> &EtlOptions { &self.opts }

    fn resolve_source(&self) -> Result<Arc<dyn JsonSource>> {
        match &self.source {
            Some(s) => Ok(s.clone()),
            None => Ok(Arc::new(HttpSource::new(&self.opts)?)),
        }
    }

    fn fetcher<'a>(&self, source: &'a dyn JsonSource, label: &str) -> Fetcher<'a, dyn JsonSource + 'a> {
        Fetcher::new(source)
            .limit(self.opts.concurrency)
            .progress(self.opts.progress.then(|| label.to_string()))
    }

    // -------- Planets --------

    /// Every planet with its resident count, in catalog order.
    pub async fn planets(&self) -> Result<Vec<PlanetRecord>> {
        let source = self.resolve_source()?;
        self.planets_with(source.as_ref()).await
    }

    async fn planets_with(&self, source: &dyn JsonSource) -> Result<Vec<PlanetRecord>> {
        let endpoint = self.opts.endpoint(PLANETS);
        let urls = generate_page_urls(source, &endpoint).await?;
        let pages = self.fetcher(source, "Fetch planets").fetch_all(&urls, planet_records).await?;
        let planets = reduce(pages);
        tracing::info!("planets: {} records from {} pages", planets.len(), urls.len());
        Ok(planets)
    }

    /// Write `name,count` rows to `out`. Returns the number of data rows.
    pub async fn planets_to_csv(&self, out: &Path) -> Result<usize> {
        let planets = self.planets().await?;
        let n = write_records(&planets, out)?;
        tracing::info!("wrote {} rows to {}", n, out.display());
        Ok(n)
    }

    // -------- People --------

    /// How many people name each homeworld URL.
    pub async fn homeworld_counts(&self) -> Result<Histogram> {
        let source = self.resolve_source()?;
        self.homeworld_counts_with(source.as_ref()).await
    }

    async fn homeworld_counts_with(&self, source: &dyn JsonSource) -> Result<Histogram> {
        let endpoint = self.opts.endpoint(PEOPLE);
        let urls = generate_page_urls(source, &endpoint).await?;
        let pages = self.fetcher(source, "Fetch people").fetch_all(&urls, homeworld_histogram).await?;
        let hist = reduce(pages);
        tracing::info!("people: {} records across {} homeworlds", hist.total(), hist.len());
        Ok(hist)
    }

    /// Homeworld counts with each homeworld URL re-fetched and replaced by its name.
    /// Rows follow the histogram's key order.
    pub async fn people_by_homeworld(&self) -> Result<Vec<HomeworldCount>> {
        let source = self.resolve_source()?;
        self.people_by_homeworld_with(source.as_ref()).await
    }

    async fn people_by_homeworld_with(&self, source: &dyn JsonSource) -> Result<Vec<HomeworldCount>> {
        let hist = self.homeworld_counts_with(source).await?;
        let keys: Vec<String> = hist.keys().map(str::to_string).collect();
        let names = self.fetcher(source, "Resolve homeworlds").fetch_all(&keys, resource_name).await?;

        let rows: Vec<HomeworldCount> = hist
            .iter()
            .zip(names)
            .map(|((_, count), homeworld)| HomeworldCount { homeworld, count })
            .collect();
        tracing::debug!("resolved {} homeworld names", rows.len());
        Ok(rows)
    }

    /// Write `homeworld,count` rows to `out`. Returns the number of data rows.
    pub async fn people_to_csv(&self, out: &Path) -> Result<usize> {
        let rows = self.people_by_homeworld().await?;
        write_people(&rows, out)
    }

    // -------- Whole job --------

    /// Both datasets into `output_dir`. Each file is written only after its dataset
    /// fully reduced; a failure in the people stage leaves `planets.csv` in place.
    pub async fn run(&self) -> Result<RunSummary> {
        init_tracing_once();
        let source = self.resolve_source()?;

        let planets_csv = self.opts.output_dir.join(PLANETS_CSV);
        let planets = self.planets_with(source.as_ref()).await?;
        let planet_rows = write_records(&planets, &planets_csv)?;
        tracing::info!("wrote {} rows to {}", planet_rows, planets_csv.display());
        tracing::debug!("planets: {:?}", planets);

        let people_csv = self.opts.output_dir.join(PEOPLE_CSV);
        let people = self.people_by_homeworld_with(source.as_ref()).await?;
        let people_rows = write_people(&people, &people_csv)?;

        Ok(RunSummary { planets_csv, planet_rows, people_csv, people_rows })
    }
}

fn write_people(rows: &[HomeworldCount], out: &Path) -> Result<usize> {
    let n = write_counts(rows.iter().map(|r| (r.homeworld.as_str(), r.count)), "homeworld", out)?;
    tracing::info!("wrote {} rows to {}", n, out.display());
    Ok(n)
}

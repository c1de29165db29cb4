//! Fan-out/fan-in over a list of URLs: one future per URL, optional cap on how many
//! are in flight, results slotted back in input order.

use crate::progress::make_count_progress;
use crate::source::JsonSource;
use indicatif::ProgressBar;
use anyhow::{Context, Result};
use futures::future::try_join_all;
use serde_json::Value;
use tokio::sync::Semaphore;

pub struct Fetcher<'a, S: JsonSource + ?Sized> {
    source: &'a S,
    limit: Option<usize>,
    progress: Option<String>,
}

impl<'a, S: JsonSource + ?Sized> Fetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source, limit: None, progress: None }
    }

    /// At most `n` requests in flight. `None` schedules every URL immediately.
    pub fn limit(mut self, n: Option<usize>) -> Self {
        self.limit = n.map(|n| n.max(1));
        self
    }

    /// Show a count progress bar with this label while fetching.
    pub fn progress(mut self, label: Option<String>) -> Self {
        self.progress = label;
        self
    }

    /// GET every URL concurrently and run `extractor` on each decoded body as it arrives.
    ///
    /// All futures are polled by the calling task, so a slow extractor stalls the rest.
    /// The first failure to complete is returned immediately; requests still in flight
    /// are dropped along with the partial results.
    pub async fn fetch_all<T, F>(&self, urls: &[String], extractor: F) -> Result<Vec<T>>
    where
        F: Fn(&Value) -> Result<T>,
    {
        let semaphore = self.limit.map(Semaphore::new);
        let pb = self.progress.as_deref().map(|label| make_count_progress(urls.len() as u64, label));

        tracing::debug!(
            "fetching {} urls (in flight: {})",
            urls.len(),
            self.limit.map(|n| n.to_string()).unwrap_or_else(|| "unbounded".to_string())
        );

        let futures = urls
            .iter()
            .map(|url| self.fetch_one(url, semaphore.as_ref(), pb.as_ref(), &extractor));
        let results = try_join_all(futures).await;

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        results
    }

    async fn fetch_one<T, F>(
        &self,
        url: &str,
        semaphore: Option<&Semaphore>,
        pb: Option<&ProgressBar>,
        extractor: &F,
    ) -> Result<T>
    where
        F: Fn(&Value) -> Result<T>,
    {
        let _permit = match semaphore {
            Some(s) => Some(s.acquire().await.context("fetch semaphore closed")?),
            None => None,
        };
        let body = self.source.get_json(url).await?;
        if let Some(pb) = pb {
            pb.inc(1);
        }
        extractor(&body).with_context(|| format!("extracting {}", url))
    }
}

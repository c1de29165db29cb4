//! Reducers over per-page aggregates.
//! Implement `Aggregator` for a page-local shape and call `reduce` on the pages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub trait Aggregator: Default {
    fn merge(&mut self, other: Self);
}

/// Lists concatenate: page order, then within-page order.
impl<T> Aggregator for Vec<T> {
    fn merge(&mut self, other: Self) {
        self.extend(other);
    }
}

/// Fold per-page parts left to right into one aggregate.
pub fn reduce<A: Aggregator>(parts: impl IntoIterator<Item = A>) -> A {
    parts.into_iter().fold(A::default(), |mut total, part| {
        total.merge(part);
        total
    })
}

/// Key -> occurrence count. Merging sums counts, so the result does not depend on
/// merge order. Iteration is in key order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    counts: BTreeMap<String, u64>,
}

impl Histogram {
    pub fn add(&mut self, key: impl Into<String>) {
        self.add_n(key, 1);
    }

    pub fn add_n(&mut self, key: impl Into<String>, n: u64) {
        *self.counts.entry(key.into()).or_insert(0) += n;
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Aggregator for Histogram {
    fn merge(&mut self, other: Self) {
        for (k, v) in other.counts {
            *self.counts.entry(k).or_insert(0) += v;
        }
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Histogram {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut h = Histogram::default();
        for (k, n) in iter {
            h.add_n(k, n);
        }
        h
    }
}

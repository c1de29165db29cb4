use crate::aggregate::Histogram;
use crate::export::Columns;
use crate::json_utils::{array_field, page_results, str_field};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One planet row: its name and how many residents the catalog lists for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub name: String,
    pub count: u64,
}

impl PlanetRecord {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self { name: name.into(), count }
    }
}

impl Columns for PlanetRecord {
    fn columns() -> &'static [&'static str] {
        &["name", "count"]
    }
}

/// `name` and resident count for every result on a planets page.
pub fn planet_records(page: &Value) -> Result<Vec<PlanetRecord>> {
    page_results(page)?
        .iter()
        .enumerate()
        .map(|(i, res)| -> Result<PlanetRecord> {
            let name = str_field(res, "name").with_context(|| format!("results[{}]", i))?;
            let residents = array_field(res, "residents").with_context(|| format!("results[{}]", i))?;
            Ok(PlanetRecord::new(name, residents.len() as u64))
        })
        .collect()
}

/// Occurrences of each `homeworld` URL on a people page.
pub fn homeworld_histogram(page: &Value) -> Result<Histogram> {
    let mut hist = Histogram::default();
    for (i, res) in page_results(page)?.iter().enumerate() {
        let homeworld = str_field(res, "homeworld").with_context(|| format!("results[{}]", i))?;
        hist.add(homeworld);
    }
    Ok(hist)
}

/// `name` of a single (non-collection) resource.
pub fn resource_name(resource: &Value) -> Result<String> {
    Ok(str_field(resource, "name")?.to_string())
}

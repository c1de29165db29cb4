//! CSV exporters for reduced aggregates. Both truncate the target in place; a crash
//! mid-write leaves a partial file.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Column names of a record type, in field order. Written as the header even when
/// there are no rows.
pub trait Columns {
    fn columns() -> &'static [&'static str];
}

/// One row per record under a header of the record's field names.
pub fn write_records<T: Serialize + Columns>(records: &[T], path: &Path) -> Result<usize> {
    ensure_parent(path)?;
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    w.write_record(T::columns()).with_context(|| format!("writing {}", path.display()))?;
    for rec in records {
        w.serialize(rec).with_context(|| format!("writing {}", path.display()))?;
    }
    w.flush().with_context(|| format!("flushing {}", path.display()))?;
    Ok(records.len())
}

/// One row per key: `index_header` labels the key column, `count` the value column.
pub fn write_counts<'a, I>(rows: I, index_header: &str, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    ensure_parent(path)?;
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    w.write_record([index_header, "count"]).with_context(|| format!("writing {}", path.display()))?;
    let mut n = 0usize;
    for (key, count) in rows {
        w.write_record([key, count.to_string().as_str()]).with_context(|| format!("writing {}", path.display()))?;
        n += 1;
    }
    w.flush().with_context(|| format!("flushing {}", path.display()))?;
    Ok(n)
}

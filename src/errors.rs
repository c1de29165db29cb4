use thiserror::Error;

/// Failures that come from the shape of the data rather than the transport.
/// They travel inside `anyhow::Error`; use `downcast_ref::<EtlError>()` to inspect.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EtlError {
    #[error("missing field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` is not {expected}")]
    WrongType { field: String, expected: &'static str },

    #[error("first page has no results; cannot derive a page size")]
    EmptyFirstPage,

    #[error("record count {count} does not fit in memory on this platform")]
    CountOverflow { count: u64 },

    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl EtlError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingField { field: field.to_string() }
    }

    pub(crate) fn wrong_type(field: &str, expected: &'static str) -> Self {
        Self::WrongType { field: field.to_string(), expected }
    }
}

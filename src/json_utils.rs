use crate::errors::EtlError;
use serde_json::Value;

/// Look up a required field on a JSON object.
pub fn field<'a>(v: &'a Value, name: &str) -> Result<&'a Value, EtlError> {
    v.get(name).ok_or_else(|| EtlError::missing(name))
}

/// Required string field.
pub fn str_field<'a>(v: &'a Value, name: &str) -> Result<&'a str, EtlError> {
    field(v, name)?.as_str().ok_or_else(|| EtlError::wrong_type(name, "a string"))
}

/// Required array field.
pub fn array_field<'a>(v: &'a Value, name: &str) -> Result<&'a Vec<Value>, EtlError> {
    field(v, name)?.as_array().ok_or_else(|| EtlError::wrong_type(name, "an array"))
}

/// Required non-negative integer field.
pub fn u64_field(v: &Value, name: &str) -> Result<u64, EtlError> {
    field(v, name)?.as_u64().ok_or_else(|| EtlError::wrong_type(name, "a non-negative integer"))
}

/// The `results` array of a collection page.
pub fn page_results(page: &Value) -> Result<&Vec<Value>, EtlError> {
    array_field(page, "results")
}

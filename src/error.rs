//! Errors of the caller-side layer (reading, parsing and selecting input).
//!
//! The generation core itself is total and never returns these.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON root must be an object, found {found}")]
    RootNotObject { found: &'static str },

    #[error("invalid config ({path}): {message}")]
    Config { path: String, message: String },

    #[error("JSON pointer {pointer:?} did not select anything")]
    JsonPointer { pointer: String },

    #[error("jq filter failed: {0}")]
    Jq(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Caller-side precondition: generation only makes sense for object roots.
pub fn ensure_object(v: &Value) -> Result<()> {
    match v {
        Value::Object(_) => Ok(()),
        other => Err(Error::RootNotObject { found: kind_name(other) }),
    }
}

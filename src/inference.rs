//! Single-sample type inference.
//!
//! Maps one JSON value onto the closed `Ty` vocabulary. Unlike a streaming
//! LUB engine there is no joining: arrays look at their first element only,
//! and anything outside the fixed set is `Untyped`.
pub mod str;

use serde_json::Value;

use crate::ir::{Primitive, Ty};

// ------------------------------ Observe ---------------------------------- //

pub fn infer_type(v: &Value) -> Ty {
    match v {
        Value::String(s) if str::is_date_string(s) => Ty::Primitive(Primitive::DateString),
        Value::String(_) => Ty::Primitive(Primitive::String),
        Value::Number(_) => Ty::Primitive(Primitive::Number),
        Value::Bool(_) => Ty::Primitive(Primitive::Boolean),
        Value::Object(_) => Ty::Object,
        // heterogeneous arrays silently take the first element's type
        Value::Array(xs) => match xs.first() {
            Some(first) => Ty::array_of(infer_type(first)),
            None => Ty::array_of(Ty::Untyped),
        },
        Value::Null => Ty::Untyped,
    }
}

/// First element of the innermost array, following `[0]` while it is an array.
pub fn innermost_first(v: &Value) -> Option<&Value> {
    match v {
        Value::Array(xs) => match xs.first()? {
            inner @ Value::Array(_) => innermost_first(inner),
            first => Some(first),
        },
        _ => None,
    }
}

// ------------------------------- Tests ------------------------------------ //

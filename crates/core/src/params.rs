//! Lenient extraction of generator hyperparameters from a JSON params object.
//!
//! A params object is user input: keys may be absent, misspelt, or carry
//! the wrong JSON type. [`param`] never fails. Anything it cannot read as
//! the requested type yields the caller's default, and range checks are left
//! to each generator's `validate()`.

use serde_json::Value;

/// A type that can be read out of a single JSON value.
pub trait ParamValue: Sized {
    /// Converts `value`, or returns `None` if it has the wrong shape.
    fn read(value: &Value) -> Option<Self>;
}

impl ParamValue for f64 {
    /// Any JSON number, integers included.
    fn read(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl ParamValue for usize {
    /// Non-negative integers only; `2.0` and `-1` are rejected.
    fn read(value: &Value) -> Option<Self> {
        value.as_u64().and_then(|v| usize::try_from(v).ok())
    }
}

impl ParamValue for i32 {
    /// Signed integers inside the `i32` range.
    fn read(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|v| i32::try_from(v).ok())
    }
}

impl ParamValue for String {
    fn read(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

/// Reads `params[key]` as `T`, or returns `default`.
///
/// `params` need not be an object; a non-object simply has no keys.
pub fn param<T: ParamValue>(params: &Value, key: &str, default: T) -> T {
    params.get(key).and_then(T::read).unwrap_or(default)
}

//! JSON flattening: every string value, depth-first, one per line.

use serde_json::Value;
use verifaq_core::{Error, Result};

/// Parse `raw` and join every string value with newlines.
///
/// Object members are visited in source order (the workspace enables
/// `serde_json/preserve_order`); arrays and objects are walked the same way.
pub fn flatten_strings(raw: &str) -> Result<String> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| Error::Decode(format!("Invalid JSON: {}", e)))?;
    let mut out = Vec::new();
    collect_strings(&value, &mut out);
    Ok(out.join("\n"))
}

fn collect_strings<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Array(items) => items.iter().for_each(|v| collect_strings(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_strings(v, out)),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

use crate::core::errors::OstError;
use serde_json::{Deserializer, Map, Value};
use tracing::trace;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse the first JSON value in `raw`, tolerating a byte-order mark,
/// surrounding whitespace and trailing garbage after the value.
pub fn parse_lenient(endpoint: &str, raw: &str) -> Result<Value, OstError> {
    let text = raw.trim_start_matches(BYTE_ORDER_MARK).trim();

    Deserializer::from_str(text)
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| OstError::malformed(endpoint, "JSON envelope", "empty response body", raw))?
        .map_err(|e| OstError::malformed(endpoint, "JSON envelope", e.to_string(), raw))
}

/// Validate the `{success, data}` envelope and return the `data` object
///
/// A missing, null or false `success` flag is a backend failure and carries
/// the whole parsed body. A `success` of any other JSON type, or a
/// successful envelope without an object `data`, is malformed. `raw` is the
/// response text kept on malformed errors.
pub fn open_envelope(
    endpoint: &str,
    raw: &str,
    envelope: Value,
) -> Result<Map<String, Value>, OstError> {
    match envelope.get("success") {
        Some(Value::Bool(true)) => {}
        None | Some(Value::Null | Value::Bool(false)) => {
            return Err(OstError::Backend {
                endpoint: endpoint.to_string(),
                body: envelope,
            });
        }
        Some(other) => {
            return Err(OstError::malformed(
                endpoint,
                "success flag",
                format!("`success` is {}", json_kind(other)),
                raw,
            ));
        }
    }

    match envelope {
        Value::Object(mut top) => match top.remove("data") {
            Some(Value::Object(data)) => Ok(data),
            Some(other) => Err(OstError::malformed(
                endpoint,
                "data object",
                format!("`data` is {}", json_kind(&other)),
                raw,
            )),
            None => Err(OstError::malformed(
                endpoint,
                "data object",
                "`data` missing",
                raw,
            )),
        },
        _ => Err(OstError::malformed(
            endpoint,
            "data object",
            "envelope is not an object",
            raw,
        )),
    }
}

/// Move the named entity fragment out of `data`
pub fn take_entity(
    endpoint: &str,
    raw: &str,
    data: &mut Map<String, Value>,
    entity_key: &str,
) -> Result<Value, OstError> {
    match data.remove(entity_key) {
        Some(Value::Null) | None => Err(OstError::malformed(
            endpoint,
            entity_key,
            format!("`data.{}` missing", entity_key),
            raw,
        )),
        Some(fragment) => Ok(fragment),
    }
}

/// Full response pipeline: lenient parse, envelope check, entity lookup
pub fn parse_response(endpoint: &str, raw: &str, entity_key: &str) -> Result<Value, OstError> {
    trace!(endpoint = %endpoint, "Response body: {}", raw);
    let envelope = parse_lenient(endpoint, raw)?;
    let mut data = open_envelope(endpoint, raw, envelope)?;
    take_entity(endpoint, raw, &mut data, entity_key)
}

pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

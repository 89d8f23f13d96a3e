//! Field Extractor — best-effort extraction from generic monitoring-tool
//! webhooks (Splunk-style `result`/`results` wrappers and friends).
//!
//! Used only when the collector schema did not match. Lookups run against a
//! located "result" sub-object first and the top-level payload second, with
//! ordered fallback key lists per field.

use chrono::Utc;
use serde_json::{Map, Value};

use crate::Alert;

/// The body was neither a JSON object nor a `payload=<json>` form.
#[derive(Debug, thiserror::Error)]
#[error("invalid payload: expected JSON body or payload=<json>")]
pub struct InvalidPayload;

// ---------------------------------------------------------------------------
// Payload decoding
// ---------------------------------------------------------------------------

/// Decode a request body into a JSON object.
///
/// Tries the body as a plain JSON object first, then as a urlencoded form
/// whose `payload` field contains JSON (a shape some monitoring tools use).
/// Returns the parsed object together with the exact bytes that parsed, for
/// verbatim storage.
pub fn decode_payload(raw: &[u8]) -> Result<(Map<String, Value>, Vec<u8>), InvalidPayload> {
    if !raw.is_empty() {
        if let Ok(payload) = serde_json::from_slice::<Map<String, Value>>(raw) {
            return Ok((payload, raw.to_vec()));
        }
    }

    if let Some((_, value)) = form_urlencoded::parse(raw).find(|(key, _)| key == "payload") {
        if !value.is_empty() {
            if let Ok(payload) = serde_json::from_slice::<Map<String, Value>>(value.as_bytes()) {
                let raw_json = value.into_owned().into_bytes();
                return Ok((payload, raw_json));
            }
        }
    }

    Err(InvalidPayload)
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Build a normalized [`Alert`] from a generic payload.
///
/// `raw_json` is the byte form the payload was decoded from; it is stored
/// verbatim in the record. Severity and collector fields are left unset.
pub fn extract_alert(payload: &Map<String, Value>, raw_json: &[u8]) -> Alert {
    let result = locate_result(payload);

    let host = pick_string(&result, &["host", "hostname", "computer"]);
    let source = pick_string(&result, &["source"]);

    const IP_KEYS: &[&str] = &["src", "src_ip", "source_ip", "srcip", "clientip", "ip"];
    let mut src_ip = pick_string(&result, IP_KEYS);
    if src_ip.is_empty() {
        src_ip = pick_string(payload, IP_KEYS);
    }

    const SEARCH_KEYS: &[&str] = &["search_name", "search", "savedsearch_name"];
    let mut alert_type = pick_string(&result, &["alert_type", "type", "signature"]);
    if alert_type.is_empty() {
        alert_type = pick_string(payload, SEARCH_KEYS);
    }
    if alert_type.is_empty() {
        alert_type = pick_string(&result, &["sourcetype"]);
    }

    let search_name = pick_string(payload, SEARCH_KEYS);

    Alert {
        received_at: Utc::now(),
        host,
        source,
        src_ip,
        search_name,
        alert_type,
        raw: Alert::raw_payload(raw_json),
        ..Alert::default()
    }
}

/// Locate the "result" sub-object of a payload: a direct object-valued
/// `result` key, else the first element of a `results` array when that
/// element is an object, else empty.
pub fn locate_result(payload: &Map<String, Value>) -> Map<String, Value> {
    if let Some(Value::Object(result)) = payload.get("result") {
        return result.clone();
    }
    if let Some(Value::Array(results)) = payload.get("results") {
        if let Some(Value::Object(first)) = results.first() {
            return first.clone();
        }
    }
    Map::new()
}

/// Return the first non-empty stringification among the candidate keys.
///
/// Each candidate is looked up verbatim first, then by a case-insensitive
/// rescan of the source keys. Values that stringify to empty (booleans,
/// arrays, objects, null) are treated as "not found" and the chain moves on.
pub fn pick_string(src: &Map<String, Value>, keys: &[&str]) -> String {
    for key in keys {
        if let Some(value) = src.get(*key) {
            let s = stringify(value);
            if !s.is_empty() {
                return s;
            }
        }
        // Tolerate senders that vary the casing.
        for (src_key, value) in src {
            if src_key.eq_ignore_ascii_case(key) {
                let s = stringify(value);
                if !s.is_empty() {
                    return s;
                }
            }
        }
    }
    String::new()
}

/// Strings pass through; numbers render in shortest round-trippable decimal
/// form, integer-valued floats without the trailing `.0`; everything else
/// stringifies to empty.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            // The bound keeps `{:.0}` within f64's exact integer range.
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Collector Recognizer — decodes the fixed-field payload emitted by the
//! audit-log collector and derives severity and a human-readable title.
//!
//! Decode success alone is not classification: a payload counts as a
//! collector alert only when its `alert` tag is non-empty after trimming.
//! Anything else is handed back to the generic pipeline.

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Payload shape
// ---------------------------------------------------------------------------

/// The JSON payload sent by the audit collector.
///
/// Every field is a free-form string; upstream producers encode numeric
/// fields (`pid`, `uid`, …) as either numbers or strings, so deserialization
/// accepts both. Missing fields default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CollectorPayload {
    #[serde(deserialize_with = "stringish")]
    pub alert: String,
    #[serde(deserialize_with = "stringish")]
    pub host: String,
    #[serde(deserialize_with = "stringish")]
    pub exe: String,
    #[serde(deserialize_with = "stringish")]
    pub comm: String,
    #[serde(deserialize_with = "stringish")]
    pub uid: String,
    #[serde(deserialize_with = "stringish")]
    pub euid: String,
    #[serde(deserialize_with = "stringish")]
    pub auid: String,
    #[serde(deserialize_with = "stringish")]
    pub pid: String,
    #[serde(deserialize_with = "stringish")]
    pub ppid: String,
    #[serde(deserialize_with = "stringish")]
    pub tty: String,
    #[serde(deserialize_with = "stringish")]
    pub key: String,
    #[serde(deserialize_with = "stringish")]
    pub audit: String,
    #[serde(deserialize_with = "stringish")]
    pub text: String,
    /// The original audit-log line, JSON-string-escaped by the sender.
    #[serde(deserialize_with = "stringish")]
    pub raw: String,
}

/// Accept a JSON string, number, or null as a `String`.
fn stringish<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct Stringish;

    impl serde::de::Visitor<'_> for Stringish {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a string, number, or null")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(Stringish)
}

// ---------------------------------------------------------------------------
// Recognition
// ---------------------------------------------------------------------------

/// Attempt to decode `raw` as a collector payload.
///
/// Returns `Ok(Some(_))` when the payload decoded and carries a non-empty
/// `alert` tag, `Ok(None)` when it decoded but the tag is empty (the normal
/// "try the other schema" signal), and `Err(_)` on a genuine decode failure.
pub fn recognize(raw: &[u8]) -> Result<Option<CollectorPayload>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_slice(raw)?;
    if !value.is_object() {
        // Derived structs also decode positionally from arrays; reject those.
        return Err(serde::de::Error::custom("collector payload must be a JSON object"));
    }
    let payload: CollectorPayload = serde_json::from_value(value)?;
    if payload.alert.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(payload))
}

// ---------------------------------------------------------------------------
// Derived outputs
// ---------------------------------------------------------------------------

/// Classify severity from effective uid and executable path.
///
/// Priority order: root executing from a scratch directory is `HIGH`; an
/// executable under a standard system prefix is `LOW`; any other executable
/// is `MED`; no executable at all defaults to `LOW`.
pub fn classify_severity(payload: &CollectorPayload) -> crate::Severity {
    const SUSPECT: &[&str] = &["/tmp/", "/dev/shm/", "/var/tmp/"];
    const ALLOWED: &[&str] = &["/usr/bin/", "/bin/", "/usr/sbin/", "/sbin/"];

    let exe = payload.exe.trim();
    let euid = payload.euid.trim();

    if euid == "0" && SUSPECT.iter().any(|p| exe.starts_with(p)) {
        return crate::Severity::High;
    }
    if !exe.is_empty() {
        if ALLOWED.iter().any(|p| exe.starts_with(p)) {
            return crate::Severity::Low;
        }
        return crate::Severity::Med;
    }
    crate::Severity::Low
}

/// Build the one-line title: `<actor>[, acting as root], <verb> <exe>`.
///
/// The actor is taken from the quoted `AUID="…"` value inside the raw audit
/// line when present, since the kernel resolves it to a username there; the
/// structured `auid` field is usually the numeric id.
pub fn build_title(payload: &CollectorPayload) -> String {
    let mut actor = payload.auid.trim();
    if let Some(resolved) = extract_quoted_kv(&payload.raw, "AUID") {
        // An empty AUID="" in the raw line keeps the structured fallback.
        if !resolved.is_empty() {
            actor = resolved;
        }
    }
    if actor.is_empty() {
        actor = "unknown user";
    }

    let acting = if payload.euid.trim() == "0" {
        ", acting as root"
    } else {
        ""
    };

    let verb = if payload.raw.contains("success=yes") {
        "successfully executed"
    } else {
        "executed"
    };

    let mut exe = payload.exe.trim();
    if exe.is_empty() {
        exe = "(unknown exe)";
    }

    format!("{actor}{acting}, {verb} {exe}")
}

/// Scan `raw` for a `KEY="value"` token and return the quoted value.
///
/// A bounded substring scan: find the literal `KEY="`, take bytes up to the
/// next `"`. Returns `None` when the token or its closing quote is absent.
pub fn extract_quoted_kv<'a>(raw: &'a str, key: &str) -> Option<&'a str> {
    let raw = raw.trim();
    if raw.is_empty() || key.is_empty() {
        return None;
    }
    let pattern = format!("{key}=\"");
    let start = raw.find(&pattern)? + pattern.len();
    let end = raw[start..].find('"')?;
    Some(&raw[start..start + end])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Core types for lookout-core.
//!
//! This module defines the fundamental data structures shared across all
//! layers: the normalized [`Alert`] record, its [`Severity`], and the on-disk
//! [`Snapshot`] form.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// A normalized alert produced by the ingestion pipeline and stored in the
/// rolling history.
///
/// Every field is optional except `id` and `received_at`. The pipeline
/// populates as many fields as it can from the payload; the remainder stay
/// empty. An empty string means "absent" and is omitted from the JSON form
/// wherever the wire format allows it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    /// Store-assigned identifier. Unique and strictly increasing within one
    /// backing-file generation; never reused, even after eviction.
    pub id: u64,
    /// Ingest timestamp (UTC), set when the webhook arrived.
    pub received_at: chrono::DateTime<chrono::Utc>,
    /// Human-readable one-liner, derived for collector alerts.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Originating host.
    pub host: String,
    /// Source of the event. For collector alerts this is the executable path.
    pub source: String,
    /// Source IP, extracted from the payload or filled from the client socket.
    pub src_ip: String,
    /// Saved-search name for monitoring-tool webhooks.
    pub search_name: String,
    /// Alert kind tag. `"unparsed"` marks a payload that matched no schema.
    pub alert_type: String,
    /// Derived severity. Present only for collector-recognized alerts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    // Collector-specific fields, present only when the sender was the audit
    // collector. All free-form strings; upstream may stringify numerics.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub exe: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comm: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub euid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ppid: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tty: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub audit: String,
    /// Free-text description from the collector.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// The original audit-log line as reported by the collector.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub raw_ev: String,

    /// The original JSON payload, verbatim, for later inspection.
    pub raw: Option<Box<RawValue>>,
    /// The original request bytes. Populated only when parsing failed
    /// entirely; such a record always has `alert_type == "unparsed"`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub raw_text: String,
}

impl Alert {
    /// Wrap raw payload bytes for verbatim storage. Returns `None` when the
    /// bytes are not valid JSON text.
    pub fn raw_payload(bytes: &[u8]) -> Option<Box<RawValue>> {
        let text = std::str::from_utf8(bytes).ok()?;
        RawValue::from_string(text.to_owned()).ok()
    }
}

/// Alert severity, derived heuristically from effective uid and executable
/// path. Only collector-recognized alerts carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MED")]
    Med,
    #[serde(rename = "HIGH")]
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Med => write!(f, "MED"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}

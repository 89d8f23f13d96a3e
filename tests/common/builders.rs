//! Test builders — ergonomic constructors for `Alert` records, webhook
//! bodies, and temp-backed stores.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use lookout::{Alert, AlertStore, Severity};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// AlertBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Alert`] test fixtures.
///
/// # Example
///
/// ```rust
/// let alert = AlertBuilder::new()
///     .host("debian")
///     .alert_type("RED_EXEC")
///     .severity(Severity::High)
///     .build();
/// ```
pub struct AlertBuilder {
    alert: Alert,
}

impl AlertBuilder {
    pub fn new() -> Self {
        Self {
            alert: Alert {
                received_at: chrono::Utc::now(),
                ..Alert::default()
            },
        }
    }

    pub fn host(mut self, host: &str) -> Self {
        self.alert.host = host.to_string();
        self
    }

    pub fn alert_type(mut self, alert_type: &str) -> Self {
        self.alert.alert_type = alert_type.to_string();
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.alert.severity = Some(severity);
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.alert.text = text.to_string();
        self
    }

    pub fn exe(mut self, exe: &str) -> Self {
        self.alert.exe = exe.to_string();
        self
    }

    pub fn received_at(mut self, ts: chrono::DateTime<chrono::Utc>) -> Self {
        self.alert.received_at = ts;
        self
    }

    pub fn build(self) -> Alert {
        self.alert
    }
}

impl Default for AlertBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Webhook body builders
// ---------------------------------------------------------------------------

/// Build a collector-schema webhook body.
pub fn collector_body(alert: &str, exe: &str, euid: &str, auid: &str, raw: &str) -> String {
    serde_json::json!({
        "alert": alert,
        "host": "debian",
        "exe": exe,
        "comm": "x",
        "uid": "1000",
        "euid": euid,
        "auid": auid,
        "pid": "4242",
        "ppid": "1",
        "tty": "pts0",
        "key": "red_exec",
        "audit": "1700000000.123:456",
        "text": "",
        "raw": raw,
    })
    .to_string()
}

/// Build a generic monitoring-tool webhook body with a `result` wrapper.
pub fn generic_body(host: &str, src_ip: &str, search_name: &str) -> String {
    serde_json::json!({
        "result": { "host": host, "src_ip": src_ip },
        "search_name": search_name,
    })
    .to_string()
}

/// Wrap a JSON payload in the `payload=<json>` form encoding some
/// monitoring tools use.
pub fn form_body(payload_json: &str) -> String {
    let encoded: String = form_urlencoded_encode(payload_json);
    format!("payload={encoded}")
}

fn form_urlencoded_encode(value: &str) -> String {
    let mut out = String::new();
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Temp-backed stores
// ---------------------------------------------------------------------------

/// A store backed by a file inside a fresh temp directory. Keep the
/// `TempDir` alive for the duration of the test.
pub fn temp_store(capacity: usize) -> (TempDir, AlertStore) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = AlertStore::new(dir.path().join("alerts_history.json"), capacity);
    (dir, store)
}

//! Ingestion pipeline — the ordered-attempt parser chain behind `/webhook`.
//!
//! Classification is attempted in order: collector schema → generic JSON →
//! unparsed fallback. Every inbound payload produces exactly one stored
//! record; nothing is rejected for being malformed.

use chrono::Utc;
use serde_json::{Map, Value};

use lookout_core::collector::{self, CollectorPayload};
use lookout_core::extract;
use lookout_core::Alert;

/// The outcome of running a raw body through the parser chain.
#[derive(Debug)]
pub enum Classified {
    /// The fixed-field collector schema matched (non-empty `alert` tag).
    Collector(CollectorPayload),
    /// A generic JSON object, decoded from the body or a `payload=` form.
    Generic {
        payload: Map<String, Value>,
        raw_json: Vec<u8>,
    },
    /// Neither schema matched; the reason is reported back to the sender.
    Unparsed { error: String },
}

/// Run the parser chain over a raw request body.
///
/// A collector decode failure is not surfaced anywhere: it simply falls
/// through to the generic attempt, whose failure is the one worth
/// reporting.
pub fn classify(raw: &[u8]) -> Classified {
    if let Ok(Some(payload)) = collector::recognize(raw) {
        return Classified::Collector(payload);
    }
    match extract::decode_payload(raw) {
        Ok((payload, raw_json)) => Classified::Generic { payload, raw_json },
        Err(err) => Classified::Unparsed {
            error: err.to_string(),
        },
    }
}

/// Build the normalized record for a classified payload. `raw_body` is the
/// original request body, kept verbatim on collector and unparsed records.
pub fn build_alert(classified: Classified, raw_body: &[u8]) -> Alert {
    match classified {
        Classified::Collector(payload) => collector_alert(payload, raw_body),
        Classified::Generic { payload, raw_json } => extract::extract_alert(&payload, &raw_json),
        Classified::Unparsed { .. } => Alert {
            received_at: Utc::now(),
            alert_type: "unparsed".to_string(),
            raw_text: String::from_utf8_lossy(raw_body).into_owned(),
            ..Alert::default()
        },
    }
}

fn collector_alert(payload: CollectorPayload, raw_body: &[u8]) -> Alert {
    let severity = collector::classify_severity(&payload);
    let title = collector::build_title(&payload);
    Alert {
        received_at: Utc::now(),
        title,
        host: payload.host,
        alert_type: payload.alert,
        severity: Some(severity),
        source: payload.exe.clone(),
        exe: payload.exe,
        comm: payload.comm,
        uid: payload.uid,
        euid: payload.euid,
        auid: payload.auid,
        pid: payload.pid,
        ppid: payload.ppid,
        tty: payload.tty,
        key: payload.key,
        audit: payload.audit,
        text: payload.text,
        raw_ev: payload.raw,
        raw: Alert::raw_payload(raw_body),
        ..Alert::default()
    }
}

//! Static webhook corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of representative payloads as
//! they arrive on the wire.

/// Collector-schema payloads: fixed field set, non-empty `alert` tag.
pub const CORPUS_COLLECTOR: &[&str] = &[
    r#"{"alert":"RED_EXEC","host":"debian","exe":"/tmp/x","comm":"x","uid":"0","euid":"0","auid":"1000","pid":"4242","ppid":"1","tty":"pts0","key":"red_exec","audit":"1700000000.123:456","text":"root ran /tmp/x","raw":"type=SYSCALL arch=c000003e syscall=59 success=yes exit=0 AUID=\"nala\" UID=\"root\" EUID=\"root\""}"#,
    r#"{"alert":"RED_EXEC","host":"web01","exe":"/usr/bin/id","euid":"1000","auid":"1001","raw":"type=SYSCALL success=yes AUID=\"operator\""}"#,
    r#"{"alert":"SUSPICIOUS_EXEC","host":"db02","exe":"/opt/tools/scan","euid":"1000","auid":"4294967295","pid":918,"raw":"type=SYSCALL success=no"}"#,
];

/// Generic monitoring-tool payloads (`result`/`results` wrappers).
pub const CORPUS_GENERIC: &[&str] = &[
    r#"{"result":{"host":"h1","src_ip":"1.2.3.4"},"search_name":"S"}"#,
    r#"{"results":[{"hostname":"h2","sourcetype":"syslog"}],"search":"failed logins"}"#,
    r#"{"result":{"Computer":"WIN-DC01","ClientIP":"10.0.0.12","signature":"4625"}}"#,
    r#"{"search_name":"Brute force","result":{"source":"/var/log/auth.log"}}"#,
];

/// Payloads that match neither schema and must be stored unparsed.
pub const CORPUS_UNPARSED: &[&str] = &[
    "plainly not json",
    "<xml>nope</xml>",
    "{\"truncated\": ",
    "[1,2,3]",
];

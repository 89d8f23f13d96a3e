//! Classification pipeline benchmarks.
//!
//! Measures the parser chain over the three payload classes and the
//! heuristic field resolution on its own.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `classify` | Parser-chain throughput per payload class |
//! | `extract` | `pick_string` resolution over a wide result object |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench ingest_bench
//! open target/criterion/report/index.html
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use lookout_core::extract::pick_string;
use lookout_server::ingest::{build_alert, classify};

const COLLECTOR: &str = r#"{"alert":"RED_EXEC","host":"debian","exe":"/tmp/x","comm":"x","uid":"0","euid":"0","auid":"1000","pid":"4242","ppid":"1","tty":"pts0","key":"red_exec","audit":"1700000000.123:456","text":"root ran /tmp/x","raw":"type=SYSCALL arch=c000003e syscall=59 success=yes AUID=\"nala\""}"#;
const GENERIC: &str = r#"{"result":{"host":"h1","src_ip":"1.2.3.4","sourcetype":"syslog"},"search_name":"S"}"#;
const UNPARSED: &str = "th!s is n0t a payload at all, just noise on the wire";

// ---------------------------------------------------------------------------
// Parser chain
// ---------------------------------------------------------------------------

fn classify_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for (name, body) in [
        ("collector", COLLECTOR),
        ("generic", GENERIC),
        ("unparsed", UNPARSED),
    ] {
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::new("build_alert", name), &body, |b, body| {
            let bytes = body.as_bytes();
            b.iter(|| build_alert(classify(black_box(bytes)), bytes))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Field resolution
// ---------------------------------------------------------------------------

fn extract_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    // A wide result object where every candidate key misses verbatim and
    // only a case-insensitive rescan hits.
    let mut wide = serde_json::Map::new();
    for i in 0..64 {
        wide.insert(format!("field_{i}"), serde_json::Value::from(i));
    }
    wide.insert("HOSTNAME".to_string(), serde_json::Value::from("h1"));

    group.bench_function("pick_string_worst_case", |b| {
        b.iter(|| pick_string(black_box(&wide), &["host", "hostname", "computer"]))
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion registration
// ---------------------------------------------------------------------------

criterion_group!(ingest_benches, classify_bench, extract_bench);
criterion_main!(ingest_benches);

//! lookout — security alert webhook receiver and triage board.
//!
//! This crate re-exports the pipeline layers so that integration tests and
//! embedders can import them directly.
//!
//! # Architecture
//!
//! ```text
//! webhook ──► Recognizer / Extractor ──► Alert ──► AlertStore ──► disk
//!                                                     │
//!                              viewer ◄── query ◄─────┘
//! ```
//!
//! The HTTP layer lives in `lookout-server`; everything below it (payload
//! classification, the normalized record, the bounded history store, config)
//! lives in `lookout-core`.

pub use lookout_core::{collector, config, extract, store, types};
pub use lookout_core::{Alert, AlertStore, Severity};
pub use lookout_server::{ingest, router, serve};

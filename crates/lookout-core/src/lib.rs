//! lookout-core — security alert ingestion core.
//!
//! This crate holds everything below the HTTP boundary: the normalized
//! [`Alert`] record, the two payload decoders, and the bounded history store.
//!
//! # Architecture
//!
//! ```text
//! raw bytes ──► Collector Recognizer ──┐
//!         └──► Field Extractor ────────┼──► Alert ──► AlertStore ──► disk
//!         └──► (unparsed fallback) ────┘
//! ```
//!
//! An inbound payload is tried against the collector schema first, then the
//! generic webhook schema, and is stored as an unparsed record when both
//! fail. The store assigns identifiers, enforces the rolling capacity, and
//! owns the snapshot file.

pub mod collector;
pub mod config;
pub mod extract;
pub mod store;
pub mod types;

pub use store::AlertStore;
pub use types::{Alert, Severity};

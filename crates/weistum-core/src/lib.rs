//! # Weistum Core
//!
//! Shared, I/O-free logic for Weistum Katalog: the record model, time-period
//! classification, the immutable catalog snapshot, facet indexing, the query
//! engine, Markdown rendering, CSV export and map markers.
//!
//! This crate contains no tokio, filesystem access or configuration parsing.
//! Callers hand it parsed records and get back borrowed views.
//!
//! ```rust
//! use weistum_core::catalog::Catalog;
//! use weistum_core::models::Record;
//! use weistum_core::query::{Query, QueryLimits};
//! use weistum_core::zeit::ZeitBounds;
//!
//! let records: Vec<Record> = serde_json::from_str(
//!     r#"[{"id": "w1", "titel": "Weistum zu Ahrweiler", "zeit": "1475"}]"#,
//! )
//! .unwrap();
//! let catalog = Catalog::from_records(records, ZeitBounds::default()).unwrap();
//! assert_eq!(catalog.entries()[0].zeit_kategorie(), "Ende 15. Jh.");
//!
//! let hits = catalog
//!     .query(&Query::pattern("ahrweiler"), &QueryLimits::default())
//!     .unwrap();
//! assert_eq!(hits.len(), 1);
//! ```

pub mod catalog;
pub mod export;
pub mod facets;
pub mod map;
pub mod models;
pub mod query;
pub mod render;
pub mod zeit;

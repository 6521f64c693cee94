//! # Weistum-Katalog
//!
//! A searchable catalog of Weistümer: historical customary-law records
//! with place, region, type, date and a Markdown body.
//!
//! The dataset is a JSON array loaded once at startup. Every record gets a
//! derived time category (`"Ende 15. Jh."`), and the catalog can then be
//! searched by regular expression and narrowed by type, region and time
//! category. The filtered view is printed, exported as CSV, emitted as
//! GeoJSON markers, or rendered into a static HTML page with a map.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌──────────────────┐
//! │ data.json  │──▶│   Catalog    │──▶│  Query + Facets  │
//! │ file/stdin │   │ zeit derived │   │ regex + filters  │
//! └────────────┘   └──────────────┘   └────────┬─────────┘
//!                                              │
//!                 ┌──────────┬─────────────────┼──────────┐
//!                 ▼          ▼                 ▼          ▼
//!            ┌────────┐ ┌────────┐      ┌─────────┐ ┌──────────┐
//!            │  list  │ │  CSV   │      │ GeoJSON │ │ HTML page│
//!            └────────┘ └────────┘      └─────────┘ └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! wk search "zehnt" --region Mosel
//! wk facets
//! wk export --zeit "Ende 15. Jh." --output ende15.csv
//! wk page "vogt" --output vogt.html
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`dataset`] | Dataset sources and catalog loading |
//! | [`search`] | List view |
//! | [`get`] | Single-record view |
//! | [`facets`] | Facet listing |
//! | [`classify`] | Ad-hoc time classification |
//! | [`export`] | CSV export |
//! | [`map`] | GeoJSON markers |
//! | [`page`] | Static HTML page |
//! | [`output`] | Output destinations |
//!
//! The pure logic (models, classifier, query engine, rendering) lives in the
//! `weistum-core` crate.

pub mod classify;
pub mod config;
pub mod dataset;
pub mod export;
pub mod facets;
pub mod get;
pub mod logging;
pub mod map;
pub mod output;
pub mod page;
pub mod search;

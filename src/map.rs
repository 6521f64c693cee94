//! GeoJSON marker export (`wk map`).

use anyhow::Result;

use weistum_core::catalog::Entry;
use weistum_core::map::{feature_collection, markers};

use crate::output::Output;

/// CLI entry point. Returns the number of markers written.
pub fn run_map(entries: &[&Entry], output: &Output) -> Result<usize> {
    let markers = markers(entries.iter().copied());
    let geojson = serde_json::to_string_pretty(&feature_collection(&markers))?;
    output.write(format!("{}\n", geojson).as_bytes())?;

    let skipped = entries.len() - markers.len();
    tracing::info!(
        markers = markers.len(),
        skipped,
        output = %output.describe(),
        "map markers written"
    );
    Ok(markers.len())
}

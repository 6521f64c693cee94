//! Map markers for entries with coordinates.
//!
//! Markers are emitted as a GeoJSON `FeatureCollection`. Each feature's
//! `anchor` property points at the entry's element id in the list view so
//! a marker click can scroll the list to it.

use serde::Serialize;
use serde_json::{json, Value};

use crate::catalog::Entry;
use crate::models::PLACEHOLDER;

/// Initial map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    /// `[lat, lng]`
    pub center: [f64; 2],
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: [49.0, 9.5],
            zoom: 6,
        }
    }
}

/// One map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub titel: String,
    pub ort: String,
    pub zeit_kategorie: String,
    pub lat: f64,
    pub lng: f64,
}

impl Marker {
    pub fn anchor(&self) -> String {
        format!("#{}", self.id)
    }

    fn to_feature(&self) -> Value {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [self.lng, self.lat],
            },
            "properties": {
                "id": self.id,
                "titel": self.titel,
                "ort": self.ort,
                "zeit_kategorie": self.zeit_kategorie,
                "anchor": self.anchor(),
            },
        })
    }
}

/// Markers for every entry that has a position, in view order.
pub fn markers<'a, I>(entries: I) -> Vec<Marker>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            let record = entry.record();
            let (lat, lng) = record.position()?;
            Some(Marker {
                id: record.id.clone(),
                titel: record.titel_or_placeholder().to_string(),
                ort: record.ort.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
                zeit_kategorie: entry.zeit_kategorie().to_string(),
                lat,
                lng,
            })
        })
        .collect()
}

/// GeoJSON `FeatureCollection` of the markers.
pub fn feature_collection(markers: &[Marker]) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": markers.iter().map(Marker::to_feature).collect::<Vec<_>>(),
    })
}

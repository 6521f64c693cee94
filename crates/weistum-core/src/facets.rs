//! Facet value sets for the filter selectors.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Entry;

/// One selectable facet value and how many entries carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
}

/// Unique, sorted values of every facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub typ: Vec<FacetValue>,
    pub region: Vec<FacetValue>,
    pub zeit_kategorie: Vec<FacetValue>,
}

impl Facets {
    /// Collect facet values over a set of entries. Absent and empty values
    /// are skipped; values sort lexicographically.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut typ = BTreeMap::new();
        let mut region = BTreeMap::new();
        let mut zeit = BTreeMap::new();

        for entry in entries {
            let record = entry.record();
            bump(&mut typ, record.typ.as_deref());
            bump(&mut region, record.region.as_deref());
            bump(&mut zeit, Some(entry.zeit_kategorie()));
        }

        Self {
            typ: collect(typ),
            region: collect(region),
            zeit_kategorie: collect(zeit),
        }
    }
}

fn bump<'a>(counts: &mut BTreeMap<&'a str, usize>, value: Option<&'a str>) {
    if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
        *counts.entry(v).or_insert(0) += 1;
    }
}

fn collect(counts: BTreeMap<&str, usize>) -> Vec<FacetValue> {
    counts
        .into_iter()
        .map(|(value, count)| FacetValue {
            value: value.to_string(),
            count,
        })
        .collect()
}

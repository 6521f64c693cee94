//! Immutable catalog snapshot.
//!
//! A [`Catalog`] is built once from the parsed records. Construction derives
//! each record's time category and the stringified field list used by the
//! query engine; afterwards nothing on the catalog can change. Queries hand
//! out borrowed [`Entry`] views in dataset order.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::Record;
use crate::zeit::{classify_with, ZeitBounds};

/// Errors raised while assembling a catalog from records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("duplicate record id `{0}`")]
    DuplicateId(String),
}

/// A record together with the values derived from it at load time.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    #[serde(flatten)]
    record: Record,
    zeit_kategorie: String,
    #[serde(skip)]
    search_fields: Vec<String>,
}

impl Entry {
    fn new(mut record: Record, bounds: &ZeitBounds) -> Self {
        // An authored category would shadow the derived one.
        record.extra.remove("zeit_kategorie");
        let zeit_kategorie = classify_with(record.zeit.as_deref(), bounds);
        let search_fields = stringify_fields(&record, &zeit_kategorie);
        Self {
            record,
            zeit_kategorie,
            search_fields,
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    /// Derived time-period label.
    pub fn zeit_kategorie(&self) -> &str {
        &self.zeit_kategorie
    }

    /// String form of every field, the derived category last.
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }
}

/// Loaded dataset. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    bounds: ZeitBounds,
}

impl Catalog {
    /// Build the snapshot, classifying every record exactly once.
    ///
    /// # Errors
    ///
    /// [`LoadError::DuplicateId`] when two records share an id.
    pub fn from_records(records: Vec<Record>, bounds: ZeitBounds) -> Result<Self, LoadError> {
        if let Some(id) = first_duplicate_id(&records) {
            return Err(LoadError::DuplicateId(id));
        }

        let entries: Vec<Entry> = records
            .into_iter()
            .map(|record| Entry::new(record, &bounds))
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.record.id.clone(), i))
            .collect();

        Ok(Self {
            entries,
            index,
            bounds,
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Every entry, as a view.
    pub fn all(&self) -> Vec<&Entry> {
        self.entries.iter().collect()
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bounds the categories were derived with.
    pub fn bounds(&self) -> ZeitBounds {
        self.bounds
    }
}

fn first_duplicate_id(records: &[Record]) -> Option<String> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .find(|r| !seen.insert(r.id.as_str()))
        .map(|r| r.id.clone())
}

fn stringify_fields(record: &Record, zeit_kategorie: &str) -> Vec<String> {
    let mut fields: Vec<String> = match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map.values().map(stringify).collect(),
        _ => Vec::new(),
    };
    fields.push(zeit_kategorie.to_string());
    fields
}

/// String form of a JSON value: strings as-is, everything else as JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

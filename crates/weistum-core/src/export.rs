//! CSV export of a catalog view.
//!
//! Columns are fixed ([`CSV_HEADER`]). Every field is quoted, embedded
//! double quotes are doubled, nested objects (`koordinaten`, `edition`) are
//! flattened to compact JSON and absent values are written as empty strings.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::catalog::Entry;

/// Column order of the export.
pub const CSV_HEADER: [&str; 12] = [
    "id",
    "titel",
    "ort",
    "region",
    "zeit",
    "zeit_kategorie",
    "typ",
    "schreiberinfo",
    "text",
    "koordinaten",
    "edition",
    "original_link",
];

/// Write the header and one row per entry. Returns the number of rows.
pub fn write_csv<W: Write>(writer: W, entries: &[&Entry]) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;

    for entry in entries {
        wtr.write_record(row(entry)?)?;
    }

    wtr.flush()?;
    Ok(entries.len())
}

/// Render a view to an in-memory CSV string.
pub fn to_csv_string(entries: &[&Entry]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, entries)?;
    Ok(String::from_utf8(buf)?)
}

fn row(entry: &Entry) -> Result<[String; 12]> {
    let r = entry.record();
    Ok([
        r.id.clone(),
        text(&r.titel),
        text(&r.ort),
        text(&r.region),
        text(&r.zeit),
        entry.zeit_kategorie().to_string(),
        text(&r.typ),
        text(&r.schreiberinfo),
        text(&r.text),
        json(&r.koordinaten)?,
        json(&r.edition)?,
        text(&r.original_link),
    ])
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn json<T: Serialize>(value: &Option<T>) -> Result<String> {
    match value {
        Some(v) => Ok(serde_json::to_string(v)?),
        None => Ok(String::new()),
    }
}

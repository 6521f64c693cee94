//! Single-record view.
//!
//! Prints one entry's metadata and its full body, as plain text, rendered
//! HTML, or JSON.

use anyhow::{bail, Result};

use weistum_core::catalog::{Catalog, Entry};
use weistum_core::models::or_placeholder;
use weistum_core::render;

/// Output format of `wk get`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GetFormat {
    #[default]
    Text,
    Html,
    Json,
}

/// Look up an entry, failing with a readable message for unknown ids.
pub fn get_entry<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Entry> {
    match catalog.get(id) {
        Some(entry) => Ok(entry),
        None => bail!("Eintrag nicht gefunden: {}", id),
    }
}

/// CLI entry point.
pub fn run_get(catalog: &Catalog, id: &str, format: GetFormat) -> Result<()> {
    let entry = get_entry(catalog, id)?;
    match format {
        GetFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
        GetFormat::Html => print!("{}", render::markdown_to_html(body(entry))),
        GetFormat::Text => print!("{}", format_text(entry)),
    }
    Ok(())
}

fn body(entry: &Entry) -> &str {
    entry.record().text.as_deref().unwrap_or("")
}

fn format_text(entry: &Entry) -> String {
    let r = entry.record();
    let mut out = String::new();
    out.push_str("--- Eintrag ---\n");
    out.push_str(&format!("id:            {}\n", r.id));
    out.push_str(&format!("titel:         {}\n", r.titel_or_placeholder()));
    out.push_str(&format!("edition:       {}\n", r.edition_stelle()));
    out.push_str(&format!("ort:           {}\n", or_placeholder(&r.ort)));
    out.push_str(&format!("region:        {}\n", or_placeholder(&r.region)));
    out.push_str(&format!(
        "zeit:          {} ({})\n",
        or_placeholder(&r.zeit),
        entry.zeit_kategorie()
    ));
    out.push_str(&format!("typ:           {}\n", or_placeholder(&r.typ)));
    out.push_str(&format!("schreiberinfo: {}\n", or_placeholder(&r.schreiberinfo)));
    if let Some((lat, lng)) = r.position() {
        out.push_str(&format!("koordinaten:   {}, {}\n", lat, lng));
    }
    if let Some(link) = r.original_link.as_deref() {
        out.push_str(&format!("original_link: {}\n", link));
    }
    for (key, value) in &r.extra {
        out.push_str(&format!("{}: {}\n", key, weistum_core::catalog::stringify(value)));
    }
    out.push('\n');
    out.push_str("--- Text ---\n");
    out.push_str(&render::plain_text(body(entry)));
    out.push('\n');
    out
}

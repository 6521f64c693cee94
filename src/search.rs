//! Search command and list view.
//!
//! The query itself runs in `weistum_core::query`; this module turns the
//! outcome into terminal output. An unusable pattern is reported on stderr
//! and the view is simply empty.

use anyhow::Result;

use weistum_core::catalog::{Catalog, Entry};
use weistum_core::models::or_placeholder;
use weistum_core::query::Query;
use weistum_core::render;

use crate::config::Config;

/// Message shown for an empty view.
pub const NO_RESULTS: &str = "Keine Ergebnisse gefunden.";

/// Options for the list view.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Show the full body instead of the preview.
    pub full: bool,
    /// Emit JSON instead of text.
    pub json: bool,
    /// Maximum number of entries to print.
    pub limit: Option<usize>,
}

/// Run the query, degrading an unusable pattern to an empty view.
pub fn select_entries<'a>(catalog: &'a Catalog, query: &Query, config: &Config) -> Vec<&'a Entry> {
    let outcome = catalog.search(query, &config.query_limits());
    match &outcome.error {
        Some(err) => {
            tracing::warn!(pattern = %query.pattern, error = %err, "unusable search pattern");
            eprintln!("Ungültiger regulärer Ausdruck: {}", err);
        }
        None => {
            tracing::info!(
                pattern = %query.pattern,
                typ = ?query.filters.typ,
                region = ?query.filters.region,
                zeit = ?query.filters.zeit_kategorie,
                matches = outcome.matches.len(),
                "query executed"
            );
        }
    }
    outcome.matches
}

/// CLI entry point: query and print the list view.
pub fn run_search(catalog: &Catalog, config: &Config, query: &Query, opts: ListOptions) -> Result<()> {
    let mut entries = select_entries(catalog, query, config);
    let total = entries.len();
    if let Some(limit) = opts.limit {
        entries.truncate(limit);
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", NO_RESULTS);
        return Ok(());
    }

    for (i, entry) in entries.iter().enumerate() {
        print!("{}", format_entry(i + 1, entry, opts.full, config.display.preview_words));
        println!();
    }

    if entries.len() < total {
        println!("({} von {} Treffern angezeigt)", entries.len(), total);
    }

    Ok(())
}

/// One entry of the list view.
pub fn format_entry(position: usize, entry: &Entry, full: bool, preview_words: usize) -> String {
    let r = entry.record();
    let body = r.text.as_deref().unwrap_or("");
    let text = if full {
        render::plain_text(body)
    } else {
        render::preview_text(body, preview_words)
    };

    let mut out = String::new();
    out.push_str(&format!("{}. {}\n", position, r.titel_or_placeholder()));
    out.push_str(&format!("    Edition:       {}\n", r.edition_stelle()));
    out.push_str(&format!("    Ort:           {}\n", or_placeholder(&r.ort)));
    out.push_str(&format!("    Region:        {}\n", or_placeholder(&r.region)));
    out.push_str(&format!(
        "    Zeit:          {} ({})\n",
        or_placeholder(&r.zeit),
        entry.zeit_kategorie()
    ));
    out.push_str(&format!("    Typ:           {}\n", or_placeholder(&r.typ)));
    out.push_str(&format!("    Schreiberinfo: {}\n", or_placeholder(&r.schreiberinfo)));
    out.push_str(&format!(
        "    Text:          {}\n",
        if text.is_empty() { "-" } else { text.as_str() }
    ));
    if let Some(link) = r.original_link.as_deref().filter(|l| !l.is_empty()) {
        out.push_str(&format!("    Original-Link: {}\n", link));
    }
    out.push_str(&format!("    id: {}\n", r.id));
    out
}

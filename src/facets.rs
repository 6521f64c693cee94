//! Facet listing (`wk facets`).

use anyhow::Result;

use weistum_core::catalog::Catalog;
use weistum_core::facets::{FacetValue, Facets};

/// CLI entry point: print every facet's values with their counts.
pub fn run_facets(catalog: &Catalog, json: bool) -> Result<()> {
    let facets = Facets::from_entries(catalog.entries());
    if json {
        println!("{}", serde_json::to_string_pretty(&facets)?);
    } else {
        print!("{}", format_facets(&facets));
    }
    Ok(())
}

fn format_facets(facets: &Facets) -> String {
    let mut out = String::new();
    for (name, values) in [
        ("Typ", &facets.typ),
        ("Region", &facets.region),
        ("Zeit", &facets.zeit_kategorie),
    ] {
        out.push_str(&format_group(name, values));
        out.push('\n');
    }
    out
}

fn format_group(name: &str, values: &[FacetValue]) -> String {
    let mut out = format!("{}:\n", name);
    if values.is_empty() {
        out.push_str("  (keine Werte)\n");
    }
    for v in values {
        out.push_str(&format!("  {:<32} {:>5}\n", v.value, v.count));
    }
    out
}

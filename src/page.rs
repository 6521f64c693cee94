//! Static HTML page (`wk page`): list view plus map.
//!
//! Every entry becomes a `.result-item` whose element id is the record id.
//! The body shows a preview; a `<details>` toggle ("Mehr" / "Weniger")
//! reveals the full rendering with search matches highlighted. Map markers
//! are embedded as GeoJSON and drawn with Leaflet; clicking one scrolls its
//! entry into view and flashes it.

use anyhow::Result;

use weistum_core::catalog::Entry;
use weistum_core::map::{feature_collection, markers, MapView};
use weistum_core::models::or_placeholder;
use weistum_core::query::Matcher;
use weistum_core::render::{self, escape_html};

use crate::output::Output;
use crate::search::NO_RESULTS;

/// Title of the generated page.
pub const PAGE_TITLE: &str = "Weistümer";

/// Default output file of `wk page`.
pub const DEFAULT_PAGE_FILE: &str = "weistuemer.html";

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const STYLE: &str = r#"
body { font-family: Georgia, serif; margin: 0 auto; max-width: 60rem; padding: 1rem; }
#map { height: 420px; margin-bottom: 1.5rem; }
.result-item { border-bottom: 1px solid #ccc; padding: 0.75rem 0; transition: background 0.5s; }
.result-item.highlight-entry { background: #fff3b0; }
.highlight { background: #ffe066; }
details > summary { cursor: pointer; color: #1a4f8b; }
details > summary .weniger { display: none; }
details[open] > summary .mehr { display: none; }
details[open] > summary .weniger { display: inline; }
.result-item:has(details[open]) .text-preview { display: none; }
"#;

/// Page inputs.
pub struct PageOptions<'a> {
    pub title: &'a str,
    pub preview_words: usize,
    pub map_view: MapView,
    /// Compiled search pattern for highlighting, if any.
    pub highlight: Option<&'a Matcher>,
}

/// Build the complete HTML document for a view.
pub fn build_page(entries: &[&Entry], opts: &PageOptions<'_>) -> Result<String> {
    let markers = markers(entries.iter().copied());
    let geojson = serde_json::to_string(&feature_collection(&markers))?;

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"de\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(opts.title)));
    html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", LEAFLET_CSS));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(opts.title)));
    html.push_str("<div id=\"map\"></div>\n<div id=\"results\">\n");

    if entries.is_empty() {
        html.push_str(&format!("<p>{}</p>\n", NO_RESULTS));
    }
    for entry in entries {
        html.push_str(&render_item(entry, opts));
    }

    html.push_str("</div>\n");
    html.push_str(&format!("<script src=\"{}\"></script>\n", LEAFLET_JS));
    html.push_str(&map_script(&geojson, &opts.map_view));
    html.push_str("</body>\n</html>\n");
    Ok(html)
}

fn render_item(entry: &Entry, opts: &PageOptions<'_>) -> String {
    let r = entry.record();
    let body = r.text.as_deref().unwrap_or("");
    let preview = render::preview_html(body, opts.preview_words);
    let full = match opts.highlight.and_then(Matcher::regex) {
        Some(re) => render::markdown_to_highlighted_html(body, re),
        None => render::markdown_to_html(body),
    };

    let field = |label: &str, value: &str| {
        format!("<p><strong>{}:</strong> {}</p>\n", label, escape_html(value))
    };

    let mut out = format!(
        "<div class=\"result-item\" id=\"{}\">\n<h3>{}</h3>\n",
        escape_html(&r.id),
        escape_html(r.titel_or_placeholder())
    );
    out.push_str(&field("Edition", r.edition_stelle()));
    out.push_str(&field("Ort", or_placeholder(&r.ort)));
    out.push_str(&field("Region", or_placeholder(&r.region)));
    out.push_str(&field(
        "Zeit",
        &format!("{} ({})", or_placeholder(&r.zeit), entry.zeit_kategorie()),
    ));
    out.push_str(&field("Typ", or_placeholder(&r.typ)));
    out.push_str(&field("Schreiberinfo", or_placeholder(&r.schreiberinfo)));
    out.push_str("<div class=\"text\"><strong>Text:</strong>\n");
    out.push_str(&format!("<div class=\"text-preview\">{}</div>\n", preview));
    out.push_str(
        "<details><summary><span class=\"mehr\">Mehr</span><span class=\"weniger\">Weniger</span></summary>\n",
    );
    out.push_str(&format!("<div class=\"text-full\">{}</div>\n</details>\n</div>\n", full));
    if let Some(link) = r.original_link.as_deref().filter(|l| !l.is_empty()) {
        out.push_str(&format!(
            "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">Original-Link</a></p>\n",
            escape_html(link)
        ));
    }
    out.push_str("</div>\n");
    out
}

fn map_script(geojson: &str, view: &MapView) -> String {
    // `</` inside the inline script would end the element early.
    let data = geojson.replace("</", "<\\/");
    format!(
        r#"<script>
const markers = {data};
const map = L.map('map').setView([{lat}, {lng}], {zoom});
L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
  attribution: '&copy; OpenStreetMap'
}}).addTo(map);
L.geoJSON(markers, {{
  onEachFeature: (feature, layer) => {{
    const p = feature.properties;
    const popup = document.createElement('div');
    popup.textContent = p.titel + ' (' + p.ort + ', ' + p.zeit_kategorie + ')';
    layer.bindPopup(popup);
    layer.on('click', () => {{
      const el = document.getElementById(p.id);
      if (el) {{
        el.scrollIntoView({{ behavior: 'smooth' }});
        el.classList.add('highlight-entry');
        setTimeout(() => el.classList.remove('highlight-entry'), 3000);
      }}
    }});
  }}
}}).addTo(map);
</script>
"#,
        data = data,
        lat = view.center[0],
        lng = view.center[1],
        zoom = view.zoom
    )
}

/// CLI entry point.
pub fn run_page(entries: &[&Entry], opts: &PageOptions<'_>, output: &Output) -> Result<()> {
    let html = build_page(entries, opts)?;
    output.write(html.as_bytes())?;
    tracing::info!(entries = entries.len(), output = %output.describe(), "page written");
    if let Output::File(path) = output {
        eprintln!("Seite mit {} Einträgen geschrieben: {}", entries.len(), path.display());
    }
    Ok(())
}

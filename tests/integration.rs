use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn wk_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("wk");
    path
}

const DATASET: &str = r#"[
  {
    "id": "kaub-1475",
    "titel": "Weistum von Kaub",
    "ort": "Kaub",
    "region": "Mittelrhein",
    "zeit": "1475",
    "typ": "Hofweistum",
    "schreiberinfo": "Schreiber Johann, \"der Jüngere\"",
    "text": "Der Vogt soll den Zehnten nehmen[^1].\n\n[^1]: Kurpfalz.",
    "koordinaten": {"lat": 50.08, "lng": 7.76},
    "edition": {"stelle": "Grimm I, 788"},
    "original_link": "https://example.org/kaub"
  },
  {
    "id": "pfalzel-1550",
    "titel": "Weistum zu Pfalzel",
    "ort": "Pfalzel",
    "region": "Mosel",
    "zeit": "um 1550",
    "typ": "Dorfweistum",
    "text": "Die Schöffen weisen dem Erzbischof das Gericht.",
    "koordinaten": {"lat": 49.78, "lng": 6.68}
  },
  {
    "id": "ohne-zeit",
    "titel": "Fragment",
    "region": "Mosel",
    "typ": "Hofweistum",
    "text": "Bruchstück ohne Datum.",
    "archiv": "LHA Koblenz"
  }
]"#;

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    fs::write(root.join("data.json"), DATASET).unwrap();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[dataset]
path = "{}/data.json"

[display]
preview_words = 4

[export]
filename = "{}/out/export.csv"
"#,
        root.display(),
        root.display()
    );

    let config_path = config_dir.join("wk.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_wk(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = wk_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run wk binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_classify_without_dataset() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("wk.toml");
    fs::write(&config_path, "[dataset]\npath = \"missing.json\"\n").unwrap();

    let (stdout, stderr, success) =
        run_wk(&config_path, &["classify", "1475", "1500", "1199", "1800", "keine Angabe"]);
    assert!(success, "classify failed: {}", stderr);
    assert!(stdout.contains("1475\tEnde 15. Jh."));
    assert!(stdout.contains("1500\tEnde 15. Jh."));
    assert!(stdout.contains("1199\tVor 1200"));
    assert!(stdout.contains("1800\tAb 1800"));
    assert!(stdout.contains("keine Angabe\tunbekannt"));
}

#[test]
fn test_search_all() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, success) = run_wk(&config, &["search"]);
    assert!(success, "search failed: {}", stderr);
    assert!(stdout.contains("1. Weistum von Kaub"));
    assert!(stdout.contains("2. Weistum zu Pfalzel"));
    assert!(stdout.contains("3. Fragment"));
    assert!(stdout.contains("Zeit:          1475 (Ende 15. Jh.)"));
    assert!(stdout.contains("Zeit:          um 1550 (Mitte 16. Jh.)"));
    assert!(stdout.contains("Zeit:          - (unbekannt)"));
    assert!(stdout.contains("Edition:       Grimm I, 788"));
}

#[test]
fn test_search_pattern_is_case_insensitive_regex() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, success) = run_wk(&config, &["search", "zehnt(en)?"]);
    assert!(success);
    assert!(stdout.contains("Weistum von Kaub"));
    assert!(!stdout.contains("Pfalzel"));
}

#[test]
fn test_search_matches_extra_fields() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, success) = run_wk(&config, &["search", "koblenz"]);
    assert!(success);
    assert!(stdout.contains("1. Fragment"));
    assert!(!stdout.contains("Kaub"));
}

#[test]
fn test_search_combines_pattern_and_filters() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, success) = run_wk(&config, &["search", "weistum", "--region", "Mosel"]);
    assert!(success);
    assert!(stdout.contains("Weistum zu Pfalzel"));
    assert!(!stdout.contains("Kaub"));

    let (stdout, _, success) = run_wk(
        &config,
        &["search", "--typ", "Hofweistum", "--zeit", "unbekannt"],
    );
    assert!(success);
    assert!(stdout.contains("1. Fragment"));
    assert!(!stdout.contains("2."));
}

#[test]
fn test_search_no_results() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, success) = run_wk(&config, &["search", "--region", "Elsass"]);
    assert!(success);
    assert!(stdout.contains("Keine Ergebnisse gefunden."));
}

#[test]
fn test_search_invalid_regex_degrades_to_empty_view() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, success) = run_wk(&config, &["search", "(("]);
    assert!(success, "invalid pattern must not fail the command");
    assert!(stderr.contains("Ungültiger regulärer Ausdruck"));
    assert!(stdout.contains("Keine Ergebnisse gefunden."));
}

#[test]
fn test_search_literal_mode() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, success) = run_wk(&config, &["search", "((", "--literal"]);
    assert!(success);
    assert!(!stderr.contains("Ungültiger"));
    assert!(stdout.contains("Keine Ergebnisse gefunden."));
}

#[test]
fn test_search_preview_and_full() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, _) = run_wk(&config, &["search", "pfalzel"]);
    assert!(stdout.contains("Text:          Die Schöffen weisen dem …"));

    let (stdout, _, _) = run_wk(&config, &["search", "pfalzel", "--full"]);
    assert!(stdout.contains("Die Schöffen weisen dem Erzbischof das Gericht."));
}

#[test]
fn test_search_json_and_limit() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, success) = run_wk(&config, &["search", "--json", "--limit", "1"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "kaub-1475");
    assert_eq!(items[0]["zeit_kategorie"], "Ende 15. Jh.");
}

#[test]
fn test_get_record() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, success) = run_wk(&config, &["get", "ohne-zeit"]);
    assert!(success, "get failed: {}", stderr);
    assert!(stdout.contains("titel:         Fragment"));
    assert!(stdout.contains("archiv: LHA Koblenz"));
    assert!(stdout.contains("Bruchstück ohne Datum."));
}

#[test]
fn test_get_json_has_derived_category() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, success) = run_wk(&config, &["get", "pfalzel-1550", "--json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["zeit_kategorie"], "Mitte 16. Jh.");
    assert_eq!(parsed["koordinaten"]["lat"], 49.78);
}

#[test]
fn test_get_html_renders_footnotes() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, success) = run_wk(&config, &["get", "kaub-1475", "--html"]);
    assert!(success);
    assert!(stdout.contains("footnote-definition"));
}

#[test]
fn test_get_unknown_id_fails() {
    let (_tmp, config) = setup_test_env();
    let (_, stderr, success) = run_wk(&config, &["get", "gibt-es-nicht"]);
    assert!(!success);
    assert!(stderr.contains("Eintrag nicht gefunden: gibt-es-nicht"));
}

#[test]
fn test_facets_json() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, success) = run_wk(&config, &["facets", "--json"]);
    assert!(success, "facets failed: {}", stderr);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let regions: Vec<&str> = parsed["region"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["value"].as_str().unwrap())
        .collect();
    assert_eq!(regions, vec!["Mittelrhein", "Mosel"]);
    assert_eq!(parsed["region"][1]["count"], 2);

    let zeiten: Vec<&str> = parsed["zeit_kategorie"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["value"].as_str().unwrap())
        .collect();
    assert_eq!(zeiten, vec!["Ende 15. Jh.", "Mitte 16. Jh.", "unbekannt"]);
}

#[test]
fn test_export_csv_of_filtered_view() {
    let (tmp, config) = setup_test_env();
    let (_, stderr, success) = run_wk(&config, &["export", "--region", "Mittelrhein"]);
    assert!(success, "export failed: {}", stderr);
    assert!(stderr.contains("1 Einträge exportiert"));

    let csv = fs::read_to_string(tmp.path().join("out/export.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "\"id\",\"titel\",\"ort\",\"region\",\"zeit\",\"zeit_kategorie\",\"typ\",\"schreiberinfo\",\"text\",\"koordinaten\",\"edition\",\"original_link\""
    );
    assert!(csv.contains("\"Schreiber Johann, \"\"der Jüngere\"\"\""));
    assert!(csv.contains("\"Ende 15. Jh.\""));
    assert!(!csv.contains("Pfalzel"));
}

#[test]
fn test_export_to_stdout() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, success) = run_wk(&config, &["export", "--output", "-"]);
    assert!(success);
    assert!(stdout.starts_with("\"id\",\"titel\""));
    assert!(stdout.contains("\"ohne-zeit\""));
}

#[test]
fn test_map_geojson() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, success) = run_wk(&config, &["map"]);
    assert!(success, "map failed: {}", stderr);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["type"], "FeatureCollection");

    let features = parsed["features"].as_array().unwrap();
    assert_eq!(features.len(), 2, "record without coordinates has no marker");
    assert_eq!(features[0]["geometry"]["coordinates"][0], 7.76);
    assert_eq!(features[0]["properties"]["anchor"], "#kaub-1475");
}

#[test]
fn test_page_has_anchors_and_highlighting() {
    let (tmp, config) = setup_test_env();
    let out = tmp.path().join("page.html");
    let (_, stderr, success) = run_wk(
        &config,
        &["page", "zehnt", "--output", out.to_str().unwrap()],
    );
    assert!(success, "page failed: {}", stderr);

    let html = fs::read_to_string(out).unwrap();
    assert!(html.contains("id=\"kaub-1475\""));
    assert!(html.contains("<mark class=\"highlight\">Zehnt</mark>en"));
    assert!(html.contains("L.geoJSON"));
    assert!(!html.contains("id=\"pfalzel-1550\""));
}

#[test]
fn test_dataset_from_stdin() {
    let (_tmp, config) = setup_test_env();
    let mut child = Command::new(wk_binary())
        .arg("--config")
        .arg(config.to_str().unwrap())
        .args(["--data", "-", "search", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"[{"id": "s1", "zeit": "1333"}]"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["id"], "s1");
    assert_eq!(parsed[0]["zeit_kategorie"], "Anfang 14. Jh.");
}

#[test]
fn test_missing_dataset_fails() {
    let (tmp, config) = setup_test_env();
    fs::remove_file(tmp.path().join("data.json")).unwrap();
    let (_, stderr, success) = run_wk(&config, &["search"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read dataset"));
}

#[test]
fn test_invalid_config_fails() {
    let (_tmp, config) = setup_test_env();
    fs::write(&config, "[zeit]\nlower_bound = 1800\nupper_bound = 1200\n").unwrap();
    let (_, stderr, success) = run_wk(&config, &["search"]);
    assert!(!success);
    assert!(stderr.contains("zeit.lower_bound"));
}

#[test]
fn test_page_escapes_raw_html_in_text() {
    let (tmp, config) = setup_test_env();
    let data = tmp.path().join("roh.json");
    fs::write(
        &data,
        r#"[{"id": "roh", "titel": "Roh", "text": "Zehnt <script>alert(1)</script> <img src=x onerror=alert(2)>"}]"#,
    )
    .unwrap();
    let out = tmp.path().join("roh.html");
    let (_, stderr, success) = run_wk(
        &config,
        &[
            "--data",
            data.to_str().unwrap(),
            "page",
            "zehnt",
            "--output",
            out.to_str().unwrap(),
        ],
    );
    assert!(success, "page failed: {}", stderr);

    let html = fs::read_to_string(out).unwrap();
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>alert(1)"));
    assert!(!html.contains("<img src=x"));
}

#[test]
fn test_malformed_coordinates_and_edition_degrade() {
    let (tmp, config) = setup_test_env();
    let data = tmp.path().join("lose.json");
    fs::write(
        &data,
        r#"[{"id": "lose", "titel": "Lose", "koordinaten": "50.1, 7.7", "edition": "Grimm I, 612"}]"#,
    )
    .unwrap();

    let (stdout, stderr, success) = run_wk(&config, &["--data", data.to_str().unwrap(), "search"]);
    assert!(success, "load failed: {}", stderr);
    assert!(stdout.contains("1. Lose"));
    assert!(stdout.contains("Edition:       -"));

    let (stdout, _, success) = run_wk(&config, &["--data", data.to_str().unwrap(), "map"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["features"].as_array().unwrap().is_empty());
}

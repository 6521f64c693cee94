//! CSV export of the current view (`wk export`).
//!
//! Writes to `export.filename` from the config unless `--output` names
//! another file, or `-` for stdout.

use anyhow::Result;

use weistum_core::catalog::Entry;
use weistum_core::export::to_csv_string;

use crate::output::Output;

/// CLI entry point. Returns the number of exported rows.
pub fn run_export(entries: &[&Entry], output: &Output) -> Result<usize> {
    let csv = to_csv_string(entries)?;
    output.write(csv.as_bytes())?;

    tracing::info!(rows = entries.len(), output = %output.describe(), "csv exported");
    if let Output::File(path) = output {
        eprintln!("{} Einträge exportiert nach {}", entries.len(), path.display());
    }
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use weistum_core::catalog::Catalog;
    use weistum_core::models::Record;
    use weistum_core::zeit::ZeitBounds;

    #[test]
    fn test_export_to_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("export.csv");
        let catalog =
            Catalog::from_records(vec![Record::new("a"), Record::new("b")], ZeitBounds::default())
                .unwrap();

        let rows = run_export(&catalog.all(), &Output::File(path.clone())).unwrap();
        assert_eq!(rows, 2);

        let csv = std::fs::read_to_string(path).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.starts_with("\"id\",\"titel\""));
    }
}

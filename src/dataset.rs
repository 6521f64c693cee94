//! Dataset loading.
//!
//! The dataset is a JSON array of records, read once at startup from a file
//! or from stdin. [`load_catalog`] parses it and builds the immutable
//! [`Catalog`] snapshot, deriving every record's time category on the way.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

use weistum_core::catalog::Catalog;
use weistum_core::models::Record;
use weistum_core::zeit::ZeitBounds;

/// Where the raw dataset bytes come from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable origin, used in log lines and error messages.
    fn describe(&self) -> String;

    /// Read the complete dataset.
    async fn read(&self) -> Result<Vec<u8>>;
}

/// Dataset stored in a file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read dataset: {}", self.path.display()))
    }
}

/// Dataset piped in on stdin.
pub struct StdinSource;

#[async_trait]
impl DatasetSource for StdinSource {
    fn describe(&self) -> String {
        "<stdin>".to_string()
    }

    async fn read(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut buf)
            .await
            .context("Failed to read dataset from stdin")?;
        Ok(buf)
    }
}

/// Source for a path argument; `-` means stdin.
pub fn source_for(path: &Path) -> Box<dyn DatasetSource> {
    if path == Path::new("-") {
        Box::new(StdinSource)
    } else {
        Box::new(FileSource::new(path))
    }
}

/// Parse dataset bytes into a catalog.
pub fn parse_catalog(bytes: &[u8], bounds: ZeitBounds) -> Result<Catalog> {
    let records: Vec<Record> =
        serde_json::from_slice(bytes).context("Dataset must be a JSON array of records")?;
    let catalog = Catalog::from_records(records, bounds)?;
    Ok(catalog)
}

/// Read and parse the dataset from `source`.
pub async fn load_catalog(source: &dyn DatasetSource, bounds: ZeitBounds) -> Result<Catalog> {
    let origin = source.describe();
    let bytes = source.read().await?;
    let catalog = parse_catalog(&bytes, bounds)
        .with_context(|| format!("Failed to load dataset: {origin}"))?;
    tracing::info!(
        source = %origin,
        records = catalog.len(),
        "dataset loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct InlineSource(&'static str);

    #[async_trait]
    impl DatasetSource for InlineSource {
        fn describe(&self) -> String {
            "inline".to_string()
        }

        async fn read(&self) -> Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let source = InlineSource(r#"[{"id": "a", "zeit": "1475"}, {"id": "b"}]"#);
        let catalog = load_catalog(&source, ZeitBounds::default()).await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].zeit_kategorie(), "Ende 15. Jh.");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        std::fs::write(&path, r#"[{"id": "x", "titel": "Weistum"}]"#).unwrap();
        let catalog = load_catalog(source_for(&path).as_ref(), ZeitBounds::default())
            .await
            .unwrap();
        assert_eq!(catalog.get("x").unwrap().record().titel.as_deref(), Some("Weistum"));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let err = load_catalog(&FileSource::new("/nonexistent/data.json"), ZeitBounds::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read dataset"));
    }

    #[test]
    fn test_non_array_rejected() {
        assert!(parse_catalog(br#"{"id": "a"}"#, ZeitBounds::default()).is_err());
        assert!(parse_catalog(b"not json", ZeitBounds::default()).is_err());
    }

    #[test]
    fn test_malformed_nested_fields_do_not_fail_load() {
        let catalog = parse_catalog(
            br#"[{"id": "a", "koordinaten": "50.1, 7.7", "edition": "Grimm I, 612"}, {"id": "b"}]"#,
            ZeitBounds::default(),
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a").unwrap().record().position(), None);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = parse_catalog(br#"[{"id": "a"}, {"id": "a"}]"#, ZeitBounds::default())
            .unwrap_err();
        assert!(err.to_string().contains("duplicate record id"));
    }
}

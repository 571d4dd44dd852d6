//! Airport source module, provides the records the directory starts out with.
//!
//! The service reads a static JSON array once at startup, tests hand in fixed records instead.

use airport_api_shared::airports::Airport;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read airport dataset {}.", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Airport dataset {} is not a JSON array of airports.", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait::async_trait]
pub trait AirportSource {
    async fn load(&self) -> Result<Vec<Airport>, LoadError>;

    /// Human readable origin of the records, used in log lines.
    fn describe(&self) -> String;
}

/// Reads the whole dataset from a JSON file holding an array of airport objects.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> JsonFileSource {
        JsonFileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl AirportSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<Airport>, LoadError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(bytes = bytes.len(), path = %self.path.display(), "Read airport dataset");

        serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fixed set of records, lets tests build a directory without touching the filesystem.
#[cfg(test)]
pub struct StaticSource {
    airports: Vec<Airport>,
}

#[cfg(test)]
impl StaticSource {
    pub fn new(airports: Vec<Airport>) -> StaticSource {
        StaticSource { airports }
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl AirportSource for StaticSource {
    async fn load(&self) -> Result<Vec<Airport>, LoadError> {
        Ok(self.airports.clone())
    }

    fn describe(&self) -> String {
        format!("static fixture ({} records)", self.airports.len())
    }
}

#[cfg(test)]
mod airport_source_tests {
    use crate::airport_source::{AirportSource, JsonFileSource, LoadError, StaticSource};
    use airport_api_shared::airports::Airport;
    use std::io::Write;

    #[tokio::test]
    async fn test_bundled_dataset_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/airports.json");
        let airports = JsonFileSource::new(path).load().await.unwrap();

        let thomas = airports.iter().find(|a| a.icao() == Some("00PS")).unwrap();
        assert_eq!(thomas.name(), Some("Thomas Field"));
        assert!(airports.iter().any(|a| a.icao() == Some("00AK")));
    }

    #[tokio::test]
    async fn test_json_file_keeps_extra_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"icao": "KHWA", "iata": "", "name": "Kaye", "city": "London", "elevation": 12}}]"#
        )
        .unwrap();

        let airports = JsonFileSource::new(file.path()).load().await.unwrap();

        assert_eq!(airports.len(), 1);
        assert_eq!(airports[0].name(), Some("Kaye"));
        assert_eq!(airports[0].field("elevation"), Some(&serde_json::json!(12)));
    }

    #[tokio::test]
    async fn test_full_size_dataset_loads() {
        let mut records: Vec<Airport> = (0..28_000)
            .map(|i| Airport::new(&format!("Z{i:05}"), "", &format!("Strip {i}"), "Nowhere"))
            .collect();
        records.insert(14_000, Airport::new("00PS", "", "Thomas Field", "Loganville"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        serde_json::to_writer(&mut file, &records).unwrap();
        file.flush().unwrap();

        let airports = JsonFileSource::new(file.path()).load().await.unwrap();

        assert!(airports.len() > 28_000);
        let thomas = airports.iter().find(|a| a.icao() == Some("00PS")).unwrap();
        assert_eq!(thomas.city(), Some("Loganville"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("nope.json"));

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_non_array_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"icao": "KHWA"}}"#).unwrap();

        let err = JsonFileSource::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_static_source_returns_records() {
        let source = StaticSource::new(vec![Airport::new("00PS", "", "Thomas Field", "Loganville")]);

        let airports = source.load().await.unwrap();
        assert_eq!(airports.len(), 1);
        assert_eq!(source.describe(), "static fixture (1 records)");
    }
}

//! In-memory airport directory.
//!
//! Records keep their insertion order for pagination, lookups by ICAO go through a side index
//! pointing at the first record carrying that code.

use std::collections::HashMap;
use std::ops::Range;

use airport_api_shared::airports::Airport;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::airport_source::{AirportSource, LoadError};

#[derive(Debug, Error, PartialEq)]
pub enum DirectoryError {
    #[error("No airport with ICAO code {0}.")]
    NotFound(String),
}

#[derive(Debug, Default)]
pub struct AirportDirectory {
    airports: Vec<Airport>,
    by_icao: HashMap<String, usize>,
}

impl AirportDirectory {
    pub fn new(airports: Vec<Airport>) -> AirportDirectory {
        let mut directory = AirportDirectory {
            airports,
            by_icao: HashMap::new(),
        };
        directory.reindex();

        directory
    }

    pub async fn from_source<S: AirportSource + Sync>(
        source: &S,
    ) -> Result<AirportDirectory, LoadError> {
        let directory = AirportDirectory::new(source.load().await?);
        tracing::info!(
            count = directory.len(),
            source = %source.describe(),
            "Loaded airport directory"
        );

        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Records inside `window`, cut down to what actually exists.
    pub fn list(&self, window: Range<usize>) -> &[Airport] {
        let len = self.airports.len();
        let start = window.start.min(len);
        let end = window.end.clamp(start, len);

        &self.airports[start..end]
    }

    pub fn get(&self, icao: &str) -> Option<&Airport> {
        self.by_icao.get(icao).map(|&pos| &self.airports[pos])
    }

    /// Append a record as is. Duplicate codes are accepted, lookups keep finding the older
    /// record.
    pub fn create(&mut self, airport: Airport) -> &Airport {
        let pos = self.airports.len();
        if let Some(icao) = airport.icao() {
            self.by_icao.entry(icao.to_string()).or_insert(pos);
        }
        self.airports.push(airport);

        &self.airports[pos]
    }

    pub fn update(
        &mut self,
        icao: &str,
        patch: Map<String, Value>,
    ) -> Result<&Airport, DirectoryError> {
        let pos = *self
            .by_icao
            .get(icao)
            .ok_or_else(|| DirectoryError::NotFound(icao.to_string()))?;

        self.airports[pos].apply_patch(patch);

        if self.airports[pos].icao() != Some(icao) {
            self.reindex();
        }

        Ok(&self.airports[pos])
    }

    /// Remove the first record with this code, shifting the ones after it down.
    pub fn delete(&mut self, icao: &str) -> Option<Airport> {
        let pos = self.by_icao.get(icao).copied()?;
        let removed = self.airports.remove(pos);
        self.reindex();

        Some(removed)
    }

    fn reindex(&mut self) {
        self.by_icao.clear();
        for (pos, airport) in self.airports.iter().enumerate() {
            if let Some(icao) = airport.icao() {
                self.by_icao.entry(icao.to_string()).or_insert(pos);
            }
        }
    }
}

#[cfg(test)]
mod directory_tests {
    use crate::directory::{AirportDirectory, DirectoryError};
    use airport_api_shared::airports::{Airport, PageQuery};
    use serde_json::{json, Map, Value};

    fn sample() -> AirportDirectory {
        AirportDirectory::new(vec![
            Airport::new("00AK", "", "Lowell Field", "Anchor Point"),
            Airport::new("00AL", "", "Epps Airpark", "Harvest"),
            Airport::new("00AZ", "", "Cordes Airport", "Cordes"),
            Airport::new("00PS", "", "Thomas Field", "Loganville"),
            Airport::new("KJFK", "JFK", "John F Kennedy International Airport", "New York"),
        ])
    }

    fn numbered(count: usize) -> AirportDirectory {
        AirportDirectory::new(
            (0..count)
                .map(|i| Airport::new(&format!("X{i:03}"), "", &format!("Field {i}"), "Nowhere"))
                .collect(),
        )
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn codes(directory: &AirportDirectory) -> Vec<&str> {
        directory
            .list(0..usize::MAX)
            .iter()
            .map(|a| a.icao().unwrap_or("-"))
            .collect()
    }

    #[test]
    fn test_list_matches_manual_slice() {
        let directory = numbered(53);
        let all = directory.list(0..usize::MAX).to_vec();
        assert_eq!(all.len(), 53);

        for page_size in 1..=20 {
            for page in 1..=8 {
                let window = PageQuery::new(page, page_size).window().unwrap();
                let listed = directory.list(window);

                let min = ((page - 1) * page_size).min(all.len());
                let max = (page * page_size).min(all.len());

                assert!(listed.len() <= page_size);
                assert_eq!(listed, &all[min..max]);
            }
        }
    }

    #[test]
    fn test_list_past_end_is_empty() {
        let directory = sample();
        assert!(directory.list(10..20).is_empty());
        assert_eq!(directory.list(3..20).len(), 2);
    }

    #[test]
    fn test_create_then_get() {
        let mut directory = sample();
        let airport = Airport::new("KHWA", "hello", "Kaye", "London");

        let created = directory.create(airport.clone()).clone();
        assert_eq!(created, airport);
        assert_eq!(directory.get("KHWA"), Some(&airport));
        assert_eq!(directory.len(), 6);
        assert_eq!(directory.list(5..6), &[airport]);
    }

    #[test]
    fn test_create_without_string_code() {
        let mut directory = sample();
        let odd = Airport::from_fields(object(json!({ "icao": 42, "name": 3 })));

        let created = directory.create(odd.clone()).clone();
        assert_eq!(created, odd);
        assert_eq!(directory.len(), 6);
        assert_eq!(directory.list(5..6), &[odd]);
        assert_eq!(directory.get("00AK").unwrap().name(), Some("Lowell Field"));
    }

    #[test]
    fn test_duplicate_code_resolves_to_first() {
        let mut directory = sample();
        directory.create(Airport::new("00PS", "", "Second Thomas", "Elsewhere"));

        assert_eq!(directory.get("00PS").unwrap().name(), Some("Thomas Field"));
        assert_eq!(directory.len(), 6);

        directory.delete("00PS");
        assert_eq!(directory.get("00PS").unwrap().name(), Some("Second Thomas"));
    }

    #[test]
    fn test_update_preserves_unnamed_fields() {
        let mut directory = sample();

        let updated = directory
            .update("00AK", object(json!({ "icao": "00AK", "name": "Kaye" })))
            .unwrap();

        assert_eq!(updated.name(), Some("Kaye"));
        assert_eq!(updated.city(), Some("Anchor Point"));
        assert_eq!(directory.get("00AK").unwrap().name(), Some("Kaye"));
    }

    #[test]
    fn test_update_stores_any_value() {
        let mut directory = sample();

        let updated = directory
            .update("00AK", object(json!({ "name": 7, "city": null })))
            .unwrap();

        assert_eq!(updated.field("name"), Some(&json!(7)));
        assert_eq!(updated.field("city"), Some(&Value::Null));
        assert!(directory.get("00AK").is_some());
    }

    #[test]
    fn test_update_can_rename_code() {
        let mut directory = sample();

        directory
            .update("00AL", object(json!({ "icao": "K00A" })))
            .unwrap();

        assert!(directory.get("00AL").is_none());
        assert_eq!(directory.get("K00A").unwrap().name(), Some("Epps Airpark"));
    }

    #[test]
    fn test_update_dropping_string_code_unindexes() {
        let mut directory = sample();

        directory
            .update("00AZ", object(json!({ "icao": 5 })))
            .unwrap();

        assert!(directory.get("00AZ").is_none());
        assert_eq!(directory.len(), 5);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut directory = sample();

        let err = directory
            .update("ZZZZ", object(json!({ "name": "Kaye" })))
            .unwrap_err();

        assert_eq!(err, DirectoryError::NotFound("ZZZZ".to_string()));
        assert_eq!(directory.len(), 5);
    }

    #[test]
    fn test_delete_compacts() {
        let mut directory = sample();

        let removed = directory.delete("00AL").unwrap();
        assert_eq!(removed.name(), Some("Epps Airpark"));
        assert_eq!(directory.len(), 4);
        assert!(directory.get("00AL").is_none());

        assert_eq!(codes(&directory), vec!["00AK", "00AZ", "00PS", "KJFK"]);
        assert_eq!(directory.get("KJFK").unwrap().iata(), Some("JFK"));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut directory = sample();

        assert!(directory.delete("ZZZZ").is_none());
        assert_eq!(directory.len(), 5);
    }
}

//! Station and custom address records, plus a file-backed station directory.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::coordinate::Coordinate;

/// The two station categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationCategory {
    Headquarters,
    Precinct,
}

/// A police station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub category: StationCategory,
    /// Parent headquarters of a precinct. Only used for grouping.
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub city: String,
    pub address: String,
    pub coordinates: Coordinate,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub emergency_24h: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Station {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: StationCategory,
        address: impl Into<String>,
        coordinates: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            parent_id: None,
            city: String::new(),
            address: address.into(),
            coordinates,
            phone: None,
            emergency_24h: false,
            active: true,
        }
    }

    /// Attach this station to a parent headquarters.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// A user-entered destination that is not a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomAddress {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinates: Coordinate,
}

impl CustomAddress {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        coordinates: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            coordinates,
        }
    }
}

/// Errors raised while loading a station directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate station id: {0}")]
    DuplicateId(String),
}

/// In-memory station collection with id lookup and headquarters grouping.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: Vec<Station>,
    by_id: HashMap<String, usize>,
}

impl StationDirectory {
    /// Build a directory, rejecting duplicate ids.
    pub fn new(stations: Vec<Station>) -> Result<Self, DirectoryError> {
        let mut by_id = HashMap::with_capacity(stations.len());
        for (idx, station) in stations.iter().enumerate() {
            if by_id.insert(station.id.clone(), idx).is_some() {
                return Err(DirectoryError::DuplicateId(station.id.clone()));
            }
        }
        Ok(Self { stations, by_id })
    }

    /// Load a JSON array of stations.
    pub fn load_from_file(path: &Path) -> Result<Self, DirectoryError> {
        let reader = BufReader::new(File::open(path)?);
        let stations: Vec<Station> = serde_json::from_reader(reader)?;
        let directory = Self::new(stations)?;
        tracing::info!(path = ?path, stations = directory.len(), "Loaded station directory");
        Ok(directory)
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.by_id.get(id).and_then(|&idx| self.stations.get(idx))
    }

    pub fn all(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn active(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter().filter(|s| s.active)
    }

    pub fn headquarters(&self) -> impl Iterator<Item = &Station> {
        self.stations
            .iter()
            .filter(|s| s.category == StationCategory::Headquarters)
    }

    /// Precincts whose parent is `headquarters_id`, in directory order.
    pub fn precincts_of<'a>(&'a self, headquarters_id: &'a str) -> impl Iterator<Item = &'a Station> {
        self.stations.iter().filter(move |s| {
            s.category == StationCategory::Precinct && s.parent_id.as_deref() == Some(headquarters_id)
        })
    }
}

//! Destinations a batch can route to.

use serde::{Deserialize, Serialize};

use crate::model::coordinate::Coordinate;
use crate::model::station::{CustomAddress, Station};

/// Which collection a destination came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationKind {
    Station,
    Custom,
}

impl DestinationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationKind::Station => "station",
            DestinationKind::Custom => "custom",
        }
    }
}

/// Ids are only unique within their own collection, so identity is (kind, id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DestinationKey {
    pub kind: DestinationKind,
    pub id: String,
}

/// A routing target, resolved by the caller before it enters the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Destination {
    Station(Station),
    Custom(CustomAddress),
}

impl Destination {
    pub fn id(&self) -> &str {
        match self {
            Destination::Station(s) => &s.id,
            Destination::Custom(c) => &c.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Destination::Station(s) => &s.name,
            Destination::Custom(c) => &c.name,
        }
    }

    pub fn address(&self) -> &str {
        match self {
            Destination::Station(s) => &s.address,
            Destination::Custom(c) => &c.address,
        }
    }

    pub fn coordinates(&self) -> Coordinate {
        match self {
            Destination::Station(s) => s.coordinates,
            Destination::Custom(c) => c.coordinates,
        }
    }

    pub fn kind(&self) -> DestinationKind {
        match self {
            Destination::Station(_) => DestinationKind::Station,
            Destination::Custom(_) => DestinationKind::Custom,
        }
    }

    pub fn key(&self) -> DestinationKey {
        DestinationKey {
            kind: self.kind(),
            id: self.id().to_string(),
        }
    }
}

impl From<Station> for Destination {
    fn from(station: Station) -> Self {
        Destination::Station(station)
    }
}

impl From<CustomAddress> for Destination {
    fn from(address: CustomAddress) -> Self {
        Destination::Custom(address)
    }
}

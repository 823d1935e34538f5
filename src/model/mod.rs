//! Domain types shared by every subsystem.
//!
//! # Data Flow
//! ```text
//! station file / caller payload
//!     → station.rs (Station, CustomAddress, StationDirectory)
//!     → destination.rs (Destination tagged union, resolved before routing)
//!     → routing pipeline
//!     → route.rs (RouteResult rows, km/min normalized)
//! ```

pub mod coordinate;
pub mod destination;
pub mod route;
pub mod station;

pub use coordinate::{Coordinate, StartLocation};
pub use destination::{Destination, DestinationKey, DestinationKind};
pub use route::{ProviderUsed, RouteGeometry, RouteResult, RouteType};
pub use station::{CustomAddress, DirectoryError, Station, StationCategory, StationDirectory};

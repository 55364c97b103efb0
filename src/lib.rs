//! # Traffic-manager Library
//!
//! Models a road network and computes shortest paths between points, and
//! orders waiting vehicles by a fixed class priority.
//!
//! ## Features
//!
//! - **Two-way road network**: every route is usable in both directions,
//!   points are created on first reference
//! - **Shortest paths**: Dijkstra over route distances with a documented,
//!   deterministic tie-break
//! - **Priority departures**: Ambulance, Police, Car, Truck, then any other
//!   class, admission order kept within a class
//! - **Shared access**: [`SharedTrafficService`] serialises every operation
//!   behind one lock
//!
//! ## Basic Usage
//!
//! ```rust
//! use traffic_manager::TrafficService;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut service = TrafficService::new();
//! service.add_route("A", "B", 4.0, 0.0)?;
//! service.add_route("B", "C", 3.0, 0.0)?;
//! service.add_route("A", "C", 10.0, 0.0)?;
//!
//! let report = service.find_path("A", "C")?;
//! assert_eq!(report.nodes, vec!["A", "B", "C"]);
//! assert_eq!(report.distance, 7.0);
//!
//! service.add_vehicle("V1", "North", "Car")?;
//! service.add_vehicle("V2", "South", "Ambulance")?;
//! let order = service.manage_traffic();
//! assert_eq!(order[0].id, "V2");
//! # Ok(())
//! # }
//! ```
//!
//! ## Text Reports
//!
//! ```rust
//! use traffic_manager::{DepartureReport, TrafficService};
//!
//! let mut service = TrafficService::new();
//! service.add_vehicle("V1", "North", "Police").unwrap();
//! let report = DepartureReport::from(service.manage_traffic());
//! assert_eq!(
//!     report.to_string(),
//!     "Vehicles leaving based on priority:\nVehicle ID: V1 from North lane (Type: Police)\n"
//! );
//! ```

// Internal modules
mod core;

pub use crate::core::error::{suggest_closest, Error, Result};
pub use crate::core::graph::{Path, Route, RouteGraph};
pub use crate::core::options::{ServiceOptions, DEFAULT_LANES};
pub use crate::core::queue::{Vehicle, VehicleClass, VehicleQueue};
pub use crate::core::service::{
    DepartureReport, PathReport, SharedTrafficService, TrafficService, VehicleRecord,
};

//! Traffic service façade
//!
//! Owns the road network and the vehicle queue and exposes the four
//! operations callers use: add a route, find a path, add a vehicle and
//! manage traffic. Results are plain values; the `Display` impls on the report
//! types give the human-readable wording for text front ends.

use crate::core::error::{suggest_closest, Error, Result};
use crate::core::graph::RouteGraph;
use crate::core::options::ServiceOptions;
use crate::core::queue::{Vehicle, VehicleClass, VehicleQueue};
use log::{debug, warn};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A vehicle as reported by [`TrafficService::manage_traffic`]
pub type VehicleRecord = Vehicle;

/// Outcome of a successful path query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathReport {
    pub from: String,
    pub to: String,
    pub nodes: Vec<String>,
    pub distance: f64,
}

impl fmt::Display for PathReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shortest path from {} to {}: [{}], Distance = {:?}",
            self.from,
            self.to,
            self.nodes.join(", "),
            self.distance
        )
    }
}

/// Departure sequence with its text rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DepartureReport(pub Vec<VehicleRecord>);

impl From<Vec<VehicleRecord>> for DepartureReport {
    fn from(vehicles: Vec<VehicleRecord>) -> Self {
        Self(vehicles)
    }
}

impl fmt::Display for DepartureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vehicles leaving based on priority:")?;
        for vehicle in &self.0 {
            writeln!(
                f,
                "Vehicle ID: {} from {} lane (Type: {})",
                vehicle.id, vehicle.lane, vehicle.class
            )?;
        }
        Ok(())
    }
}

/// Road network plus waiting vehicles
#[derive(Debug, Default)]
pub struct TrafficService {
    graph: RouteGraph,
    queue: VehicleQueue,
    options: ServiceOptions,
}

impl TrafficService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ServiceOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Read-only view of the road network
    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    /// Read-only view of the waiting vehicles
    pub fn queue(&self) -> &VehicleQueue {
        &self.queue
    }

    /// Add a two-way road. Fails with [`Error::InvalidDistance`] and leaves
    /// the network untouched if either value is negative or non-finite.
    pub fn add_route(&mut self, from: &str, to: &str, distance: f64, congestion: f64) -> Result<()> {
        self.graph
            .add_route(from, to, distance, congestion)
            .inspect_err(|e| warn!("Rejected route {from} <-> {to}: {e}"))
    }

    /// Shortest path by distance. Both "unknown point" and "no connecting
    /// road" errors answer true to [`Error::is_not_found`].
    pub fn find_path(&self, from: &str, to: &str) -> Result<PathReport> {
        let path = self.graph.shortest_path(from, to)?;
        Ok(PathReport {
            from: from.to_string(),
            to: to.to_string(),
            nodes: path.nodes,
            distance: path.distance,
        })
    }

    /// Queue a vehicle. With default options this never fails.
    pub fn add_vehicle(&mut self, id: &str, lane: &str, class: &str) -> Result<()> {
        if !self.options.lane_allowed(lane) {
            warn!("Rejected vehicle {id}: lane '{lane}' not allowed");
            return Err(Error::UnknownLane(lane.to_string()));
        }

        let class = VehicleClass::from(class);
        if self.options.strict_classes && !class.is_known() {
            warn!("Rejected vehicle {id}: unknown class '{class}'");
            return Err(Error::UnknownVehicleClass {
                suggestion: suggest_closest(class.as_str(), VehicleClass::KNOWN),
                class: class.to_string(),
            });
        }

        self.queue.admit(id, lane, class);
        Ok(())
    }

    /// Every queued vehicle in departure order. Vehicles stay queued.
    pub fn manage_traffic(&self) -> Vec<VehicleRecord> {
        let order = self.queue.departure_order();
        debug!("Departure order computed for {} vehicles", order.len());
        order
    }
}

/// Cloneable handle serialising all access to one [`TrafficService`]
#[derive(Debug, Clone, Default)]
pub struct SharedTrafficService {
    inner: Arc<Mutex<TrafficService>>,
}

impl From<TrafficService> for SharedTrafficService {
    fn from(service: TrafficService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }
}

impl SharedTrafficService {
    pub fn new(options: ServiceOptions) -> Self {
        TrafficService::with_options(options).into()
    }

    // Every operation validates before mutating, so state behind a poisoned
    // lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, TrafficService> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_route(&self, from: &str, to: &str, distance: f64, congestion: f64) -> Result<()> {
        self.lock().add_route(from, to, distance, congestion)
    }

    pub fn find_path(&self, from: &str, to: &str) -> Result<PathReport> {
        self.lock().find_path(from, to)
    }

    pub fn add_vehicle(&self, id: &str, lane: &str, class: &str) -> Result<()> {
        self.lock().add_vehicle(id, lane, class)
    }

    pub fn manage_traffic(&self) -> Vec<VehicleRecord> {
        self.lock().manage_traffic()
    }
}

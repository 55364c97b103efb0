//! CLI-specific utilities for traffic-manager
//!
//! Everything that turns user text into core calls lives here, separate from
//! the core library. Malformed numbers and empty names are rejected at this
//! layer and never reach the network.

pub mod script;

use anyhow::{bail, Result};
pub use script::{execute, render, require_name, run_script, Command};
use script::parse_number;

/// Parse a `FROM,TO,DISTANCE[,CONGESTION]` route argument
pub fn parse_route_spec(spec: &str) -> Result<Command> {
    let parts: Vec<&str> = spec.split(',').collect();
    let (from, to, distance, congestion) = match parts.as_slice() {
        [from, to, distance] => (from, to, distance, None),
        [from, to, distance, congestion] => (from, to, distance, Some(congestion)),
        _ => bail!("Route '{spec}' must look like FROM,TO,DISTANCE[,CONGESTION]"),
    };

    Ok(Command::Route {
        from: require_name("from point", from)?,
        to: require_name("to point", to)?,
        distance: parse_number("distance", distance)?,
        congestion: match congestion {
            Some(raw) => parse_number("congestion level", raw)?,
            None => 0.0,
        },
    })
}

/// Parse an `ID,LANE,CLASS` vehicle argument
pub fn parse_vehicle_spec(spec: &str) -> Result<Command> {
    match spec.split(',').collect::<Vec<_>>().as_slice() {
        [id, lane, class] => Ok(Command::Vehicle {
            id: id.trim().to_string(),
            lane: require_name("lane", lane)?,
            class: require_name("vehicle type", class)?,
        }),
        _ => bail!("Vehicle '{spec}' must look like ID,LANE,CLASS"),
    }
}

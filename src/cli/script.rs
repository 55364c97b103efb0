//! Command scripts for traffic-manager
//!
//! One command per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! route FROM TO DISTANCE [CONGESTION]
//! vehicle ID LANE CLASS
//! path FROM TO
//! manage
//! ```
//!
//! A failing line is reported and the script carries on, so one typo does not
//! throw away the rest of a session.

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, error};
use serde::Serialize;
use std::io::{BufRead, Write};
use traffic_manager::{DepartureReport, PathReport, TrafficService, VehicleRecord};

/// One parsed script or command-line action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Route {
        from: String,
        to: String,
        distance: f64,
        congestion: f64,
    },
    Vehicle {
        id: String,
        lane: String,
        class: String,
    },
    Path {
        from: String,
        to: String,
    },
    Manage,
}

/// Result of executing one command
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Outcome {
    RouteAdded {
        from: String,
        to: String,
        distance: f64,
        congestion: f64,
    },
    VehicleAdded {
        id: String,
        lane: String,
        class: String,
    },
    Path(PathReport),
    Departures { vehicles: Vec<VehicleRecord> },
}

/// Totals for a finished script
#[derive(Debug, Default, PartialEq)]
pub struct ScriptSummary {
    pub executed: usize,
    /// (line number, message) for every line that failed
    pub failures: Vec<(usize, String)>,
}

/// Parse a distance-like number, rejecting anything the core would refuse
/// to see as a number at all
pub fn parse_number(field: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid input for {field}: '{raw}' is not a number"))?;
    Ok(value)
}

/// Reject empty point names before they reach the network
pub fn require_name(field: &str, raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        bail!("Please enter a {field}");
    }
    Ok(name.to_string())
}

/// Parse one script line; `None` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let command = match tokens.as_slice() {
        ["route", from, to, distance] => Command::Route {
            from: from.to_string(),
            to: to.to_string(),
            distance: parse_number("distance", distance)?,
            congestion: 0.0,
        },
        ["route", from, to, distance, congestion] => Command::Route {
            from: from.to_string(),
            to: to.to_string(),
            distance: parse_number("distance", distance)?,
            congestion: parse_number("congestion level", congestion)?,
        },
        ["vehicle", id, lane, class] => Command::Vehicle {
            id: id.to_string(),
            lane: lane.to_string(),
            class: class.to_string(),
        },
        ["path", from, to] => Command::Path {
            from: from.to_string(),
            to: to.to_string(),
        },
        ["manage"] => Command::Manage,
        [keyword @ ("route" | "vehicle" | "path" | "manage"), ..] => {
            bail!("Wrong number of arguments for '{keyword}'")
        }
        [other, ..] => bail!("Unknown command '{other}'"),
        [] => return Ok(None),
    };
    Ok(Some(command))
}

/// Run one command against the service
pub fn execute(service: &mut TrafficService, command: Command) -> traffic_manager::Result<Outcome> {
    debug!("Executing {command:?}");
    match command {
        Command::Route {
            from,
            to,
            distance,
            congestion,
        } => {
            service.add_route(&from, &to, distance, congestion)?;
            Ok(Outcome::RouteAdded {
                from,
                to,
                distance,
                congestion,
            })
        }
        Command::Vehicle { id, lane, class } => {
            service.add_vehicle(&id, &lane, &class)?;
            Ok(Outcome::VehicleAdded { id, lane, class })
        }
        Command::Path { from, to } => Ok(Outcome::Path(service.find_path(&from, &to)?)),
        Command::Manage => Ok(Outcome::Departures {
            vehicles: service.manage_traffic(),
        }),
    }
}

/// Write an outcome as text or as one JSON line
pub fn render(outcome: &Outcome, json: bool, out: &mut dyn Write) -> Result<()> {
    if json {
        let line = serde_json::to_string(outcome).context("Failed to encode output")?;
        writeln!(out, "{line}")?;
        return Ok(());
    }

    match outcome {
        Outcome::RouteAdded { .. } => writeln!(out, "Route added successfully!")?,
        Outcome::VehicleAdded { .. } => writeln!(out, "Vehicle added successfully!")?,
        Outcome::Path(report) => writeln!(out, "{report}")?,
        Outcome::Departures { vehicles } => {
            write!(out, "{}", DepartureReport::from(vehicles.clone()))?
        }
    }
    Ok(())
}

/// Execute every line of `input`, writing results to `out`
pub fn run_script(
    service: &mut TrafficService,
    input: impl BufRead,
    json: bool,
    out: &mut dyn Write,
) -> Result<ScriptSummary> {
    let mut summary = ScriptSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;

        let result = parse_line(&line)
            .and_then(|cmd| cmd.map(|c| execute(service, c).map_err(anyhow::Error::from)).transpose());
        match result {
            Ok(Some(outcome)) => {
                summary.executed += 1;
                render(&outcome, json, out)?;
            }
            Ok(None) => {}
            Err(e) => {
                error!("❌ Line {line_no}: {e}");
                summary.failures.push((line_no, e.to_string()));
            }
        }
    }

    Ok(summary)
}

//! # Traffic-manager CLI
//!
//! Command-line interface for the traffic-manager library.
//! Builds a road network and a vehicle queue from arguments or a command
//! script and prints shortest paths and departure orders.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use traffic_manager::{ServiceOptions, TrafficService};

mod cli;

/// Command-line interface for traffic-manager
#[derive(Parser)]
#[command(name = "traffic-manager")]
#[command(about = "Road network shortest paths and priority-ordered vehicle departures")]
#[command(long_about = "Builds a road network and a vehicle queue, then answers queries:
  traffic-manager path --route A,B,4 --route B,C,3 --route A,C,10 --from A --to C
  traffic-manager traffic --vehicle V1,North,Car --vehicle V2,South,Ambulance
  traffic-manager run session.txt        # execute a command script
  traffic-manager run -                  # read commands from stdin

Script commands (one per line, '#' starts a comment):
  route FROM TO DISTANCE [CONGESTION]
  vehicle ID LANE CLASS
  path FROM TO
  manage")]
#[command(version = env!("TRAFFIC_MANAGER_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON, one object per line
    #[arg(long, global = true)]
    json: bool,

    /// Reject vehicle classes other than Ambulance, Police, Car and Truck
    #[arg(long, global = true)]
    strict_classes: bool,

    /// Only admit vehicles in the North, South, East and West lanes
    #[arg(long, global = true)]
    restrict_lanes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest path through the given routes
    Path {
        /// Route as FROM,TO,DISTANCE[,CONGESTION]; repeat for more routes
        #[arg(long = "route", value_name = "FROM,TO,DISTANCE[,CONGESTION]")]
        routes: Vec<String>,
        /// Start point
        #[arg(long)]
        from: String,
        /// End point
        #[arg(long)]
        to: String,
    },
    /// Print the departure order of the given vehicles
    Traffic {
        /// Vehicle as ID,LANE,CLASS; repeat for more vehicles
        #[arg(long = "vehicle", value_name = "ID,LANE,CLASS")]
        vehicles: Vec<String>,
    },
    /// Execute a command script
    Run {
        /// Script file, or "-" for stdin (default)
        script: Option<PathBuf>,
    },
}

impl Cli {
    fn options(&self) -> ServiceOptions {
        let options = ServiceOptions {
            strict_classes: self.strict_classes,
            ..Default::default()
        };
        if self.restrict_lanes {
            options.with_default_lanes()
        } else {
            options
        }
    }
}

fn main() {
    if let Err(e) = run() {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    if cli.verbose {
        eprintln!("🚦 Traffic-manager v{} starting...", env!("TRAFFIC_MANAGER_VERSION"));
    }

    let mut service = TrafficService::with_options(cli.options());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Path { routes, from, to } => {
            for spec in routes {
                let command = cli::parse_route_spec(spec)?;
                cli::execute(&mut service, command)
                    .with_context(|| format!("Cannot add route '{spec}'"))?;
            }
            let command = cli::Command::Path {
                from: cli::require_name("from point", from)?,
                to: cli::require_name("to point", to)?,
            };
            let outcome = cli::execute(&mut service, command)?;
            cli::render(&outcome, cli.json, &mut out)?;
        }
        Commands::Traffic { vehicles } => {
            for spec in vehicles {
                let command = cli::parse_vehicle_spec(spec)?;
                cli::execute(&mut service, command)
                    .with_context(|| format!("Cannot add vehicle '{spec}'"))?;
            }
            let outcome = cli::execute(&mut service, cli::Command::Manage)?;
            cli::render(&outcome, cli.json, &mut out)?;
        }
        Commands::Run { script } => {
            let summary = match script {
                Some(path) if path.as_os_str() != "-" => {
                    let file = File::open(path)
                        .with_context(|| format!("Failed to open script {}", path.display()))?;
                    cli::run_script(&mut service, BufReader::new(file), cli.json, &mut out)?
                }
                _ => cli::run_script(&mut service, io::stdin().lock(), cli.json, &mut out)?,
            };
            info!(
                "Script finished: {} commands executed, {} failed",
                summary.executed,
                summary.failures.len()
            );
            if !summary.failures.is_empty() {
                bail!(
                    "{} of {} commands failed",
                    summary.failures.len(),
                    summary.executed + summary.failures.len()
                );
            }
        }
    }

    out.flush()?;
    Ok(())
}

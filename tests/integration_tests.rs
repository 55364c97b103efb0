//! Integration tests for the traffic-manager binary
//!
//! These tests run the compiled CLI end to end: argument parsing, script
//! execution, output rendering and exit codes.

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

/// Helper to run the binary with arguments and optional stdin
fn run_cli(args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_traffic-manager"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn traffic-manager");

    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).expect("Failed to write stdin");
        }
    }

    child.wait_with_output().expect("Failed to get output")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn script_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write script");
    file
}

#[test]
fn test_path_command_finds_detour() {
    let output = run_cli(
        &[
            "path", "--route", "A,B,4", "--route", "B,C,3", "--route", "A,C,10", "--from", "A",
            "--to", "C",
        ],
        None,
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Shortest path from A to C: [A, B, C], Distance = 7.0\n"
    );
}

#[test]
fn test_path_command_json() {
    let output = run_cli(
        &[
            "--json", "path", "--route", "A,B,4,2", "--route", "B,C,3", "--from", "C", "--to",
            "A",
        ],
        None,
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(value["event"], "path");
    assert_eq!(value["nodes"], serde_json::json!(["C", "B", "A"]));
    assert_eq!(value["distance"], 7.0);
}

#[test]
fn test_path_command_unknown_point_fails() {
    let output = run_cli(
        &["path", "--route", "A,B,4", "--from", "A", "--to", "Z"],
        None,
    );
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("unknown point 'Z'"));
}

#[test]
fn test_path_command_rejects_negative_distance() {
    let output = run_cli(
        &["path", "--route", "A,B,-5", "--from", "A", "--to", "B"],
        None,
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid distance -5"));
}

#[test]
fn test_path_command_rejects_malformed_number() {
    let output = run_cli(
        &["path", "--route", "A,B,five", "--from", "A", "--to", "B"],
        None,
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not a number"));
}

#[test]
fn test_traffic_command_orders_by_priority() {
    let output = run_cli(
        &[
            "traffic",
            "--vehicle",
            "Car#1,North,Car",
            "--vehicle",
            "Ambulance#1,South,Ambulance",
            "--vehicle",
            "Car#2,East,Car",
            "--vehicle",
            "Police#1,West,Police",
        ],
        None,
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Vehicles leaving based on priority:\n\
         Vehicle ID: Ambulance#1 from South lane (Type: Ambulance)\n\
         Vehicle ID: Police#1 from West lane (Type: Police)\n\
         Vehicle ID: Car#1 from North lane (Type: Car)\n\
         Vehicle ID: Car#2 from East lane (Type: Car)\n"
    );
}

#[test]
fn test_traffic_command_strict_classes() {
    let output = run_cli(
        &["--strict-classes", "traffic", "--vehicle", "V1,North,Ambulence"],
        None,
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("did you mean 'Ambulance'?"));
}

#[test]
fn test_traffic_command_restrict_lanes() {
    let output = run_cli(
        &["--restrict-lanes", "traffic", "--vehicle", "V1,Sideways,Car"],
        None,
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown lane 'Sideways'"));
}

#[test]
fn test_run_script_from_file() {
    let script = script_file(
        "# evening session\n\
         route A B 4 1\n\
         route B C 3 2\n\
         route A C 10 0\n\
         vehicle V1 North Truck\n\
         vehicle V2 South Police\n\
         path A C\n\
         manage\n\
         manage\n",
    );
    let path = script.path().to_str().unwrap();
    let output = run_cli(&["run", path], None);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Shortest path from A to C: [A, B, C], Distance = 7.0\n"));

    // Managing traffic twice reports the same order both times
    let report = "Vehicles leaving based on priority:\n\
                  Vehicle ID: V2 from South lane (Type: Police)\n\
                  Vehicle ID: V1 from North lane (Type: Truck)\n";
    assert_eq!(text.matches(report).count(), 2);
}

#[test]
fn test_run_script_from_stdin_reports_failures() {
    let output = run_cli(
        &["run", "-"],
        Some("route A B -5 0\nroute A B 5 0\npath A B\npath A Q\n"),
    );
    assert!(!output.status.success());
    assert_eq!(
        stdout(&output),
        "Route added successfully!\nShortest path from A to B: [A, B], Distance = 5.0\n"
    );
    let err = stderr(&output);
    assert!(err.contains("Line 1"));
    assert!(err.contains("Line 4"));
    assert!(err.contains("2 of 4 commands failed"));
}

#[test]
fn test_run_script_json_lines() {
    let output = run_cli(
        &["--json", "run"],
        Some("route X Y 1.5\nvehicle V9 West Bus\nvehicle V1 East Car\nmanage\n"),
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let events: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["event"], "route_added");
    assert_eq!(events[0]["distance"], 1.5);
    assert_eq!(
        events[3]["vehicles"],
        serde_json::json!([
            {"id": "V1", "lane": "East", "class": "Car"},
            {"id": "V9", "lane": "West", "class": "Bus"}
        ])
    );
}

#[test]
fn test_run_missing_script_file() {
    let output = run_cli(&["run", "/nonexistent/traffic-script.txt"], None);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to open script"));
}

#[test]
fn test_version_flag() {
    let output = run_cli(&["--version"], None);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("traffic-manager "));
}

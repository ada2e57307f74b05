//! Integration tests for the hegemon console binary.
//!
//! Tests the full admin-console session flow by spawning the engine
//! process, sending commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_hegemon");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start hegemon");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

#[test]
fn newworld_reports_dimensions_and_seed() {
    let lines = run_engine(&["newworld alpha", "quit"]);
    assert_eq!(lines, vec!["world 20x20 seed alpha"]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["foobar", "nonsense", "quit"]);
    assert!(lines.is_empty());
}

#[test]
fn empty_lines_are_ignored() {
    let lines = run_engine(&["", "  ", "turn", "quit"]);
    assert_eq!(lines, vec!["turn 1"]);
}

#[test]
fn founding_an_empire_reports_its_capital() {
    let lines = run_engine(&["newworld alpha", "empire Aurelia #aa3355", "quit"]);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("empire E1 founded, capital ("), "{}", lines[1]);
}

#[test]
fn duplicate_empire_names_are_rejected() {
    let lines = run_engine(&[
        "newworld alpha",
        "empire Aurelia #aa3355",
        "empire Aurelia #5533aa",
        "quit",
    ]);
    assert_eq!(lines[2], "rejected: empire name already taken");
}

#[test]
fn full_session_from_founding_to_processed_turn() {
    let lines = run_engine(&[
        "newworld alpha",
        "empire Aurelia #aa3355",
        "empire Borealis #5533aa",
        "order 1 trade",
        "order 2 trade",
        "process",
        "turn",
        "quit",
    ]);

    assert!(lines.iter().any(|l| l.starts_with("order O1 accepted for turn 1")));
    assert!(lines.iter().any(|l| l.starts_with("order O2 accepted for turn 1")));
    assert!(lines.iter().any(|l| l.starts_with("turn 1 processed: 2 orders")));
    assert_eq!(lines.last().map(String::as_str), Some("turn 2"));
}

#[test]
fn invalid_orders_report_the_reason() {
    let lines = run_engine(&[
        "newworld alpha",
        "empire Aurelia #aa3355",
        "order 1 expand 19 19",
        "order 2 trade",
        "quit",
    ]);

    assert!(lines
        .iter()
        .any(|l| l == "rejected: target tile must be adjacent to owned territory"));
    assert!(lines.iter().any(|l| l == "rejected: empire not found"));
}

#[test]
fn processing_twice_reports_already_processed() {
    let lines = run_engine(&[
        "newworld alpha",
        "empire Aurelia #aa3355",
        "process",
        "process 1",
        "quit",
    ]);
    assert!(lines.iter().any(|l| l.starts_with("turn 1 processed:")));
    assert!(lines.iter().any(|l| l == "turn 1 already processed"));
}

#[test]
fn catch_up_processes_each_missed_turn() {
    let lines = run_engine(&[
        "newworld alpha",
        "empire Aurelia #aa3355",
        "process 3",
        "turn",
        "quit",
    ]);
    let processed: Vec<&String> =
        lines.iter().filter(|l| l.contains(" processed:")).collect();
    assert_eq!(processed.len(), 3);
    assert_eq!(lines.last().map(String::as_str), Some("turn 4"));
}

#[test]
fn log_filters_by_empire() {
    let lines = run_engine(&[
        "newworld alpha",
        "empire Aurelia #aa3355",
        "empire Borealis #5533aa",
        "process",
        "log 1",
        "quit",
    ]);

    let log_lines: Vec<&String> = lines.iter().filter(|l| l.starts_with("[T")).collect();
    assert!(!log_lines.is_empty(), "turn 1 should narrate upkeep for empire 1");
    for line in log_lines {
        assert!(line.starts_with("[T1] E1 "), "{}", line);
    }
}

#[test]
fn dump_round_trips_through_json() {
    let lines = run_engine(&["newworld alpha", "empire Aurelia #aa3355", "dump", "quit"]);
    let json = lines.last().expect("dump should print one line");
    let world: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(world["tiles"].as_array().unwrap().len(), 400);
    assert_eq!(world["empires"].as_object().unwrap().len(), 1);
}

#[test]
fn identical_sessions_dump_identical_worlds() {
    let session = &[
        "newworld determinism",
        "empire Aurelia #aa3355",
        "empire Borealis #5533aa",
        "order 1 trade",
        "process 3",
        "dump",
        "quit",
    ];
    let a = run_engine(session);
    let b = run_engine(session);
    assert_eq!(a.last(), b.last());
}

#[test]
fn eof_exits_cleanly() {
    // No quit command; just close stdin
    let lines = run_engine(&["newworld alpha", "turn"]);
    assert_eq!(lines.len(), 2);
}

//! Hegemon -- a deterministic turn engine for an asynchronous strategy game.
//!
//! This binary reads admin commands from stdin and writes responses to
//! stdout: world generation, empire founding, order submission, and the
//! nightly turn pass.

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;

use hegemon::command::parse_command;
use hegemon::engine::Engine;

/// Runs the console loop, reading commands from stdin and writing
/// responses to stdout.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::default();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        if !engine.handle(cmd, &mut out) {
            break;
        }
        if out.flush().is_err() {
            break;
        }
    }
}

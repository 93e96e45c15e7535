//! Invokes the BDD test runner and captures its output.
//!
//! The runner exits non-zero when scenarios have undefined or pending steps.
//! That is the signal we are after, not a failure: as long as the process
//! produced stdout, the captured text is returned for snippet extraction.
//! A spawn failure or a silent non-zero exit is a genuine error.

use crate::config::Config;
use crate::error::{FeatsyncError, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Split the configured runner command line into program + args.
fn split_command(runner: &str) -> Result<(String, Vec<String>)> {
    let mut parts = runner.split_whitespace().map(str::to_string);
    let program = parts.next().ok_or(FeatsyncError::RunnerCommandEmpty)?;
    Ok((program, parts.collect()))
}

/// Run the configured test runner from `root` and return its stdout.
pub fn run(root: &Path, config: &Config) -> Result<String> {
    let (program, args) = split_command(&config.runner)?;

    // Resolve up front so a missing runner is reported by name instead of a
    // bare ENOENT from spawn.
    which::which(&program).map_err(|_| FeatsyncError::RunnerNotFound(program.clone()))?;

    tracing::debug!(runner = %config.runner, "invoking test runner");

    let output = Command::new(&program)
        .args(&args)
        .current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| FeatsyncError::RunnerSpawnFailed(e.to_string()))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if !output.status.success() && stdout.is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let hint = stderr.chars().take(500).collect::<String>();
        return Err(FeatsyncError::RunnerFailed(hint));
    }

    Ok(stdout)
}

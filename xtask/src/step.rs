use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// How a failing step affects the overall task.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Abort the task.
    Fatal,
    /// Report and carry on.
    Warn,
}

/// Run `cargo <args>` as one reported step.
///
/// Returns the captured output on success, `None` when a `Warn` step fails.
pub fn cargo(label: &str, args: &[&str], severity: Severity) -> Result<Option<Output>> {
    println!("{}", format!("  {label}...").cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to spawn cargo for {label}"))?;

    if output.status.success() {
        println!(
            "{}",
            format!("  ✓ {label} passed in {:.2}s", start.elapsed().as_secs_f64()).green()
        );
        println!();
        return Ok(Some(output));
    }

    match severity {
        Severity::Fatal => {
            eprintln!("{}", format!("  ✗ {label} failed").red().bold());
            eprintln!();
            dump(&output);
            anyhow::bail!("{label} failed");
        }
        Severity::Warn => {
            eprintln!("{}", format!("  ⚠ {label} reported problems").yellow().bold());
            dump(&output);
            println!();
            Ok(None)
        }
    }
}

fn dump(output: &Output) {
    for stream in [&output.stdout, &output.stderr] {
        for line in String::from_utf8_lossy(stream).lines() {
            eprintln!("  {line}");
        }
    }
}

/// Pull the "test result:" summary out of libtest output.
pub fn test_summary(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .filter_map(|line| line.split("test result:").nth(1))
        .map(str::trim)
        .next_back()
        .map_or_else(|| "(summary not available)".to_string(), str::to_string)
}

use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{self, Severity};

/// Bare-metal target the driver must keep building for.
const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    step::cargo(
        "Driver, no_std + defmt",
        &["check", "-p", "unit-dds", "--target", EMBEDDED_TARGET, "--features", "defmt"],
        Severity::Fatal,
    )?;
    step::cargo(
        "Platform, no_std",
        &["check", "-p", "platform", "--target", EMBEDDED_TARGET, "--no-default-features"],
        Severity::Fatal,
    )?;
    step::cargo(
        "Driver, host + tracing/serde",
        &["check", "-p", "unit-dds", "--features", "std,tracing,serde", "--all-targets"],
        Severity::Fatal,
    )?;
    step::cargo(
        "Clippy",
        &["clippy", "--workspace", "--all-targets", "--all-features", "--", "-D", "warnings"],
        Severity::Warn,
    )?;
    if step::cargo("Formatting", &["fmt", "--all", "--check"], Severity::Warn)?.is_none() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    println!(
        "{}",
        format!("✓ All checks completed in {:.2}s", total_start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();

    Ok(())
}

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;

pub fn run(log: &str) -> Result<()> {
    println!();
    println!("{}", "〰 Running output demo (simulated unit)...".cyan().bold());
    println!();

    // Inherit stdio so the demo's log lines stream straight through.
    let status = Command::new("cargo")
        .args(["run", "-p", "unit-dds", "--example", "output", "--features", "demo"])
        .env("RUST_LOG", log)
        .status()
        .context("Failed to run demo")?;

    if !status.success() {
        anyhow::bail!("Demo exited with {status}");
    }

    println!();
    println!("{}", "✓ Demo finished".green());
    Ok(())
}

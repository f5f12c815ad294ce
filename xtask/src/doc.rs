use anyhow::Result;
use colored::Colorize;

use crate::step::{self, Severity};

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let mut args = vec!["doc", "--workspace", "--exclude", "xtask", "--no-deps", "--features", "unit-dds/serde"];
    if open {
        args.push("--open");
    }
    step::cargo("Documentation", &args, Severity::Fatal)?;

    if !open {
        println!(
            "   {}",
            "Open target/doc/unit_dds/index.html in your browser".dimmed()
        );
        println!(
            "   {}",
            "Or run 'cargo run -p xtask -- doc --open'".dimmed()
        );
        println!();
    }

    Ok(())
}

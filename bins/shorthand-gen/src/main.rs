//! Shorthand Category Generator
//!
//! Scans a source tree for `Object+Category.h` headers and generates the
//! shorthand header/implementation pair for their prefixed methods.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use objc_shorthand::{Generator, ShorthandConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shorthand-gen")]
#[command(about = "Generate shorthand categories for prefixed Objective-C libraries")]
#[command(version)]
struct Cli {
    /// Category header, or a directory to scan for Object+Category.h files
    input: PathBuf,

    /// Base name (no extension) for the generated .h/.m pair
    output: Option<String>,

    /// TOML file overriding the generation defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also rewrite the scanned headers in place with deprecation macros
    #[arg(long)]
    annotate_originals: bool,

    /// With --annotate-originals, report changes without writing them
    #[arg(long)]
    dry_run: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(output) = cli.output else {
        eprintln!("{} Need an output file specified", "✗".red());
        std::process::exit(1);
    };

    let config = match &cli.config {
        Some(path) => ShorthandConfig::load(path)?,
        None => ShorthandConfig::default(),
    };

    let generator = Generator::new(config);
    let mut report = generator.run(&cli.input, Path::new(&output))?;

    if cli.annotate_originals {
        report.annotated = generator.annotate(&cli.input, cli.dry_run)?;
        if cli.dry_run && !report.annotated.is_empty() {
            println!(
                "{}",
                "  (Dry run - original headers left unmodified)".yellow()
            );
        }
    }

    if cli.format == "json" {
        println!("{}", report.to_json()?);
    } else {
        report.print();
    }

    Ok(())
}

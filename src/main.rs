use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use symbios_meristem::{GrowthConfig, Preset, grow};

/// Grow an L-System and draw it as SVG.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Built-in grammar and geometry to start from.
    #[arg(long, value_enum, default_value_t = Preset::Plant, conflicts_with = "config")]
    preset: Preset,

    /// JSON configuration file; replaces the preset entirely.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of generations.
    #[arg(long)]
    generations: Option<u32>,

    /// Override the output file (or directory with --snapshots).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Write one SVG per drawn segment.
    #[arg(long)]
    snapshots: bool,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match GrowthConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "could not load configuration");
                return ExitCode::FAILURE;
            }
        },
        None => GrowthConfig::from_preset(args.preset),
    };
    if let Some(generations) = args.generations {
        config.generations = generations;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if args.snapshots {
        config.snapshot_per_step = true;
    }

    if args.print_config {
        return match config.to_json() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "could not serialize configuration");
                ExitCode::FAILURE
            }
        };
    }

    match grow(&config) {
        Ok(report) => {
            tracing::info!(
                symbols = report.symbols,
                segments = report.segments,
                files = report.files_written,
                output = %config.output.display(),
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "growth failed");
            ExitCode::FAILURE
        }
    }
}

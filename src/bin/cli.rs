//! trackaudit CLI - GPS quality diagnosis for recorded tracks
//!
//! Usage:
//!   trackaudit-cli analyze <file.gpx> [--duration <s>] [--threshold <m>]
//!                          [--geojson <out>] [--json]
//!   trackaudit-cli batch <folder> [--threshold <m>]
//!
//! Reports the time ranges where the GPS signal had no fix or jumped, so
//! those ranges can be cut from the matching video before upload.

use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use trackaudit::{
    analyze_batch, analyze_with_config,
    summary::{format_summary, write_geojson},
    AnalysisConfig, GpxFileProvider, Trajectory, TrajectoryProvider,
};

#[derive(Parser)]
#[command(name = "trackaudit-cli")]
#[command(about = "Find no-fix and jump intervals in GPS tracks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single GPX track
    Analyze {
        /// GPX file to analyze
        file: PathBuf,

        /// Recording duration in seconds (default: span of GPX timestamps)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Jump threshold in meters between consecutive points
        #[arg(short, long, default_value = "15.0")]
        threshold: f64,

        /// Write a GeoJSON map layer to this path
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// Print the full report as JSON instead of the text summary
        #[arg(long)]
        json: bool,
    },

    /// Analyze every GPX file in a folder (durations from timestamps)
    Batch {
        /// Folder containing GPX files
        folder: PathBuf,

        /// Jump threshold in meters between consecutive points
        #[arg(short, long, default_value = "15.0")]
        threshold: f64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let result = match cli.command {
        Commands::Analyze {
            file,
            duration,
            threshold,
            geojson,
            json,
        } => run_analyze(&file, duration, threshold, geojson.as_deref(), json),
        Commands::Batch { folder, threshold } => run_batch(&folder, threshold),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Analyze one file and print the diagnosis
fn run_analyze(
    file: &Path,
    duration: Option<f64>,
    threshold: f64,
    geojson: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut provider = GpxFileProvider::new(file);
    if let Some(seconds) = duration {
        provider = provider.with_duration(seconds);
    }
    let (trajectory, info) = provider.load_with_info()?;
    let config = AnalysisConfig::default().with_jump_threshold(threshold);
    let report = analyze_with_config(&trajectory, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", "=".repeat(60));
        println!("File:     {}", file.display());
        if let Some(name) = &info.name {
            println!("Track:    {}", name);
        }
        if let Some(start) = info.start_time {
            println!("Start:    {}", start);
        }
        println!("Points:   {}", trajectory.len());
        println!("Duration: {:.2}s", trajectory.duration_seconds);
        println!("{}", "=".repeat(60));
        println!("{}", format_summary(&report));
    }

    if let Some(path) = geojson {
        write_geojson(&report, File::create(path)?)?;
        println!("\n[Export] GeoJSON written to: {}", path.display());
    }

    Ok(())
}

/// Analyze all GPX files in a folder
fn run_batch(folder: &Path, threshold: f64) -> Result<(), Box<dyn std::error::Error>> {
    let mut trajectories: Vec<(String, Trajectory)> = Vec::new();

    for entry in fs::read_dir(folder)?.flatten() {
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "gpx") {
            let id = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();
            match GpxFileProvider::new(&path).load() {
                Ok(trajectory) => trajectories.push((id, trajectory)),
                Err(e) => eprintln!("  [ERR] {}: {}", id, e),
            }
        }
    }
    trajectories.sort_by(|a, b| a.0.cmp(&b.0));

    let config = AnalysisConfig::default().with_jump_threshold(threshold);
    for (id, result) in analyze_batch(&trajectories, &config) {
        match result {
            Ok(report) if report.is_clean() => println!("  [OK]   {}", id),
            Ok(report) => {
                println!(
                    "  [WARN] {} - {} range(s), {:.2}s flagged",
                    id,
                    report.invalid_ranges.len(),
                    report.invalid_seconds()
                );
                for range in &report.invalid_ranges {
                    println!("           {:.2}s ~ {:.2}s", range.start_seconds, range.end_seconds);
                }
            }
            Err(e) => println!("  [ERR]  {} - {}", id, e),
        }
    }

    Ok(())
}

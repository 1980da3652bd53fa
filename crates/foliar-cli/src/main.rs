//! Command-line front end: decode a photo, measure it once, persist the
//! evidence and append a log record. The measurement core neither reads
//! nor writes files; all I/O lives here.

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::LevelFilter;
use serde::Serialize;

use foliar::{measure, MeasurementConfig};

/// Estimate leaf surface area from a photograph.
#[derive(Parser, Debug)]
#[command(name = "foliar")]
#[command(
    about = "Measure leaf area from a photo, marker-calibrated when possible",
    long_about = None
)]
struct Args {
    /// Input image file
    #[arg(short, long)]
    input: PathBuf,

    /// Directory receiving the original and annotated copies
    #[arg(short, long, default_value = "measurements")]
    output_dir: PathBuf,

    /// Measurement log (JSON lines, appended)
    #[arg(short, long, default_value = "measurements/log.jsonl")]
    log_file: PathBuf,

    /// Physical side length of the calibration marker, cm
    #[arg(short, long, default_value_t = 5.0)]
    marker_size: f64,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct LogRecord {
    timestamp: String,
    area_cm2: f64,
    calibrated: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = foliar::core::init_with_level(level);

    let img = image::open(&args.input)
        .with_context(|| format!("cannot read image {}", args.input.display()))?
        .to_rgb8();

    let cfg = MeasurementConfig {
        marker_side_cm: args.marker_size,
        ..MeasurementConfig::default()
    };
    let result = measure(&img, &cfg)?;

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("cannot create {}", args.output_dir.display()))?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let original = args.output_dir.join(format!("original_{stamp}.png"));
    let annotated = args.output_dir.join(format!("annotated_{stamp}.png"));
    img.save(&original)
        .with_context(|| format!("cannot write {}", original.display()))?;
    result
        .annotated
        .save(&annotated)
        .with_context(|| format!("cannot write {}", annotated.display()))?;

    append_log(&args.log_file, result.area_cm2, result.calibrated)?;

    let how = if result.calibrated {
        "marker-calibrated"
    } else {
        "manual estimate"
    };
    println!("{:.2} cm2 ({how})", result.area_cm2);
    println!("annotated image: {}", annotated.display());

    Ok(())
}

fn append_log(path: &PathBuf, area_cm2: f64, calibrated: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
    }
    let record = LogRecord {
        timestamp: Local::now().to_rfc3339(),
        area_cm2,
        calibrated,
    };
    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    writeln!(log, "{}", serde_json::to_string(&record)?)?;
    Ok(())
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// qrscan — QR reader demonstration
//
// Entry point. Initialises logging, builds the reader from an optional config
// file, reads one image and prints what was found.

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use qrscan_core::ScanConfig;
use qrscan_image::ImageQrReader;

/// Image read when no path is given on the command line.
const DEFAULT_IMAGE: &str = "image (2).png";

#[derive(Parser)]
#[command(name = "qrscan", version, about = "Read the QR codes in an image")]
struct Cli {
    /// Image to scan.
    #[arg(default_value = DEFAULT_IMAGE)]
    image: PathBuf,

    /// Print the decoded records as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// JSON scan configuration (kernel sizes, threshold constant, stages).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match ScanConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "could not load scan config");
                return ExitCode::from(2);
            }
        },
        None => ScanConfig::default(),
    };

    let reader = match ImageQrReader::new(config) {
        Ok(reader) => reader,
        Err(e) => {
            tracing::error!(error = %e, "invalid scan config");
            return ExitCode::from(2);
        }
    };

    if cli.json {
        let records = reader.read(&cli.image);
        match serde_json::to_string_pretty(&records) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialise results");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", report::header(&cli.image));
        let records = reader.read(&cli.image);
        print!("{}", report::render(&records));
    }

    ExitCode::SUCCESS
}

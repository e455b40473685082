// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: export a BIM scene snapshot to BIM-JSON
//!
//! Usage:
//!   bim-json <scene.json> [--output <file.json>] [--chord-tolerance <f64>]
//!
//! Without `--output` the file is written next to the input, named after
//! the document title (`<stem>.json`, or `Untitled.json`).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bim_json_core::{HostDocument, SceneDocument};
use bim_json_export::{default_output_name, ExportConfig, Exporter};
use bim_json_geometry::PlanarKernel;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq)]
struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
    chord_tolerance: Option<f64>,
}

fn print_usage() {
    println!("Usage: bim-json <scene.json> [options]");
    println!();
    println!("Options:");
    println!("  --output <file>           Output path (default: <document stem>.json next to the input)");
    println!("  --chord-tolerance <f64>   Maximum arc chord deviation (default: 0.01)");
    println!("  -h, --help                Show this help");
    println!();
    println!("Environment:");
    println!("  BIM_JSON_CHORD_TOLERANCE, BIM_JSON_COORD_PRECISION,");
    println!("  BIM_JSON_COORD_WIDTH, BIM_JSON_INDEX_WIDTH, RUST_LOG");
}

/// Parse command line arguments; `None` when help was requested
fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let Some(first) = args.get(1) else {
        return Ok(None);
    };
    if first == "--help" || first == "-h" {
        return Ok(None);
    }

    let mut parsed = Args {
        input: PathBuf::from(first),
        output: None,
        chord_tolerance: None,
    };

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--output" => {
                let value = rest.next().context("--output needs a path")?;
                parsed.output = Some(PathBuf::from(value));
            }
            "--chord-tolerance" => {
                let value = rest.next().context("--chord-tolerance needs a value")?;
                let tolerance: f64 = value
                    .parse()
                    .with_context(|| format!("Invalid chord tolerance '{}'", value))?;
                if !(tolerance.is_finite() && tolerance > 0.0) {
                    bail!("Chord tolerance must be positive, got {}", tolerance);
                }
                parsed.chord_tolerance = Some(tolerance);
            }
            other => bail!("Unknown option: {}", other),
        }
    }

    Ok(Some(parsed))
}

fn output_path(args: &Args, title: &str) -> PathBuf {
    match &args.output {
        Some(path) => path.clone(),
        None => args
            .input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(default_output_name(title)),
    }
}

fn run(args: Args) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Cannot read scene '{}'", args.input.display()))?;
    let document: SceneDocument = serde_json::from_str(&text)
        .with_context(|| format!("Cannot parse scene '{}'", args.input.display()))?;

    let output = output_path(&args, document.title());
    if output == args.input {
        bail!(
            "Output '{}' would overwrite the input scene, pass --output",
            output.display()
        );
    }

    let mut config = ExportConfig::from_env();
    if let Some(tolerance) = args.chord_tolerance {
        config.chord_tolerance = tolerance;
    }
    let kernel = PlanarKernel::with_settings(config.kernel_settings());

    tracing::info!(
        input = %args.input.display(),
        output = %output.display(),
        elements = document.element_count(),
        chord_tolerance = config.chord_tolerance,
        "Starting export"
    );

    let report = Exporter::new(&document, &kernel)
        .with_config(config)
        .export_to_path(&output)
        .with_context(|| format!("Export to '{}' failed", output.display()))?;

    print!("{}", report.summary());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    match parse_args(&args)? {
        Some(args) => run(args),
        None => {
            print_usage();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        std::iter::once("bim-json")
            .chain(items.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn help_and_empty() {
        assert_eq!(parse_args(&argv(&[])).unwrap(), None);
        assert_eq!(parse_args(&argv(&["--help"])).unwrap(), None);
        assert_eq!(parse_args(&argv(&["-h"])).unwrap(), None);
    }

    #[test]
    fn options() {
        let args = parse_args(&argv(&[
            "scene.json",
            "--output",
            "out/model.json",
            "--chord-tolerance",
            "0.005",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(args.input, PathBuf::from("scene.json"));
        assert_eq!(args.output, Some(PathBuf::from("out/model.json")));
        assert_eq!(args.chord_tolerance, Some(0.005));
    }

    #[test]
    fn bad_options() {
        assert!(parse_args(&argv(&["scene.json", "--output"])).is_err());
        assert!(parse_args(&argv(&["scene.json", "--chord-tolerance", "abc"])).is_err());
        assert!(parse_args(&argv(&["scene.json", "--chord-tolerance", "-1"])).is_err());
        assert!(parse_args(&argv(&["scene.json", "--verbose"])).is_err());
    }

    #[test]
    fn default_output_sits_next_to_input() {
        let args = parse_args(&argv(&["data/snapshots/scene.json"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            output_path(&args, "C:/projects/Tower.rvt"),
            PathBuf::from("data/snapshots/Tower.json")
        );
        assert_eq!(
            output_path(&args, ""),
            PathBuf::from("data/snapshots/Untitled.json")
        );
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: build a demo solid, construct its AAG and print it.
//!
//! Usage:
//!   aag-dump [--shape box|l-prism|cylinder] [--exclude 1,2] [--json]
//!
//! Graph options come from the environment (`AAG_ALLOW_SMOOTH`,
//! `AAG_SMOOTH_TOLERANCE_DEG`, `AAG_CACHED_MAPS`), logging from `RUST_LOG`.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use brep_aag::{Aag, AagConfig, Feature, PlanarDihedralClassifier, Result, Solid};

const L_PROFILE: [[f64; 2]; 6] = [
    [0.0, 0.0],
    [2.0, 0.0],
    [2.0, 1.0],
    [1.0, 1.0],
    [1.0, 2.0],
    [0.0, 2.0],
];

struct Options {
    shape: String,
    exclude: Feature,
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info,brep_aag=debug".into()))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {message}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "aag-dump failed");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> std::result::Result<Option<Options>, String> {
    let mut options = Options {
        shape: "box".to_string(),
        exclude: Feature::new(),
        json: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(None),
            "--json" => options.json = true,
            "--shape" => {
                i += 1;
                options.shape = args.get(i).ok_or("--shape needs a value")?.clone();
            }
            "--exclude" => {
                i += 1;
                let list = args.get(i).ok_or("--exclude needs a value")?;
                for item in list.split(',').filter(|s| !s.trim().is_empty()) {
                    let id = item
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| format!("invalid face id '{item}'"))?;
                    options.exclude.add(id);
                }
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
        i += 1;
    }

    Ok(Some(options))
}

fn build_solid(shape: &str) -> Result<Solid> {
    let mut solid = Solid::new();
    match shape {
        "l-prism" => {
            solid.make_prism(&L_PROFILE, 0.0, 1.0)?;
        }
        "cylinder" => {
            solid.make_cylinder([0.0, 0.0, 0.0], 1.0, 2.0)?;
        }
        other => {
            if other != "box" {
                tracing::warn!(shape = other, "Unknown shape, using box");
            }
            solid.make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])?;
        }
    }
    Ok(solid)
}

fn run(options: &Options) -> Result<()> {
    let config = AagConfig::from_env();
    tracing::info!(
        shape = %options.shape,
        allow_smooth = config.allow_smooth,
        smooth_tolerance_deg = config.smooth_tolerance.to_degrees(),
        "Building AAG"
    );

    let solid = build_solid(&options.shape)?;
    let mut aag = Aag::build(&solid, &PlanarDihedralClassifier, &[], config);

    if !options.exclude.is_empty() {
        aag.remove(&options.exclude);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if options.json {
        writeln!(out, "{}", aag.dump_json()?)?;
        return Ok(());
    }

    aag.dump(&mut out)?;
    writeln!(out)?;
    for (i, component) in aag.all_connected_components().iter().enumerate() {
        writeln!(out, "Component {}: {component}", i + 1)?;
    }
    writeln!(out, "Convex-only:  {}", aag.find_convex_only())?;
    writeln!(out, "Concave-only: {}", aag.find_concave_only())?;
    Ok(())
}

fn print_usage() {
    println!("aag-dump - print the attributed adjacency graph of a demo solid");
    println!();
    println!("Usage: aag-dump [options]");
    println!();
    println!("Options:");
    println!("  --shape <name>    box (default), l-prism or cylinder");
    println!("  --exclude <ids>   comma-separated face ids to remove first");
    println!("  --json            print the graph as JSON");
    println!("  -h, --help        show this help");
}

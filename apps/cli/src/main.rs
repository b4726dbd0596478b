// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! hexsplit: separate a hexahedral mesh and export VTK views
//!
//! Usage:
//!   hexsplit [<mesh-file>] [--demo NX NY NZ] [--output-dir DIR]
//!            [--shrink F] [--expand D] [--parallel] [--threads N]
//!            [--summary-json PATH] [--save-input PATH] [--log-json]
//!
//! Without an input the built-in two-cube mesh is used.

mod config;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use hexsplit_meshio::{read_mesh_file, write_mesh, write_vtk_file, VtkOptions};
use hexsplit_separation::generate::{structured_grid, two_element_example};
use hexsplit_separation::{separate_with, HexMesh, SeparationOptions, SeparationSummary};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use config::{Config, MeshSource};

const ORIGINAL_FILE: &str = "original_mesh.vtk";
const DUPLICATED_FILE: &str = "duplicated_mesh.vtk";
const INTERFACES_FILE: &str = "interfaces.vtk";

/// Machine-readable run report.
#[derive(Debug, Serialize)]
struct Report<'a> {
    input: String,
    input_nodes: usize,
    input_elements: usize,
    summary: SeparationSummary,
    options: SeparationOptions,
    elapsed_ms: u128,
    outputs: Vec<&'a str>,
}

fn print_usage() {
    eprintln!("hexsplit - separate a hexahedral mesh into independent elements");
    eprintln!();
    eprintln!("Usage: hexsplit [<mesh-file>] [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --demo NX NY NZ      Generate an NX x NY x NZ block instead of reading a file");
    eprintln!("  --output-dir DIR     Directory for the VTK files (default: .)");
    eprintln!("  --shrink F           Shrink factor for the separated views (default: 0.75)");
    eprintln!("  --expand D           Separation of interface sides (default: 0)");
    eprintln!("  --parallel           Run the face-mate search on the thread pool");
    eprintln!("  --threads N          Worker threads for --parallel");
    eprintln!("  --summary-json PATH  Write a JSON report");
    eprintln!("  --save-input PATH    Write the input mesh in text form");
    eprintln!("  --log-json           JSON log output");
    eprintln!();
    eprintln!("Environment: HEXSPLIT_OUTPUT_DIR, HEXSPLIT_SHRINK, HEXSPLIT_EXPAND,");
    eprintln!("  HEXSPLIT_PARALLEL, HEXSPLIT_WORKER_THREADS, HEXSPLIT_SUMMARY_JSON,");
    eprintln!("  HEXSPLIT_LOG_JSON, RUST_LOG");
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
        "hexsplit=info,hexsplit_separation=info,hexsplit_meshio=info".into()
    }));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).pretty().init();
    }
}

fn load_mesh(source: &MeshSource) -> Result<(String, HexMesh)> {
    match source {
        MeshSource::File(path) => {
            let mesh = read_mesh_file(path)
                .with_context(|| format!("failed to read mesh from {}", path.display()))?;
            Ok((path.display().to_string(), mesh))
        }
        &MeshSource::Grid(nx, ny, nz) => {
            Ok((format!("grid {nx}x{ny}x{nz}"), structured_grid(nx, ny, nz, 1.0)))
        }
        MeshSource::Example => Ok(("two-element example".into(), two_element_example())),
    }
}

fn write_report(path: &Path, report: &Report<'_>) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote summary");
    Ok(())
}

fn run(config: Config) -> Result<()> {
    if config.parallel_search {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .build_global()
            .context("failed to configure the worker pool")?;
    }

    let (input, mesh) = load_mesh(&config.source)?;
    tracing::info!(
        input = %input,
        nodes = mesh.node_count(),
        elements = mesh.element_count(),
        "Loaded mesh"
    );

    if let Some(path) = &config.save_input {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_mesh(BufWriter::new(file), &mesh)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let options = SeparationOptions {
        parallel_search: config.parallel_search,
        ..SeparationOptions::default()
    };
    let start = Instant::now();
    let separated = separate_with(&mesh, &options).context("separation failed")?;
    let elapsed_ms = start.elapsed().as_millis();
    let summary = separated.summary();
    println!("{summary}");

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("failed to create output directory {}", config.output_dir.display())
    })?;

    let original_path = config.output_dir.join(ORIGINAL_FILE);
    write_vtk_file(
        &original_path,
        &mesh.nodes,
        &mesh.elements,
        &VtkOptions {
            title: "Original Mesh".into(),
            ..VtkOptions::default()
        },
    )
    .with_context(|| format!("failed to write {}", original_path.display()))?;

    let duplicated_path = config.output_dir.join(DUPLICATED_FILE);
    write_vtk_file(
        &duplicated_path,
        &separated.nodes,
        &separated.elements,
        &VtkOptions {
            title: "Duplicated Mesh".into(),
            shrink_factor: config.shrink_factor,
            ..VtkOptions::default()
        },
    )
    .with_context(|| format!("failed to write {}", duplicated_path.display()))?;

    let interfaces_path = config.output_dir.join(INTERFACES_FILE);
    write_vtk_file(
        &interfaces_path,
        &separated.nodes,
        &separated.interfaces,
        &VtkOptions {
            title: "Interface Elements".into(),
            shrink_factor: config.shrink_factor,
            expand_distance: config.expand_distance,
        },
    )
    .with_context(|| format!("failed to write {}", interfaces_path.display()))?;

    if let Some(path) = &config.summary_json {
        let report = Report {
            input,
            input_nodes: mesh.node_count(),
            input_elements: mesh.element_count(),
            summary,
            options,
            elapsed_ms,
            outputs: vec![ORIGINAL_FILE, DUPLICATED_FILE, INTERFACES_FILE],
        };
        write_report(path, &report)?;
    }

    println!(
        "Wrote {}, {} and {} to {}. Open them in ParaView or VisIt.",
        ORIGINAL_FILE,
        DUPLICATED_FILE,
        INTERFACES_FILE,
        config.output_dir.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let Some(config) = Config::from_env().with_args(std::env::args().skip(1))? else {
        print_usage();
        return Ok(());
    };

    init_tracing(config.log_json);
    run(config)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver configuration: environment defaults overridden by arguments.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Where the input mesh comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshSource {
    /// A mesh file in the plain-text format.
    File(PathBuf),
    /// A generated `nx × ny × nz` block.
    Grid(usize, usize, usize),
    /// The built-in two-cube mesh.
    Example,
}

/// Driver configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: MeshSource,
    /// Directory receiving the VTK files.
    pub output_dir: PathBuf,
    /// Shrink factor for the duplicated mesh and interface views.
    pub shrink_factor: f64,
    /// Separation of interface sides in the interface view.
    pub expand_distance: f64,
    /// Run the mate search on the rayon pool.
    pub parallel_search: bool,
    /// Number of rayon worker threads.
    pub worker_threads: usize,
    /// Optional JSON summary output.
    pub summary_json: Option<PathBuf>,
    /// Write the input mesh in text form (useful with generated meshes).
    pub save_input: Option<PathBuf>,
    /// Emit JSON log lines instead of the pretty format.
    pub log_json: bool,
}

impl Config {
    /// Load defaults from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with values taken from `lookup` where present and valid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            source: MeshSource::Example,
            output_dir: lookup("HEXSPLIT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            shrink_factor: lookup("HEXSPLIT_SHRINK")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.75),
            expand_distance: lookup("HEXSPLIT_EXPAND")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
            parallel_search: lookup("HEXSPLIT_PARALLEL")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
            worker_threads: lookup("HEXSPLIT_WORKER_THREADS")
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or_else(num_cpus::get),
            summary_json: lookup("HEXSPLIT_SUMMARY_JSON").map(PathBuf::from),
            save_input: None,
            log_json: lookup("HEXSPLIT_LOG_JSON")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
        }
    }

    /// Applies command-line arguments (without the program name) on top of
    /// `self`. Returns `None` when help was requested.
    pub fn with_args<I>(mut self, args: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "--demo" => {
                    let nx = parse_value(&mut args, "--demo")?;
                    let ny = parse_value(&mut args, "--demo")?;
                    let nz = parse_value(&mut args, "--demo")?;
                    self.source = MeshSource::Grid(nx, ny, nz);
                }
                "--output-dir" => self.output_dir = PathBuf::from(next_value(&mut args, &arg)?),
                "--shrink" => self.shrink_factor = parse_value(&mut args, "--shrink")?,
                "--expand" => self.expand_distance = parse_value(&mut args, "--expand")?,
                "--parallel" => self.parallel_search = true,
                "--threads" => self.worker_threads = parse_value(&mut args, "--threads")?,
                "--summary-json" => {
                    self.summary_json = Some(PathBuf::from(next_value(&mut args, &arg)?))
                }
                "--save-input" => self.save_input = Some(PathBuf::from(next_value(&mut args, &arg)?)),
                "--log-json" => self.log_json = true,
                other if other.starts_with('-') => bail!("unknown option: {other}"),
                path => {
                    if self.source != MeshSource::Example {
                        bail!("more than one input given");
                    }
                    self.source = MeshSource::File(PathBuf::from(path));
                }
            }
        }

        if self.worker_threads == 0 {
            bail!("--threads must be at least 1");
        }
        Ok(Some(self))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn next_value(args: &mut impl Iterator<Item = String>, option: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{option} requires a value"))
}

fn parse_value<T>(args: &mut impl Iterator<Item = String>, option: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = next_value(args, option)?;
    raw.parse()
        .with_context(|| format!("invalid value for {option}: {raw}"))
}

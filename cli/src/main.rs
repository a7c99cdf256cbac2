//! CLI for generating the low-level HDF5 Cython binding layer.
//!
//! ## Usage
//!
//! ```bash
//! # Regenerate the three artifacts into the current directory
//! h5gen h5py/api_functions.txt
//!
//! # Write artifacts into a build directory, with per-function logging
//! h5gen api_functions.txt --out-dir build/ -vv
//! ```
//!
//! The three artifacts (`_hdf5.pxd`, `defs.pxd`, `defs.pyx`) are only
//! written after a fully successful run; a grammar or classification error
//! leaves the output directory untouched.

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use h5gen_lib::generate;

/// Generate Cython error-wrapper bindings from a function-description file
#[derive(Parser)]
#[command(name = "h5gen", version, about, long_about = None)]
struct Cli {
    /// Function-description file (one function per line, `#` comments)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory receiving _hdf5.pxd, defs.pxd and defs.pyx
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let input = fs::read_to_string(&cli.input)?;
    let bindings = generate(&input)?;

    fs::create_dir_all(&cli.out_dir)?;
    fs::write(cli.out_dir.join("_hdf5.pxd"), &bindings.raw_defs)?;
    fs::write(cli.out_dir.join("defs.pxd"), &bindings.wrapper_defs)?;
    fs::write(cli.out_dir.join("defs.pyx"), &bindings.wrapper_impls)?;
    info!(out_dir = %cli.out_dir.display(), "artifacts written");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

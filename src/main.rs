use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::debug;

use gltrace_codegen::{hooks, HeaderGenerator, SourceGenerator};

/// Generates functionhooks.gen.h and functionhooks.gen.cpp from the hook
/// catalog.
#[derive(Parser)]
#[command(name = "gltrace-codegen", version)]
struct Args {
    /// Directory the two generated files are written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let command_line = env::args().collect::<Vec<_>>().join(" ");

    let registry = hooks::catalog().into_registry()?;
    debug!(
        "catalog ingested: {} entry points, {} state classes",
        registry.entries.len(),
        registry.state_classes.len()
    );

    // Both strings are generated before either file is written; a failed run
    // cannot leave a mismatched header/cpp pair behind.
    let mut header = Vec::new();
    registry.write_bindings(HeaderGenerator::new(&command_line), &mut header)?;
    let mut source = Vec::new();
    registry.write_bindings(SourceGenerator::new(&command_line), &mut source)?;

    fs::write(args.out_dir.join("functionhooks.gen.h"), header)?;
    fs::write(args.out_dir.join("functionhooks.gen.cpp"), source)?;
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

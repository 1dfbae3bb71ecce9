//! Apply parameter overrides to a registry snapshot and write the C parameter headers.

use clap::Parser;
use cparams_rs::driver::{dump_values, generate, GenerateOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON registry snapshot
    #[arg(short, long)]
    registry: PathBuf,

    /// Parameter file with `module::name = value` lines
    #[arg(short, long)]
    param_file: Option<PathBuf>,

    /// Output directory for the generated headers
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Print the resulting general parameter values
    #[arg(long)]
    dump: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// `module::name=value` overrides, applied after the parameter file
    overrides: Vec<String>,
}

fn run(args: Args) -> cparams_rs::Result<()> {
    let dump = args.dump;
    let options = GenerateOptions {
        registry: args.registry,
        param_file: args.param_file,
        overrides: args.overrides,
        out: args.out,
    };

    let generated = generate(&options)?;
    if dump {
        print!("{}", dump_values(&generated.registry));
    }
    println!(
        "Wrote {} headers to {}",
        generated.headers.len(),
        options.out.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

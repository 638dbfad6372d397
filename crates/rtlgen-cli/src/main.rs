// rtlgen CLI entry point

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Generate a parameterized RTL module from its template
#[derive(Parser)]
#[command(name = "rtlgen", version, about)]
struct Cli {
    /// Generator module to render (e.g. clock_recovery)
    module: String,

    /// TOML file with the base argument set
    #[arg(short, long)]
    params: PathBuf,

    /// Output path; prints to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log filter, e.g. `debug` (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    if let Err(e) = rtlgen_cli::generate_to(&cli.module, &cli.params, cli.output.as_deref()) {
        tracing::error!("{e:#}");
        process::exit(1);
    }
}

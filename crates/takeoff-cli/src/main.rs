mod commands;
mod output;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "takeoff",
    version,
    about = "Extract estimate line items from PDFs into board-ready CSV tables"
)]
struct Cli {
    /// Directory to scan for PDF files
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Directory the items and subitems tables are written to
    #[arg(long, value_name = "DIR", default_value = "output")]
    out_dir: PathBuf,

    /// Run pdftotext in -layout mode instead of reading order
    #[arg(long)]
    layout: bool,

    /// Process documents in parallel
    #[arg(long)]
    parallel: bool,

    /// Summary format: table (default) or json
    #[arg(short, long, default_value = "table")]
    output: String,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = commands::extract::run(commands::extract::ExtractArgs {
        dir: cli.dir,
        out_dir: cli.out_dir,
        layout: cli.layout,
        parallel: cli.parallel,
        output_format: cli.output,
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

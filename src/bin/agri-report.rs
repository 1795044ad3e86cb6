use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use wdi_agri::config::{DEFAULT_INPUT, ReportConfig};
use wdi_agri::report;

#[derive(Parser, Debug)]
#[command(
    name = "agri-report",
    version,
    about = "Render the agricultural indicator report from a World Bank CSV"
)]
struct Cli {
    /// World Bank bulk CSV (4 metadata lines, then the header row).
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// Directory the charts are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Also export the country-indexed view (CSV) and statistics (JSON) here.
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ReportConfig::default().with_paths(&cli.input, &cli.out_dir);
    config.export_dir = cli.export;

    let outcome = report::run(&config)?;
    eprintln!("Report complete: {} files written", outcome.written.len());
    Ok(())
}

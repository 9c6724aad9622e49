use std::path::PathBuf;

use clap::Parser;

use scrape_software_versions::config::{DEFAULT_LOG_LEVEL, DEFAULT_TABLE_PATH};
use scrape_software_versions::{RunOptions, logging, run};

#[derive(Parser)]
#[command(name = "scrape-software-versions")]
#[command(
    version,
    about = "Collect software versions into a report fragment and a tab-separated table"
)]
struct Cli {
    /// Directory containing the v_*.txt version files
    #[arg(long, default_value = ".")]
    input_dir: PathBuf,

    /// Path of the tab-separated version table
    #[arg(long, default_value = DEFAULT_TABLE_PATH)]
    output: PathBuf,

    /// JSON file with additional tools to scrape
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum level for this tool's own log messages (default: warn)
    #[arg(
        long,
        default_value = DEFAULT_LOG_LEVEL,
        value_parser = ["trace", "debug", "info", "warn", "error", "off"]
    )]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(&cli.log_level, cli.log_file.as_deref())?;

    let options = RunOptions {
        input_dir: cli.input_dir,
        output: cli.output,
        config: cli.config,
    };

    run(&options, &mut std::io::stdout().lock())?;
    Ok(())
}

//! taskgantt CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use taskgantt::core::write_table;
use taskgantt::{chart_from_file, load_tasks, write_html, Config, InputFormat};

/// Render a task export as a Gantt chart
#[derive(Parser, Debug)]
#[command(name = "taskgantt")]
#[command(about = "Render project tasks (JSON export or TSV table) as an HTML Gantt chart", long_about = None)]
#[command(version)]
struct Args {
    /// Task source; `-` reads stdin
    #[arg(value_name = "INPUT", default_value = "tasks.json")]
    input: PathBuf,

    /// Output HTML file (default: from config, else index.html)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Input format: json or tsv (default: from the file extension)
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<InputFormat>,

    /// Path to configuration file (taskgantt.yml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Chart title
    #[arg(short, long)]
    title: Option<String>,

    /// Open the chart in the default browser after writing it
    #[arg(long)]
    open: bool,

    /// Print the normalized task table (TSV) instead of rendering
    #[arg(long)]
    dump_table: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::debug!("taskgantt v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::auto_load().context("Failed to load config")?,
    };
    if let Some(title) = &args.title {
        config.title = title.clone();
    }

    if args.dump_table {
        return dump_table(&args, &config);
    }

    let chart = chart_from_file(&args.input, args.format, &config)?;

    let output = args.output.clone().unwrap_or_else(|| config.output.clone());
    write_html(&chart, &output)?;

    if !args.quiet {
        println!(
            "✓ {} tasks in {} sections → {}",
            chart.rows.len(),
            chart.traces.len(),
            output.display()
        );
    }

    if args.open {
        if let Err(e) = open::that(&output) {
            log::warn!("Could not open {} in a browser: {}", output.display(), e);
        }
    }

    Ok(())
}

/// Print the normalized table to stdout
fn dump_table(args: &Args, config: &Config) -> Result<()> {
    let tasks = load_tasks(&args.input, args.format, config)
        .with_context(|| format!("Failed to load tasks from {}", args.input.display()))?;

    let stdout = std::io::stdout();
    write_table(&tasks, stdout.lock()).context("Failed to write task table")?;
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

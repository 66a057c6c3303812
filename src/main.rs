use anyhow::Context;
use autoux::analyzer::{validate_response, RecordedAnalyzer};
use autoux::output::save_report;
use autoux::{analyze_upload, validate_upload};
use autoux_core::config::Config;
use autoux_core::{parse, ReportBuilder};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "autoux", about = "AutoUX: turn application logs into UX reports")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of ~/.config/autoux/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a log file and print its entries as JSON.
    Parse {
        file: PathBuf,
        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },
    /// Build a report from a saved AI analysis (AIResponse JSON).
    Report {
        response: PathBuf,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Run a log file through the full pipeline using a saved AI analysis.
    Analyze {
        file: PathBuf,
        #[arg(long)]
        response: PathBuf,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    let default_level = if cli.debug { "debug" } else { config.logging.level.as_str() };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Command::Parse { file, pretty } => {
            let (filename, bytes) = read_upload(&file)?;
            validate_upload(&filename, bytes.len() as u64, &config.upload)?;
            let entries = parse(&bytes, &filename)?;
            let json = if pretty {
                serde_json::to_string_pretty(&entries)?
            } else {
                serde_json::to_string(&entries)?
            };
            println!("{json}");
        }
        Command::Report { response, out_dir } => {
            let recording = read_recording(&response)?;
            let response = validate_response(recording)?;
            let generated = ReportBuilder::new().generate_report(&response);
            let dir = out_dir.unwrap_or_else(|| config.report.output_dir.clone());
            let saved = save_report(&generated, &dir, config.report.write_json)?;
            println!("{}", saved.markdown.display());
        }
        Command::Analyze { file, response, out_dir } => {
            let (filename, bytes) = read_upload(&file)?;
            let analyzer = RecordedAnalyzer::new(read_recording(&response)?);
            let generated = analyze_upload(
                &filename,
                &bytes,
                &config.upload,
                &analyzer,
                &ReportBuilder::new(),
            )
            .map_err(|e| anyhow::anyhow!("{e}").context(format!("[{}] analysis failed", e.code())))?;
            let dir = out_dir.unwrap_or_else(|| config.report.output_dir.clone());
            let saved = save_report(&generated, &dir, config.report.write_json)?;
            println!("{}", saved.markdown.display());
        }
    }
    Ok(())
}

fn read_upload(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} is not a file path", path.display()))?;
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok((filename, bytes))
}

fn read_recording(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not JSON", path.display()))
}

use beeline_summary::config::{FileConfig, Overrides, Settings};
use beeline_summary::summary::write::to_pretty_json;
use beeline_summary::{ExecutionSummaries, Result, Trace, Transcript};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "beeline-summary")]
#[command(about = "Beeline execution summary extractor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args)]
struct Inputs {
    /// Config file (defaults to ./config.json when present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Beeline transcript; overrides log_file_path.
    #[arg(long)]
    log: Option<PathBuf>,

    /// 0 = quiet, 1 = trace markers and rows.
    #[arg(short, long)]
    verbosity: Option<u8>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a transcript and write one JSON file per summary.
    Extract {
        #[command(flatten)]
        inputs: Inputs,

        /// Output directory; overrides save_path.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    /// Parse a transcript and print the merged summaries.
    Show {
        #[command(flatten)]
        inputs: Inputs,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Failed to execute script: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.cmd {
        Commands::Extract { inputs, out } => {
            let settings = settings(&inputs, out)?;
            let save_path = settings.require_save_path()?;
            let summaries = extract(&settings)?;
            summaries.write_to_dir(save_path)?;
            log::info!("Parsed summaries have been saved successfully.");
        }
        Commands::Show { inputs } => {
            let settings = settings(&inputs, None)?;
            let summaries = extract(&settings)?;
            println!("{}", to_pretty_json(&summaries)?);
        }
    }

    Ok(())
}

fn settings(inputs: &Inputs, out: Option<PathBuf>) -> Result<Settings> {
    let file = FileConfig::discover(inputs.config.as_deref())?;
    Settings::resolve(
        file,
        Overrides {
            log_file_path: inputs.log.clone(),
            save_path: out,
            verbosity: inputs.verbosity,
        },
    )
}

fn extract(settings: &Settings) -> Result<ExecutionSummaries> {
    let transcript = Transcript::read(&settings.log_file_path)?;
    let summaries = ExecutionSummaries::extract(&transcript, &Trace::from_verbosity(settings.verbosity))?;
    if summaries.is_empty() {
        log::warn!(
            "No execution summaries found in {}",
            settings.log_file_path.display()
        );
    }
    Ok(summaries)
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use klipperkit::{
    find_used_tools, init_logging, parse_startup_temps, GcodeStream, MachineProfile,
    StartPrintProcessor, StartPrintSettings, StartupTemps,
};

#[derive(Parser)]
#[command(name = "klipperkit")]
#[command(about = "Start print macro injection for sliced G-code", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a sliced G-code file with a start print macro
    Process {
        /// Input G-code file
        input: PathBuf,
        /// Output file (defaults to rewriting the input in place)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Script settings file (.toml or .json)
        #[arg(short, long)]
        settings: Option<PathBuf>,
        /// Machine profile file (.toml or .json)
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },
    /// Show what the scanner recovers from a sliced file
    Info {
        /// Input G-code file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    init_logging()?;
    tracing::debug!(
        version = klipperkit::VERSION,
        built = klipperkit::BUILD_DATE,
        "klipperkit starting"
    );

    let cli = Cli::parse();
    match cli.command {
        Commands::Process {
            input,
            output,
            settings,
            profile,
        } => process(&input, output.as_deref(), settings.as_deref(), profile.as_deref()),
        Commands::Info { input } => info(&input),
    }
}

fn process(
    input: &Path,
    output: Option<&Path>,
    settings_path: Option<&Path>,
    profile_path: Option<&Path>,
) -> Result<()> {
    let settings = match settings_path {
        Some(path) => StartPrintSettings::load_from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => StartPrintSettings::default(),
    };
    let profile = match profile_path {
        Some(path) => MachineProfile::load_from_file(path)
            .with_context(|| format!("loading machine profile from {}", path.display()))?,
        None => MachineProfile::single_extruder(),
    };

    let mut stream = GcodeStream::from_file(input)?;
    StartPrintProcessor::new(&settings, &profile).execute(&mut stream);

    let target = output.unwrap_or(input);
    stream.write_to_file(target)?;
    println!("Wrote {}", target.display());

    Ok(())
}

/// Scanner findings for one sliced file, printed as JSON.
#[derive(Serialize)]
struct ScanReport {
    used_tools: Vec<u8>,
    startup: StartupTemps,
}

fn info(input: &Path) -> Result<()> {
    let stream = GcodeStream::from_file(input)?;
    let report = ScanReport {
        used_tools: find_used_tools(&stream),
        startup: parse_startup_temps(&stream),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

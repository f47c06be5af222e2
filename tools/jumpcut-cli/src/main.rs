//! Jumpcut CLI: remove silence from a recording and export an FCPXML project.
//!
//! Usage:
//!   jumpcut plan <MEDIA> <SILENCES>    Show which spans would be cut (and,
//!                                      with --transcript, which takes look bad)
//!   jumpcut cut <MEDIA> <SILENCES>     Write the cut project as FCPXML
//!   jumpcut config show|init           Inspect or create the config file
//!
//! `MEDIA` is the media metadata JSON for the recording; `SILENCES` is either a JSON
//! interval list or an ffmpeg `silencedetect` log.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use jumpcut_common::config::AppConfig;

mod commands;

use commands::CutArgs;

#[derive(Parser)]
#[command(
    name = "jumpcut",
    about = "Cut silence out of recordings and hand the edit to Final Cut Pro",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the cut and print a report without writing a project
    Plan {
        #[command(flatten)]
        cut: CutArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Whisper JSON transcript to review for bad takes
        #[arg(long)]
        transcript: Option<PathBuf>,
    },

    /// Compute the cut and write an FCPXML project
    Cut {
        #[command(flatten)]
        cut: CutArgs,

        /// Output .fcpxml path (default: "<media name><suffix>.fcpxml")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Project name shown in Final Cut Pro
        #[arg(long)]
        name: Option<String>,

        /// Event to place the project in
        #[arg(long)]
        event: Option<String>,

        /// Whisper JSON transcript to re-time and write next to the project
        #[arg(long)]
        subtitles: Option<PathBuf>,

        /// Subtitle format: srt|vtt
        #[arg(long)]
        subtitle_format: Option<String>,
    },

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the effective configuration to the config file
    Init,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    jumpcut_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Plan {
            cut,
            json,
            transcript,
        } => commands::plan::run(&config, cut, json, transcript.as_deref()),
        Commands::Cut {
            cut,
            output,
            name,
            event,
            subtitles,
            subtitle_format,
        } => commands::cut::run(
            &config,
            cut,
            commands::cut::OutputArgs {
                output,
                name,
                event,
                subtitles,
                subtitle_format,
            },
        ),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config, cli.config.as_deref()),
            ConfigAction::Init => commands::config::init(&config, cli.config),
        },
    }
}

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod catalog;
pub mod run;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a playback session against the player worker.
    Run(RunArgs),
    /// Inspect a voice-line metadata file.
    Catalog(CatalogArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args),
        Command::Catalog(args) => catalog::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Metadata file listing playable identifiers.
    #[arg(long, value_name = "FILE", default_value = "audio_metadata.csv")]
    pub metadata: PathBuf,

    /// Player executable to spawn. Omit to attach to an already-running player.
    #[arg(long, value_name = "EXE")]
    pub worker: Option<PathBuf>,

    /// Override the player's listening pipe path.
    #[arg(long, value_name = "PATH")]
    pub player_pipe: Option<PathBuf>,

    /// Override the host's listening pipe path.
    #[arg(long, value_name = "PATH")]
    pub host_pipe: Option<PathBuf>,

    /// Play one recipe after connecting and exit when it completes.
    #[arg(long, value_name = "UUID", conflicts_with = "raw")]
    pub play: Option<String>,

    /// Play a raw audio file after connecting.
    #[arg(long, value_name = "WAV", conflicts_with = "play")]
    pub raw: Option<PathBuf>,

    /// Elevated-status context flag for recipe requests.
    #[arg(long)]
    pub elevated: bool,

    /// Secondary-voice context flag for recipe requests.
    #[arg(long)]
    pub secondary_voice: bool,

    /// Outbound connect attempts before giving up on the player.
    #[arg(long, default_value_t = 10)]
    pub connect_attempts: u32,

    /// Delay in milliseconds before each connect attempt.
    #[arg(long, default_value_t = 100)]
    pub connect_delay_ms: u64,

    /// Maximum seconds to wait for a --play completion.
    #[arg(long, default_value_t = 60)]
    pub play_timeout: u64,
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Metadata file to inspect.
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}

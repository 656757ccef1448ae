mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "voicelines", version, about = "Voice-line playback host")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    match cmd::run(cli.command, format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_subcommand() {
        let cli = Cli::try_parse_from([
            "voicelines",
            "run",
            "--metadata",
            "/tmp/audio_metadata.csv",
            "--play",
            "aaaa-bbbb",
        ])
        .expect("run args should parse");

        assert!(matches!(cli.command, Command::Run(_)));
    }

    #[test]
    fn rejects_play_and_raw_together() {
        let err = Cli::try_parse_from([
            "voicelines",
            "run",
            "--play",
            "aaaa-bbbb",
            "--raw",
            "/tmp/test.wav",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_catalog_subcommand() {
        let cli = Cli::try_parse_from(["voicelines", "catalog", "/tmp/audio_metadata.csv"])
            .expect("catalog args should parse");
        assert!(matches!(cli.command, Command::Catalog(_)));
    }

    #[test]
    fn parses_global_log_options() {
        let cli = Cli::try_parse_from([
            "voicelines",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "version",
        ])
        .expect("global log args should parse");
        assert!(matches!(cli.command, Command::Version(_)));
    }
}

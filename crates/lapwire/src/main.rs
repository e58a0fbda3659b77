mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::LogOptions;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "lapwire", version, about = "Lap-timing transponder monitor")]
struct Cli {
    /// Output format for decoded frames.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    #[command(flatten)]
    logging: LogOptions,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    cli.logging.init();

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
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
    fn parses_decode_subcommand() {
        let cli = Cli::try_parse_from(["lapwire", "decode", "236c014c0005004f000000 15a5"])
            .expect("decode args should parse");
        assert!(matches!(cli.command, Command::Decode(_)));
    }

    #[test]
    fn parses_replay_subcommand() {
        let cli = Cli::try_parse_from([
            "lapwire",
            "replay",
            "capture.txt",
            "--summary",
            "/tmp/laptimes.txt",
            "--event-log",
            "/tmp/laplogs.txt",
        ])
        .expect("replay args should parse");
        assert!(matches!(cli.command, Command::Replay(_)));
    }

    #[test]
    fn rejects_unknown_log_level() {
        Cli::try_parse_from(["lapwire", "--log-level", "chatty", "version"])
            .expect_err("unknown log level should fail");
    }
}

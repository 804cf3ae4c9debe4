mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;
use pcp_frame::Callsign;

use crate::cmd::{parse_callsign, Command};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "pcp", version, about = "PCP radio frame ground-station CLI")]
struct Cli {
    /// Callsign shared with the remote station.
    #[arg(
        long,
        env = "PCP_CALLSIGN",
        default_value = "PLUTON-UPV",
        value_parser = parse_callsign,
        global = true
    )]
    callsign: Callsign,

    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr). PCP_LOG overrides with a filter directive.
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, &cli.callsign, format);

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
    fn parses_send_subcommand() {
        let cli = Cli::try_parse_from([
            "pcp",
            "send",
            "--peer",
            "127.0.0.1:7000",
            "--function",
            "ping",
        ])
        .expect("send args should parse");

        assert!(matches!(cli.command, Command::Send(_)));
    }

    #[test]
    fn rejects_conflicting_payload_args() {
        let err = Cli::try_parse_from([
            "pcp",
            "encode",
            "--function",
            "0x24",
            "--data",
            "hello",
            "--hex",
            "0102",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn rejects_unknown_function_name() {
        let err = Cli::try_parse_from(["pcp", "encode", "--function", "launch"])
            .expect_err("unknown function should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn callsign_is_global() {
        let cli = Cli::try_parse_from(["pcp", "decode", "414200", "--callsign", "AB"])
            .expect("decode args should parse");

        assert_eq!(cli.callsign.as_bytes(), b"AB");
        assert!(matches!(cli.command, Command::Decode(_)));
    }

    #[test]
    fn rejects_empty_callsign() {
        let err = Cli::try_parse_from(["pcp", "--callsign", "", "functions"])
            .expect_err("empty callsign should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}

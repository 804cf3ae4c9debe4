use std::net::SocketAddr;

use clap::{Args, Subcommand, ValueEnum};
use pcp_frame::function::lookup_name;
use pcp_frame::{Callsign, FunctionKind};

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod functions;
pub mod listen;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a frame and print it.
    Encode(EncodeArgs),
    /// Validate and decode a frame given as hex.
    Decode(DecodeArgs),
    /// Transmit a single frame over a UDP radio bridge.
    Send(SendArgs),
    /// Receive and print frames from a UDP radio bridge.
    Listen(ListenArgs),
    /// List the function ID registry.
    Functions(FunctionsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, callsign: &Callsign, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, callsign, format),
        Command::Decode(args) => decode::run(args, callsign, format),
        Command::Send(args) => send::run(args, callsign, format),
        Command::Listen(args) => listen::run(args, callsign, format),
        Command::Functions(args) => functions::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug, Default)]
pub struct PayloadArgs {
    /// Optional data as a UTF-8 string.
    #[arg(long, conflicts_with = "hex")]
    pub data: Option<String>,
    /// Optional data as hex bytes (e.g. 0a1b2c).
    #[arg(long)]
    pub hex: Option<String>,
}

impl PayloadArgs {
    pub fn resolve(&self) -> CliResult<Vec<u8>> {
        if let Some(hex) = &self.hex {
            return parse_hex(hex).map_err(|err| CliError::new(USAGE, format!("--hex: {err}")));
        }
        if let Some(data) = &self.data {
            return Ok(data.as_bytes().to_vec());
        }
        Ok(Vec::new())
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Function ID: a number (decimal or 0x-prefixed) or a registry name.
    #[arg(long, short = 'f', value_parser = parse_function)]
    pub function: u8,
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Received frame as hex bytes.
    pub frame: String,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Address of the radio bridge to transmit to.
    #[arg(long)]
    pub peer: SocketAddr,
    /// Local address to bind.
    #[arg(long, default_value = "0.0.0.0:0")]
    pub bind: SocketAddr,
    /// Function ID: a number (decimal or 0x-prefixed) or a registry name.
    #[arg(long, short = 'f', value_parser = parse_function)]
    pub function: u8,
    #[command(flatten)]
    pub payload: PayloadArgs,
    /// Wait for one response frame and print it.
    #[arg(long)]
    pub wait: bool,
    /// Maximum time to wait for response when --wait is set (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub wait_timeout: String,
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Local address to bind.
    #[arg(long)]
    pub bind: SocketAddr,
    /// Only accept frames from this address.
    #[arg(long)]
    pub peer: Option<SocketAddr>,
    /// Exit after receiving N frames.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum KindArg {
    PublicCommand,
    PublicResponse,
    Acknowledge,
    PrivateCommand,
}

impl KindArg {
    pub fn matches(self, kind: FunctionKind) -> bool {
        matches!(
            (self, kind),
            (KindArg::PublicCommand, FunctionKind::PublicCommand)
                | (KindArg::PublicResponse, FunctionKind::PublicResponse)
                | (KindArg::Acknowledge, FunctionKind::Acknowledge)
                | (KindArg::PrivateCommand, FunctionKind::PrivateCommand)
        )
    }
}

#[derive(Args, Debug, Default)]
pub struct FunctionsArgs {
    /// Only list function IDs of this kind.
    #[arg(long)]
    pub kind: Option<KindArg>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse a function ID given as decimal, `0x` hex, or registry name.
pub fn parse_function(input: &str) -> Result<u8, String> {
    let input = input.trim();
    if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        return u8::from_str_radix(hex, 16)
            .map_err(|err| format!("invalid function ID {input}: {err}"));
    }
    if input.chars().all(|c| c.is_ascii_digit()) && !input.is_empty() {
        return input
            .parse::<u8>()
            .map_err(|err| format!("invalid function ID {input}: {err}"));
    }
    lookup_name(input)
        .map(|info| info.id)
        .ok_or_else(|| format!("unknown function name: {input}"))
}

pub fn parse_callsign(input: &str) -> Result<Callsign, String> {
    input
        .parse::<Callsign>()
        .map_err(|_| format!("callsign must be non-empty ASCII: {input:?}"))
}

/// Parse hex bytes. Whitespace, `:` and `-` separators are ignored.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<u8> = input
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b':' && *b != b'-')
        .collect();
    let digits = digits.strip_prefix(b"0x").unwrap_or(&digits[..]);

    if digits.len() % 2 != 0 {
        return Err("odd number of hex digits".to_string());
    }

    digits
        .chunks_exact(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).map_err(|_| "non-ASCII input".to_string())?;
            u8::from_str_radix(text, 16).map_err(|_| format!("invalid hex byte: {text}"))
        })
        .collect()
}

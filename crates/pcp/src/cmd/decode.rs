use pcp_frame::{decode_frame, Callsign};
use tracing::debug;

use crate::cmd::{parse_hex, DecodeArgs};
use crate::exit::{frame_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: DecodeArgs, callsign: &Callsign, format: OutputFormat) -> CliResult<i32> {
    let wire =
        parse_hex(&args.frame).map_err(|err| CliError::new(USAGE, format!("frame: {err}")))?;
    debug!(len = wire.len(), callsign = %callsign, "decoding frame");

    let frame = decode_frame(callsign.as_bytes(), &wire)
        .map_err(|err| frame_error("decode failed", err))?;

    print_frame(&frame, None, format);
    Ok(SUCCESS)
}

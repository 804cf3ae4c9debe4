use bytes::BytesMut;
use pcp_frame::{encode_frame, Callsign};

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, callsign: &Callsign, format: OutputFormat) -> CliResult<i32> {
    let payload = args.payload.resolve()?;

    let mut wire = BytesMut::new();
    encode_frame(callsign.as_bytes(), args.function, &payload, &mut wire)
        .map_err(|err| frame_error("encode failed", err))?;

    print_encoded(&wire, args.function, format);
    Ok(SUCCESS)
}

use std::time::{Duration, Instant};

use pcp_frame::{Callsign, Frame, FrameConfig, FrameError, FrameReader, FrameWriter};
use pcp_transport::{RadioLink, TransportError, UdpLink};
use tracing::{info, warn};

use crate::cmd::SendArgs;
use crate::exit::{frame_error, transport_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: SendArgs, callsign: &Callsign, format: OutputFormat) -> CliResult<i32> {
    let wait_timeout = parse_duration(&args.wait_timeout)?;
    let payload = args.payload.resolve()?;

    let link = UdpLink::bind(args.bind, args.peer)
        .map_err(|err| transport_error("bind failed", err))?;
    let mut writer = FrameWriter::new(link, FrameConfig::new(callsign.clone()));

    writer
        .send(args.function, &payload)
        .map_err(|err| frame_error("send failed", err))?;
    info!(
        function_id = args.function,
        peer = %args.peer,
        len = payload.len(),
        "sent"
    );

    if args.wait {
        let config = FrameConfig {
            receive_timeout: Some(wait_timeout),
            ..writer.config().clone()
        };
        let mut reader = FrameReader::new(writer.into_inner(), config)
            .map_err(|err| frame_error("receive setup failed", err))?;
        let frame = wait_for_response(&mut reader, wait_timeout)
            .map_err(|err| frame_error("receive failed", err))?;
        print_frame(&frame, Some(args.peer), format);
    }

    Ok(SUCCESS)
}

/// Wait for the first frame that decodes under our callsign.
///
/// Frames that fail validation are logged and skipped until `timeout`
/// has elapsed in total.
fn wait_for_response<L: RadioLink>(
    reader: &mut FrameReader<L>,
    timeout: Duration,
) -> Result<Frame, FrameError> {
    let deadline = Instant::now() + timeout;
    loop {
        match reader.read_frame() {
            Ok(frame) => return Ok(frame),
            Err(FrameError::Transport(err)) => return Err(err.into()),
            Err(FrameError::Io(err)) => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, "ignoring frame while waiting for response");
                if Instant::now() >= deadline {
                    return Err(TransportError::Timeout(timeout).into());
                }
            }
        }
    }
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}

#[cfg(test)]
mod tests {
    use pcp_frame::function::{RESP_PACKET_INFO, RESP_PONG};
    use pcp_transport::MemoryLink;

    use super::*;

    fn reader_with_timeout(link: MemoryLink, timeout: Duration) -> FrameReader<MemoryLink> {
        let config = FrameConfig {
            receive_timeout: Some(timeout),
            ..FrameConfig::new(Callsign::from_static("PLUTON-UPV").unwrap())
        };
        FrameReader::new(link, config).unwrap()
    }

    #[test]
    fn wait_for_response_skips_foreign_frames() {
        let (mut air, link) = MemoryLink::pair();
        let mut reader = reader_with_timeout(link, Duration::from_secs(1));

        air.transmit(b"NOT-US-123\x20").unwrap();
        air.transmit(b"PLUTON-UPV\x24\x09short").unwrap();
        air.transmit(b"PLUTON-UPV\x20").unwrap();

        let frame = wait_for_response(&mut reader, Duration::from_secs(1)).unwrap();
        assert_eq!(frame.function_id, RESP_PONG);
    }

    #[test]
    fn wait_for_response_returns_payload() {
        let (mut air, link) = MemoryLink::pair();
        let mut reader = reader_with_timeout(link, Duration::from_secs(1));

        air.transmit(b"PLUTON-UPV\x24\x02\x28\xB4").unwrap();

        let frame = wait_for_response(&mut reader, Duration::from_secs(1)).unwrap();
        assert_eq!(frame.function_id, RESP_PACKET_INFO);
        assert_eq!(frame.opt_data.as_ref(), &[0x28, 0xB4]);
    }

    #[test]
    fn wait_for_response_times_out() {
        let (_air, link) = MemoryLink::pair();
        let mut reader = reader_with_timeout(link, Duration::from_millis(10));

        let err = wait_for_response(&mut reader, Duration::from_millis(10)).unwrap_err();
        assert!(matches!(
            err,
            FrameError::Transport(TransportError::Timeout(_))
        ));
    }

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("").is_err());
    }
}

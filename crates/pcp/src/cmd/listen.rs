use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pcp_frame::{Callsign, FrameConfig, FrameError, FrameReader};
use pcp_transport::{TransportError, UdpLink};
use tracing::{info, warn};

use crate::cmd::ListenArgs;
use crate::exit::{frame_error, transport_error, CliError, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

// How often the receive loop checks for Ctrl-C.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub fn run(args: ListenArgs, callsign: &Callsign, format: OutputFormat) -> CliResult<i32> {
    let link = match args.peer {
        Some(peer) => UdpLink::bind(args.bind, peer),
        None => UdpLink::listen(args.bind),
    }
    .map_err(|err| transport_error("bind failed", err))?;

    let config = FrameConfig {
        receive_timeout: Some(POLL_INTERVAL),
        ..FrameConfig::new(callsign.clone())
    };
    let mut reader =
        FrameReader::new(link, config).map_err(|err| frame_error("receive setup failed", err))?;
    if let Ok(addr) = reader.get_ref().local_addr() {
        info!(%addr, %callsign, "listening");
    }

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut printed = 0usize;
    let mut rejected = 0usize;

    while running.load(Ordering::SeqCst) {
        let frame = match reader.read_frame() {
            Ok(frame) => frame,
            Err(FrameError::Transport(TransportError::Timeout(_))) => continue,
            Err(err @ (FrameError::Transport(_) | FrameError::Io(_))) => {
                return Err(frame_error("receive failed", err));
            }
            Err(err) => {
                rejected = rejected.saturating_add(1);
                warn!(error = %err, rejected, "frame rejected");
                continue;
            }
        };

        let link = reader.get_ref();
        let source = link.last_sender().or(link.peer_addr());
        print_frame(&frame, source, format);
        printed = printed.saturating_add(1);

        if let Some(count) = args.count {
            if printed >= count {
                break;
            }
        }
    }

    info!(printed, rejected, "listener stopped");
    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}

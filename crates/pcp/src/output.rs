use std::fmt::Write as _;
use std::io::{IsTerminal, Write};
use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use pcp_frame::function::{function_name, FunctionInfo, RESP_PACKET_INFO};
use pcp_frame::{Frame, PacketInfo};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct PacketInfoOutput {
    snr_db: f32,
    rssi_dbm: f32,
    lora_valid: u16,
    lora_invalid: u16,
    fsk_valid: u16,
    fsk_invalid: u16,
}

impl From<PacketInfo> for PacketInfoOutput {
    fn from(info: PacketInfo) -> Self {
        Self {
            snr_db: info.snr_db,
            rssi_dbm: info.rssi_dbm,
            lora_valid: info.lora_valid,
            lora_invalid: info.lora_invalid,
            fsk_valid: info.fsk_valid,
            fsk_invalid: info.fsk_invalid,
        }
    }
}

#[derive(Serialize)]
struct FrameOutput {
    function_id: u8,
    function_name: &'static str,
    kind: &'static str,
    opt_data_len: usize,
    opt_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    packet_info: Option<PacketInfoOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    timestamp: String,
}

#[derive(Serialize)]
struct EncodedOutput {
    function_id: u8,
    function_name: &'static str,
    length: usize,
    frame: String,
}

#[derive(Serialize)]
struct FunctionOutput {
    id: u8,
    hex: String,
    name: &'static str,
    kind: &'static str,
}

/// Packet info decoded from the frame, if it is a well-formed packet info response.
fn packet_info(frame: &Frame) -> Option<PacketInfo> {
    if frame.function_id != RESP_PACKET_INFO {
        return None;
    }
    PacketInfo::parse(frame.opt_data.as_ref()).ok()
}

pub fn print_frame(frame: &Frame, source: Option<SocketAddr>, format: OutputFormat) {
    let name = function_name(frame.function_id);
    let kind = frame.kind().as_str();
    let info = packet_info(frame);

    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                function_id: frame.function_id,
                function_name: name,
                kind,
                opt_data_len: frame.opt_data.len(),
                opt_data: to_hex(frame.opt_data.as_ref()),
                packet_info: info.map(Into::into),
                source: source.map(|addr| addr.to_string()),
                timestamp: now_unix_seconds(),
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FUNCTION", "KIND", "SIZE", "SOURCE", "DATA"])
                .add_row(vec![
                    format!("0x{:02X} {name}", frame.function_id),
                    kind.to_string(),
                    frame.opt_data.len().to_string(),
                    source.map(|addr| addr.to_string()).unwrap_or_default(),
                    data_preview(frame.opt_data.as_ref()),
                ]);
            println!("{table}");
            if let Some(info) = info {
                println!("{}", packet_info_table(&info));
            }
        }
        OutputFormat::Pretty => {
            println!(
                "function=0x{:02X} ({name}) kind={kind} size={} data={}",
                frame.function_id,
                frame.opt_data.len(),
                data_preview(frame.opt_data.as_ref())
            );
            if let Some(info) = info {
                println!(
                    "snr={:.2} dB rssi={:.2} dBm lora={}/{} fsk={}/{}",
                    info.snr_db,
                    info.rssi_dbm,
                    info.lora_valid,
                    info.lora_invalid,
                    info.fsk_valid,
                    info.fsk_invalid
                );
            }
        }
        OutputFormat::Raw => {
            print_raw(frame.opt_data.as_ref());
        }
    }
}

fn packet_info_table(info: &PacketInfo) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["SNR (dB)", "RSSI (dBm)", "LORA OK", "LORA BAD", "FSK OK", "FSK BAD"])
        .add_row(vec![
            format!("{:.2}", info.snr_db),
            format!("{:.2}", info.rssi_dbm),
            info.lora_valid.to_string(),
            info.lora_invalid.to_string(),
            info.fsk_valid.to_string(),
            info.fsk_invalid.to_string(),
        ]);
    table
}

pub fn print_encoded(wire: &[u8], function_id: u8, format: OutputFormat) {
    let name = function_name(function_id);
    match format {
        OutputFormat::Json => print_json(&EncodedOutput {
            function_id,
            function_name: name,
            length: wire.len(),
            frame: to_hex(wire),
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FUNCTION", "LENGTH", "FRAME"])
                .add_row(vec![
                    format!("0x{function_id:02X} {name}"),
                    wire.len().to_string(),
                    to_hex(wire),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", to_hex(wire)),
        OutputFormat::Raw => print_raw(wire),
    }
}

pub fn print_functions<'a>(
    functions: impl IntoIterator<Item = &'a FunctionInfo>,
    format: OutputFormat,
) {
    let rows: Vec<FunctionOutput> = functions
        .into_iter()
        .map(|info| FunctionOutput {
            id: info.id,
            hex: format!("0x{:02X}", info.id),
            name: info.name,
            kind: info.kind().as_str(),
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "NAME", "KIND"]);
            for row in &rows {
                table.add_row(vec![row.hex.clone(), row.name.to_string(), row.kind.to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                println!("{} {} {}", row.hex, row.name, row.kind);
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Lowercase hex, no separators.
pub fn to_hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

fn data_preview(data: &[u8]) -> String {
    if data.is_empty() {
        return "-".to_string();
    }
    match std::str::from_utf8(data) {
        Ok(text) if !text.chars().any(char::is_control) => text.to_string(),
        _ => format!("<hex {}>", to_hex(data)),
    }
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

//! Function ID registry.
//!
//! The 8-bit function ID space is split into disjoint ranges:
//! - `0x00`-`0x09`: public commands (unauthenticated uplink)
//! - `0x20`-`0x3E`: public responses, `command + RESPONSE_OFFSET`, followed by
//!   device telemetry responses
//! - `0x3F`: the acknowledgement
//! - `0x40`-`0xFF`: private commands, `n + PRIVATE_OFFSET`
//!
//! "Private" marks intent only. The codec performs no authentication.

/// Distance between a public command and its response.
pub const RESPONSE_OFFSET: u8 = 0x20;

/// First private command ID.
pub const PRIVATE_OFFSET: u8 = 0x40;

/// Number of public command slots.
pub const NUM_PUBLIC_COMMANDS: u8 = 0x0A;

/// Number of private commands defined by the reference deployment.
pub const NUM_PRIVATE_COMMANDS: u8 = 0x23;

// public commands
pub const CMD_PING: u8 = 0x00;
pub const CMD_RETRANSMIT: u8 = 0x01;
pub const CMD_RETRANSMIT_CUSTOM: u8 = 0x02;
pub const CMD_TRANSMIT_SYSTEM_INFO: u8 = 0x03;
pub const CMD_GET_PACKET_INFO: u8 = 0x04;
pub const CMD_GET_STATISTICS: u8 = 0x05;
pub const CMD_GET_FULL_SYSTEM_INFO: u8 = 0x06;
pub const CMD_STORE_AND_FORWARD_ADD: u8 = 0x07;
pub const CMD_STORE_AND_FORWARD_REQUEST: u8 = 0x08;
pub const CMD_REQUEST_PUBLIC_PICTURE: u8 = 0x09;

// public responses
pub const RESP_PONG: u8 = response_id(CMD_PING);
pub const RESP_REPEATED_MESSAGE: u8 = response_id(CMD_RETRANSMIT);
pub const RESP_REPEATED_MESSAGE_CUSTOM: u8 = response_id(CMD_RETRANSMIT_CUSTOM);
pub const RESP_SYSTEM_INFO: u8 = response_id(CMD_TRANSMIT_SYSTEM_INFO);
pub const RESP_PACKET_INFO: u8 = response_id(CMD_GET_PACKET_INFO);
pub const RESP_STATISTICS: u8 = response_id(CMD_GET_STATISTICS);
pub const RESP_FULL_SYSTEM_INFO: u8 = response_id(CMD_GET_FULL_SYSTEM_INFO);
pub const RESP_STORE_AND_FORWARD_ASSIGNED_SLOT: u8 = response_id(CMD_STORE_AND_FORWARD_ADD);
pub const RESP_FORWARDED_MESSAGE: u8 = response_id(CMD_STORE_AND_FORWARD_REQUEST);
pub const RESP_PUBLIC_PICTURE: u8 = response_id(CMD_REQUEST_PUBLIC_PICTURE);

// telemetry responses, numbered on from the last command response
pub const RESP_DEPLOYMENT_STATE: u8 = response_id(NUM_PUBLIC_COMMANDS);
pub const RESP_RECORDED_SOLAR_CELLS: u8 = response_id(NUM_PUBLIC_COMMANDS + 1);
pub const RESP_CAMERA_STATE: u8 = response_id(NUM_PUBLIC_COMMANDS + 2);
pub const RESP_RECORDED_IMU: u8 = response_id(NUM_PUBLIC_COMMANDS + 3);
pub const RESP_MANUAL_ACS_RESULT: u8 = response_id(NUM_PUBLIC_COMMANDS + 4);
pub const RESP_GPS_LOG: u8 = response_id(NUM_PUBLIC_COMMANDS + 5);
pub const RESP_GPS_LOG_STATE: u8 = response_id(NUM_PUBLIC_COMMANDS + 6);
pub const RESP_FLASH_CONTENTS: u8 = response_id(NUM_PUBLIC_COMMANDS + 7);
pub const RESP_CAMERA_PICTURE: u8 = response_id(NUM_PUBLIC_COMMANDS + 8);
pub const RESP_CAMERA_PICTURE_LENGTH: u8 = response_id(NUM_PUBLIC_COMMANDS + 9);
pub const RESP_GPS_COMMAND_RESPONSE: u8 = response_id(NUM_PUBLIC_COMMANDS + 10);

/// The acknowledgement is the last ID before the private range.
pub const RESP_ACKNOWLEDGE: u8 = PRIVATE_OFFSET - 1;

// private commands
pub const CMD_DEPLOY: u8 = private_id(0x00);
pub const CMD_RESTART: u8 = private_id(0x01);
pub const CMD_WIPE_EEPROM: u8 = private_id(0x02);
pub const CMD_SET_TRANSMIT_ENABLE: u8 = private_id(0x03);
pub const CMD_SET_CALLSIGN: u8 = private_id(0x04);
pub const CMD_SET_SF_MODE: u8 = private_id(0x05);
pub const CMD_SET_MPPT_MODE: u8 = private_id(0x06);
pub const CMD_SET_LOW_POWER_ENABLE: u8 = private_id(0x07);
pub const CMD_SET_RECEIVE_WINDOWS: u8 = private_id(0x08);
pub const CMD_RECORD_SOLAR_CELLS: u8 = private_id(0x09);
pub const CMD_CAMERA_CAPTURE: u8 = private_id(0x0A);
pub const CMD_SET_POWER_LIMITS: u8 = private_id(0x0B);
pub const CMD_SET_RTC: u8 = private_id(0x0C);
pub const CMD_RECORD_IMU: u8 = private_id(0x0D);
pub const CMD_RUN_MANUAL_ACS: u8 = private_id(0x0E);
pub const CMD_LOG_GPS: u8 = private_id(0x0F);
pub const CMD_GET_GPS_LOG: u8 = private_id(0x10);
pub const CMD_GET_FLASH_CONTENTS: u8 = private_id(0x11);
pub const CMD_GET_PICTURE_LENGTH: u8 = private_id(0x12);
pub const CMD_GET_PICTURE_BURST: u8 = private_id(0x13);
pub const CMD_ROUTE: u8 = private_id(0x14);
pub const CMD_SET_FLASH_CONTENTS: u8 = private_id(0x15);
pub const CMD_SET_TLE: u8 = private_id(0x16);
pub const CMD_GET_GPS_LOG_STATE: u8 = private_id(0x17);
pub const CMD_RUN_GPS_COMMAND: u8 = private_id(0x18);
pub const CMD_SET_SLEEP_INTERVALS: u8 = private_id(0x19);
pub const CMD_ABORT: u8 = private_id(0x1A);
pub const CMD_MANEUVER: u8 = private_id(0x1B);
pub const CMD_SET_ADCS_PARAMETERS: u8 = private_id(0x1C);
pub const CMD_ERASE_FLASH: u8 = private_id(0x1D);
pub const CMD_SET_ADCS_CONTROLLER: u8 = private_id(0x1E);
pub const CMD_SET_ADCS_EPHEMERIDES: u8 = private_id(0x1F);
pub const CMD_DETUMBLE: u8 = private_id(0x20);
pub const CMD_SET_IMU_OFFSET: u8 = private_id(0x21);
pub const CMD_SET_IMU_CALIBRATION: u8 = private_id(0x22);

/// Response ID for a public command.
///
/// `None` when the result would fall outside the response range.
pub const fn public_response(command: u8) -> Option<u8> {
    match command.checked_add(RESPONSE_OFFSET) {
        Some(id) if id < RESP_ACKNOWLEDGE => Some(id),
        _ => None,
    }
}

/// Function ID of the `n`th private command, `None` past `0xFF`.
pub const fn private_command(n: u8) -> Option<u8> {
    n.checked_add(PRIVATE_OFFSET)
}

// Only used for the constants above, so an out-of-range entry fails the build.
const fn response_id(command: u8) -> u8 {
    match public_response(command) {
        Some(id) => id,
        None => panic!("response ID out of range"),
    }
}

const fn private_id(n: u8) -> u8 {
    match private_command(n) {
        Some(id) => id,
        None => panic!("private command ID out of range"),
    }
}

/// The public command a response answers, if it answers one.
///
/// Telemetry responses and the acknowledgement have no matching command.
pub fn request_for_response(response: u8) -> Option<u8> {
    let command = response.checked_sub(RESPONSE_OFFSET)?;
    (command < NUM_PUBLIC_COMMANDS).then_some(command)
}

/// Which range a function ID falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    PublicCommand,
    PublicResponse,
    Acknowledge,
    PrivateCommand,
    /// Between the public commands and the responses; never used.
    Unassigned,
}

impl FunctionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FunctionKind::PublicCommand => "public-command",
            FunctionKind::PublicResponse => "public-response",
            FunctionKind::Acknowledge => "acknowledge",
            FunctionKind::PrivateCommand => "private-command",
            FunctionKind::Unassigned => "unassigned",
        }
    }

    /// True for IDs sent by the ground station.
    pub fn is_request(self) -> bool {
        matches!(self, FunctionKind::PublicCommand | FunctionKind::PrivateCommand)
    }

    /// True for IDs sent by the device, including the acknowledgement.
    pub fn is_response(self) -> bool {
        matches!(self, FunctionKind::PublicResponse | FunctionKind::Acknowledge)
    }
}

impl std::fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a function ID.
pub fn classify(id: u8) -> FunctionKind {
    match id {
        0x00..NUM_PUBLIC_COMMANDS => FunctionKind::PublicCommand,
        NUM_PUBLIC_COMMANDS..RESPONSE_OFFSET => FunctionKind::Unassigned,
        RESP_ACKNOWLEDGE => FunctionKind::Acknowledge,
        RESPONSE_OFFSET..RESP_ACKNOWLEDGE => FunctionKind::PublicResponse,
        PRIVATE_OFFSET..=u8::MAX => FunctionKind::PrivateCommand,
    }
}

/// A named entry in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionInfo {
    pub id: u8,
    pub name: &'static str,
}

impl FunctionInfo {
    const fn new(id: u8, name: &'static str) -> Self {
        Self { id, name }
    }

    pub fn kind(&self) -> FunctionKind {
        classify(self.id)
    }
}

/// Every function ID the reference deployment names, in ID order.
pub static FUNCTIONS: &[FunctionInfo] = &[
    FunctionInfo::new(CMD_PING, "PING"),
    FunctionInfo::new(CMD_RETRANSMIT, "RETRANSMIT"),
    FunctionInfo::new(CMD_RETRANSMIT_CUSTOM, "RETRANSMIT_CUSTOM"),
    FunctionInfo::new(CMD_TRANSMIT_SYSTEM_INFO, "TRANSMIT_SYSTEM_INFO"),
    FunctionInfo::new(CMD_GET_PACKET_INFO, "GET_PACKET_INFO"),
    FunctionInfo::new(CMD_GET_STATISTICS, "GET_STATISTICS"),
    FunctionInfo::new(CMD_GET_FULL_SYSTEM_INFO, "GET_FULL_SYSTEM_INFO"),
    FunctionInfo::new(CMD_STORE_AND_FORWARD_ADD, "STORE_AND_FORWARD_ADD"),
    FunctionInfo::new(CMD_STORE_AND_FORWARD_REQUEST, "STORE_AND_FORWARD_REQUEST"),
    FunctionInfo::new(CMD_REQUEST_PUBLIC_PICTURE, "REQUEST_PUBLIC_PICTURE"),
    FunctionInfo::new(RESP_PONG, "PONG"),
    FunctionInfo::new(RESP_REPEATED_MESSAGE, "REPEATED_MESSAGE"),
    FunctionInfo::new(RESP_REPEATED_MESSAGE_CUSTOM, "REPEATED_MESSAGE_CUSTOM"),
    FunctionInfo::new(RESP_SYSTEM_INFO, "SYSTEM_INFO"),
    FunctionInfo::new(RESP_PACKET_INFO, "PACKET_INFO"),
    FunctionInfo::new(RESP_STATISTICS, "STATISTICS"),
    FunctionInfo::new(RESP_FULL_SYSTEM_INFO, "FULL_SYSTEM_INFO"),
    FunctionInfo::new(RESP_STORE_AND_FORWARD_ASSIGNED_SLOT, "STORE_AND_FORWARD_ASSIGNED_SLOT"),
    FunctionInfo::new(RESP_FORWARDED_MESSAGE, "FORWARDED_MESSAGE"),
    FunctionInfo::new(RESP_PUBLIC_PICTURE, "PUBLIC_PICTURE"),
    FunctionInfo::new(RESP_DEPLOYMENT_STATE, "DEPLOYMENT_STATE"),
    FunctionInfo::new(RESP_RECORDED_SOLAR_CELLS, "RECORDED_SOLAR_CELLS"),
    FunctionInfo::new(RESP_CAMERA_STATE, "CAMERA_STATE"),
    FunctionInfo::new(RESP_RECORDED_IMU, "RECORDED_IMU"),
    FunctionInfo::new(RESP_MANUAL_ACS_RESULT, "MANUAL_ACS_RESULT"),
    FunctionInfo::new(RESP_GPS_LOG, "GPS_LOG"),
    FunctionInfo::new(RESP_GPS_LOG_STATE, "GPS_LOG_STATE"),
    FunctionInfo::new(RESP_FLASH_CONTENTS, "FLASH_CONTENTS"),
    FunctionInfo::new(RESP_CAMERA_PICTURE, "CAMERA_PICTURE"),
    FunctionInfo::new(RESP_CAMERA_PICTURE_LENGTH, "CAMERA_PICTURE_LENGTH"),
    FunctionInfo::new(RESP_GPS_COMMAND_RESPONSE, "GPS_COMMAND_RESPONSE"),
    FunctionInfo::new(RESP_ACKNOWLEDGE, "ACKNOWLEDGE"),
    FunctionInfo::new(CMD_DEPLOY, "DEPLOY"),
    FunctionInfo::new(CMD_RESTART, "RESTART"),
    FunctionInfo::new(CMD_WIPE_EEPROM, "WIPE_EEPROM"),
    FunctionInfo::new(CMD_SET_TRANSMIT_ENABLE, "SET_TRANSMIT_ENABLE"),
    FunctionInfo::new(CMD_SET_CALLSIGN, "SET_CALLSIGN"),
    FunctionInfo::new(CMD_SET_SF_MODE, "SET_SF_MODE"),
    FunctionInfo::new(CMD_SET_MPPT_MODE, "SET_MPPT_MODE"),
    FunctionInfo::new(CMD_SET_LOW_POWER_ENABLE, "SET_LOW_POWER_ENABLE"),
    FunctionInfo::new(CMD_SET_RECEIVE_WINDOWS, "SET_RECEIVE_WINDOWS"),
    FunctionInfo::new(CMD_RECORD_SOLAR_CELLS, "RECORD_SOLAR_CELLS"),
    FunctionInfo::new(CMD_CAMERA_CAPTURE, "CAMERA_CAPTURE"),
    FunctionInfo::new(CMD_SET_POWER_LIMITS, "SET_POWER_LIMITS"),
    FunctionInfo::new(CMD_SET_RTC, "SET_RTC"),
    FunctionInfo::new(CMD_RECORD_IMU, "RECORD_IMU"),
    FunctionInfo::new(CMD_RUN_MANUAL_ACS, "RUN_MANUAL_ACS"),
    FunctionInfo::new(CMD_LOG_GPS, "LOG_GPS"),
    FunctionInfo::new(CMD_GET_GPS_LOG, "GET_GPS_LOG"),
    FunctionInfo::new(CMD_GET_FLASH_CONTENTS, "GET_FLASH_CONTENTS"),
    FunctionInfo::new(CMD_GET_PICTURE_LENGTH, "GET_PICTURE_LENGTH"),
    FunctionInfo::new(CMD_GET_PICTURE_BURST, "GET_PICTURE_BURST"),
    FunctionInfo::new(CMD_ROUTE, "ROUTE"),
    FunctionInfo::new(CMD_SET_FLASH_CONTENTS, "SET_FLASH_CONTENTS"),
    FunctionInfo::new(CMD_SET_TLE, "SET_TLE"),
    FunctionInfo::new(CMD_GET_GPS_LOG_STATE, "GET_GPS_LOG_STATE"),
    FunctionInfo::new(CMD_RUN_GPS_COMMAND, "RUN_GPS_COMMAND"),
    FunctionInfo::new(CMD_SET_SLEEP_INTERVALS, "SET_SLEEP_INTERVALS"),
    FunctionInfo::new(CMD_ABORT, "ABORT"),
    FunctionInfo::new(CMD_MANEUVER, "MANEUVER"),
    FunctionInfo::new(CMD_SET_ADCS_PARAMETERS, "SET_ADCS_PARAMETERS"),
    FunctionInfo::new(CMD_ERASE_FLASH, "ERASE_FLASH"),
    FunctionInfo::new(CMD_SET_ADCS_CONTROLLER, "SET_ADCS_CONTROLLER"),
    FunctionInfo::new(CMD_SET_ADCS_EPHEMERIDES, "SET_ADCS_EPHEMERIDES"),
    FunctionInfo::new(CMD_DETUMBLE, "DETUMBLE"),
    FunctionInfo::new(CMD_SET_IMU_OFFSET, "SET_IMU_OFFSET"),
    FunctionInfo::new(CMD_SET_IMU_CALIBRATION, "SET_IMU_CALIBRATION"),
];

/// Registry entry for a function ID.
pub fn lookup(id: u8) -> Option<&'static FunctionInfo> {
    FUNCTIONS
        .binary_search_by_key(&id, |info| info.id)
        .ok()
        .map(|idx| &FUNCTIONS[idx])
}

/// Registry entry by name. Case-insensitive; `-` and `_` are interchangeable.
pub fn lookup_name(name: &str) -> Option<&'static FunctionInfo> {
    let wanted = name.trim().replace('-', "_");
    FUNCTIONS
        .iter()
        .find(|info| info.name.eq_ignore_ascii_case(&wanted))
}

/// Returns a human-readable name for a function ID.
pub fn function_name(id: u8) -> &'static str {
    match lookup(id) {
        Some(info) => info.name,
        None => match classify(id) {
            FunctionKind::Unassigned => "UNASSIGNED",
            _ => "RESERVED",
        },
    }
}

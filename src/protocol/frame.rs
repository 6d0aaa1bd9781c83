use crate::types::{FanSpeed, PairingInfo};

/// Every frame on the air is exactly this long.
pub const FRAME_SIZE: usize = 16;

/// Initial time-to-live of a freshly built frame.
pub const TTL: u8 = 0xFA;

/// The well-known network id every unpaired device listens on. Main units
/// answer discovery broadcasts here with a `NETWORK_JOIN_OPEN` offer.
pub const LINK_NETWORK_ID: u32 = 0xA55A_5AA5;

/// A private module encapsulating the protocol's command codes.
pub mod commands {
    /// Set the ventilation speed.
    pub const SETSPEED: u8 = 0x02;
    /// Set the ventilation speed for a limited number of minutes.
    pub const SETTIMER: u8 = 0x03;
    /// Ask to join the network offered by a main unit.
    pub const NETWORK_JOIN_REQUEST: u8 = 0x04;
    /// A main unit's offer of its network id, sent in reply to discovery.
    pub const NETWORK_JOIN_OPEN: u8 = 0x06;
    /// Final acknowledgement sealing a successful join.
    pub const FRAME_0B: u8 = 0x0B;
    /// Broadcast by an unpaired remote to discover main units.
    pub const NETWORK_JOIN_ACK: u8 = 0x0C;
}

/// A private module encapsulating the protocol's device type codes.
pub mod device_types {
    pub const BROADCAST: u8 = 0x00;
    pub const MAIN_UNIT: u8 = 0x01;
    pub const REMOTE_CONTROL: u8 = 0x03;
    /// Wildcard destination used while discovering main units.
    pub const ANY_MAIN_UNIT: u8 = 0x04;
}

/// One 16-byte protocol frame.
///
/// Layout on the air: destination type and id, source type and id, a TTL
/// byte, a command code, a parameter count, and up to 9 parameter bytes
/// (zero padded).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FanFrame {
    pub dest_type: u8,
    pub dest_id: u8,
    pub src_type: u8,
    pub src_id: u8,
    pub ttl: u8,
    pub command: u8,
    pub param_count: u8,
    pub params: [u8; FRAME_SIZE - 7],
}

impl FanFrame {
    /// A zeroed frame with a fresh TTL.
    const fn blank() -> Self {
        Self {
            dest_type: device_types::BROADCAST,
            dest_id: 0,
            src_type: device_types::REMOTE_CONTROL,
            src_id: 0,
            ttl: TTL,
            command: 0,
            param_count: 0,
            params: [0; FRAME_SIZE - 7],
        }
    }

    /// The discovery broadcast an unpaired remote sends on the link
    /// network, advertising the id it intends to use.
    pub fn discovery(my_device_id: u8) -> Self {
        let mut frame = Self::blank();
        frame.dest_type = device_types::ANY_MAIN_UNIT;
        frame.src_id = my_device_id;
        frame.command = commands::NETWORK_JOIN_ACK;
        frame.param_count = 4;
        frame.params[..4].copy_from_slice(&LINK_NETWORK_ID.to_le_bytes());
        frame
    }

    /// The join request sent to a discovered main unit on its own network,
    /// echoing the offered network id. The stock remote leaves the
    /// parameter count at zero here.
    pub fn join_request(info: &PairingInfo) -> Self {
        let mut frame = Self::blank();
        frame.dest_type = device_types::MAIN_UNIT;
        frame.dest_id = info.main_unit_id;
        frame.src_id = info.my_device_id;
        frame.command = commands::NETWORK_JOIN_REQUEST;
        frame.params[..4].copy_from_slice(&info.network_id.to_le_bytes());
        frame
    }

    /// The final acknowledgement that completes the pairing handshake.
    pub fn join_ack(info: &PairingInfo) -> Self {
        let mut frame = Self::blank();
        frame.dest_type = device_types::MAIN_UNIT;
        frame.dest_id = info.main_unit_id;
        frame.src_id = info.my_device_id;
        frame.command = commands::FRAME_0B;
        frame
    }

    /// A speed command addressed to the paired main unit.
    ///
    /// With `timer_minutes > 0` this becomes a SETTIMER frame: the unit
    /// runs at `speed` for the given number of minutes, then reverts.
    pub fn set_speed(info: &PairingInfo, speed: FanSpeed, timer_minutes: u8) -> Self {
        let mut frame = Self::blank();
        frame.dest_type = device_types::MAIN_UNIT;
        frame.dest_id = info.main_unit_id;
        frame.src_id = info.my_device_id;
        if timer_minutes > 0 {
            frame.command = commands::SETTIMER;
            frame.param_count = 2;
        } else {
            frame.command = commands::SETSPEED;
            frame.param_count = 1;
        }
        frame.params[0] = speed.into_bits();
        frame.params[1] = timer_minutes;
        frame
    }

    /// Serialize for transmission.
    pub fn to_bytes(&self) -> [u8; FRAME_SIZE] {
        let mut bytes = [0u8; FRAME_SIZE];
        bytes[0] = self.dest_type;
        bytes[1] = self.dest_id;
        bytes[2] = self.src_type;
        bytes[3] = self.src_id;
        bytes[4] = self.ttl;
        bytes[5] = self.command;
        bytes[6] = self.param_count;
        bytes[7..].copy_from_slice(&self.params);
        bytes
    }

    /// Deserialize a received frame.
    pub fn from_bytes(bytes: &[u8; FRAME_SIZE]) -> Self {
        let mut params = [0u8; FRAME_SIZE - 7];
        params.copy_from_slice(&bytes[7..]);
        Self {
            dest_type: bytes[0],
            dest_id: bytes[1],
            src_type: bytes[2],
            src_id: bytes[3],
            ttl: bytes[4],
            command: bytes[5],
            param_count: bytes[6],
            params,
        }
    }

    /// The 32-bit network id carried in the first four parameter bytes.
    pub fn network_id_param(&self) -> u32 {
        u32::from_le_bytes([self.params[0], self.params[1], self.params[2], self.params[3]])
    }
}

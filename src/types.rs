//! This module defines types used by various traits.
//! These types are meant to be agnostic of the trait implementation.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

/// The speed setting of the ventilation unit.
///
/// The wire values match what the unit's own remote control transmits.
/// [`FanSpeed::Auto`] hands control back to the unit (effectively "off"
/// from the remote's point of view).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FanSpeed {
    #[default]
    Auto,
    Low,
    Medium,
    High,
    Max,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for FanSpeed {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FanSpeed::Auto => defmt::write!(fmt, "Auto"),
            FanSpeed::Low => defmt::write!(fmt, "Low"),
            FanSpeed::Medium => defmt::write!(fmt, "Medium"),
            FanSpeed::High => defmt::write!(fmt, "High"),
            FanSpeed::Max => defmt::write!(fmt, "Max"),
        }
    }
}

impl FanSpeed {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            FanSpeed::Auto => 0,
            FanSpeed::Low => 1,
            FanSpeed::Medium => 2,
            FanSpeed::High => 3,
            FanSpeed::Max => 4,
        }
    }

    /// Translate a numeric speed level (as used by home-automation fan
    /// models) into a [`FanSpeed`]. Level `0` means [`FanSpeed::Auto`];
    /// levels above `4` saturate at [`FanSpeed::Max`].
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 => FanSpeed::Auto,
            1 => FanSpeed::Low,
            2 => FanSpeed::Medium,
            3 => FanSpeed::High,
            _ => FanSpeed::Max,
        }
    }
}

impl Display for FanSpeed {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            FanSpeed::Auto => write!(f, "Auto"),
            FanSpeed::Low => write!(f, "Low"),
            FanSpeed::Medium => write!(f, "Medium"),
            FanSpeed::High => write!(f, "High"),
            FanSpeed::Max => write!(f, "Max"),
        }
    }
}

/// The identity of a paired fan network.
///
/// Obtained from a successful pairing handshake
/// (see [`FanController::start_pairing()`](fn@crate::fan::FanController::start_pairing)).
/// The host should persist this so the fan does not need to be re-paired
/// after a reboot; [`PairingInfo::to_bytes()`] and [`PairingInfo::from_bytes()`]
/// provide a stable encoding for that purpose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairingInfo {
    /// The 32-bit id of the network the main unit opened for us.
    pub network_id: u32,
    /// The device type the main unit reported during discovery.
    pub main_unit_type: u8,
    /// The device id of the main unit on its network.
    pub main_unit_id: u8,
    /// The device id this remote joined the network with.
    pub my_device_id: u8,
}

impl PairingInfo {
    /// Length of the byte encoding produced by [`PairingInfo::to_bytes()`].
    pub const ENCODED_LEN: usize = 8;

    const VERSION_TAG: u8 = 1;

    /// Serialize for persistent storage.
    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let nid = self.network_id.to_le_bytes();
        [
            Self::VERSION_TAG,
            self.main_unit_type,
            self.main_unit_id,
            self.my_device_id,
            nid[0],
            nid[1],
            nid[2],
            nid[3],
        ]
    }

    /// Deserialize from persistent storage.
    ///
    /// Returns [`None`] if `bytes` is too short or was written by an
    /// incompatible version of this crate.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::ENCODED_LEN || bytes[0] != Self::VERSION_TAG {
            return None;
        }
        Some(Self {
            main_unit_type: bytes[1],
            main_unit_id: bytes[2],
            my_device_id: bytes[3],
            network_id: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        })
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for PairingInfo {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "PairingInfo {{ network_id: {=u32:#x}, main_unit_id: {=u8:#x}, my_device_id: {=u8:#x} }}",
            self.network_id,
            self.main_unit_id,
            self.my_device_id,
        )
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::{FanSpeed, PairingInfo};

    #[test]
    fn speed_levels() {
        assert_eq!(FanSpeed::from_level(0), FanSpeed::Auto);
        assert_eq!(FanSpeed::from_level(2), FanSpeed::Medium);
        assert_eq!(FanSpeed::from_level(4), FanSpeed::Max);
        assert_eq!(FanSpeed::from_level(200), FanSpeed::Max);
        assert_eq!(FanSpeed::High.into_bits(), 3);
    }

    #[test]
    fn pairing_info_codec() {
        let info = PairingInfo {
            network_id: 0x89AB_CDEF,
            main_unit_type: 0x01,
            main_unit_id: 0x1D,
            my_device_id: 0x42,
        };
        let bytes = info.to_bytes();
        assert_eq!(PairingInfo::from_bytes(&bytes), Some(info));
        // little-endian network id after the header
        assert_eq!(&bytes[4..], &[0xEF, 0xCD, 0xAB, 0x89]);
    }

    #[test]
    fn pairing_info_rejects_garbage() {
        assert!(PairingInfo::from_bytes(&[]).is_none());
        assert!(PairingInfo::from_bytes(&[0xFF; 8]).is_none());
        let short = [PairingInfo::VERSION_TAG, 0, 0];
        assert!(PairingInfo::from_bytes(&short).is_none());
    }
}

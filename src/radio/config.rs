use crate::radio::cc1101::registers;

/// Number of configuration registers covered by a [`RadioConfig`] image
/// (IOCFG2 through FSCAL0).
pub(crate) const IMAGE_LEN: usize = 0x27;

/// The 868 MHz GFSK profile used by the fan's RF protocol.
///
/// Values are indexed by register address. Sync word, packet length, device
/// address and channel are placeholders patched in by
/// [`RadioConfig::register_image()`].
const PROFILE_868: [u8; IMAGE_LEN] = [
    0x0D, // IOCFG2   - GDO2 output pin config
    0x2E, // IOCFG1   - GDO1 output pin config
    0x06, // IOCFG0   - GDO0 asserts on sync word, deasserts at end of packet
    0x47, // FIFOTHR  - FIFO thresholds
    0xD3, // SYNC1
    0x91, // SYNC0
    0x10, // PKTLEN
    0x04, // PKTCTRL1 - append status, no address check
    0x05, // PKTCTRL0 - fixed length, CRC enabled
    0x00, // ADDR
    0x00, // CHANNR
    0x06, // FSCTRL1
    0x00, // FSCTRL0
    0x21, // FREQ2    - 868 MHz carrier
    0x62, // FREQ1
    0x76, // FREQ0
    0xF5, // MDMCFG4  - bandwidth
    0x83, // MDMCFG3  - data rate
    0x13, // MDMCFG2  - GFSK, 16/16 sync word bits
    0x22, // MDMCFG1
    0xF8, // MDMCFG0
    0x15, // DEVIATN
    0x07, // MCSM2
    0x30, // MCSM1
    0x18, // MCSM0    - auto-calibrate on idle-to-RX/TX
    0x14, // FOCCFG
    0x6C, // BSCFG
    0x07, // AGCCTRL2
    0x00, // AGCCTRL1
    0x92, // AGCCTRL0
    0x87, // WOREVT1
    0x6B, // WOREVT0
    0xFB, // WORCTRL
    0x56, // FREND1
    0x10, // FREND0
    0xE9, // FSCAL3
    0x2A, // FSCAL2
    0x00, // FSCAL1
    0x1F, // FSCAL0
];

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users
/// should start with the [`RadioConfig::default`] constructor, then mutate
/// the object accordingly.
/// ```
/// use zehnder_fan::radio::RadioConfig;
///
/// let mut config = RadioConfig::default();
/// config = config.with_channel(1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioConfig {
    channel: u8,
    device_address: u8,
    sync_word: u16,
    packet_length: u8,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with the fan protocol defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::channel()`] | `0` |
    /// | [`RadioConfig::device_address()`] | `0` |
    /// | [`RadioConfig::sync_word()`] | `0xD391` |
    /// | [`RadioConfig::packet_length()`] | `16` |
    fn default() -> Self {
        Self {
            channel: 0,
            device_address: 0,
            sync_word: 0xD391,
            packet_length: crate::protocol::FRAME_SIZE as u8,
        }
    }
}

impl RadioConfig {
    /// Set the channel number (an offset from the 868 MHz base carrier).
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// The configured channel number.
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the hardware address filter byte.
    ///
    /// Note that the default profile disables hardware address checking;
    /// this only takes effect when PKTCTRL1 is changed accordingly.
    pub fn with_device_address(mut self, address: u8) -> Self {
        self.device_address = address;
        self
    }

    /// The configured hardware address filter byte.
    pub const fn device_address(&self) -> u8 {
        self.device_address
    }

    /// Set the 16-bit sync word transmitted before each packet.
    pub fn with_sync_word(mut self, sync_word: u16) -> Self {
        self.sync_word = sync_word;
        self
    }

    /// The configured sync word.
    pub const fn sync_word(&self) -> u16 {
        self.sync_word
    }

    /// Set the fixed packet length in bytes (clamped to the CC1101's
    /// 64 byte FIFO).
    pub fn with_packet_length(mut self, length: u8) -> Self {
        self.packet_length = length.clamp(1, 64);
        self
    }

    /// The configured fixed packet length.
    pub const fn packet_length(&self) -> u8 {
        self.packet_length
    }

    /// Produce the register image to be burst-written starting at IOCFG2.
    pub(crate) fn register_image(&self) -> [u8; IMAGE_LEN] {
        let mut image = PROFILE_868;
        image[registers::SYNC1 as usize] = (self.sync_word >> 8) as u8;
        image[registers::SYNC0 as usize] = self.sync_word as u8;
        image[registers::PKTLEN as usize] = self.packet_length;
        image[registers::ADDR as usize] = self.device_address;
        image[registers::CHANNR as usize] = self.channel;
        image
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::{RadioConfig, IMAGE_LEN, PROFILE_868};
    use crate::radio::cc1101::registers;

    #[test]
    fn default_image_matches_profile() {
        let image = RadioConfig::default().register_image();
        assert_eq!(image, PROFILE_868);
        assert_eq!(image.len(), IMAGE_LEN);
    }

    #[test]
    fn builder_patches_image() {
        let config = RadioConfig::default()
            .with_channel(3)
            .with_device_address(0xA5)
            .with_sync_word(0xBEEF)
            .with_packet_length(32);
        let image = config.register_image();
        assert_eq!(image[registers::CHANNR as usize], 3);
        assert_eq!(image[registers::ADDR as usize], 0xA5);
        assert_eq!(image[registers::SYNC1 as usize], 0xBE);
        assert_eq!(image[registers::SYNC0 as usize], 0xEF);
        assert_eq!(image[registers::PKTLEN as usize], 32);
    }

    #[test]
    fn packet_length_is_clamped() {
        let config = RadioConfig::default().with_packet_length(0);
        assert_eq!(config.packet_length(), 1);
        let config = RadioConfig::default().with_packet_length(255);
        assert_eq!(config.packet_length(), 64);
    }
}

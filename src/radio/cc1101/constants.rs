/// A private module encapsulating configuration register offsets for the CC1101.
pub mod registers {
    pub const IOCFG2: u8 = 0x00;
    pub const IOCFG1: u8 = 0x01;
    pub const IOCFG0: u8 = 0x02;
    pub const FIFOTHR: u8 = 0x03;
    pub const SYNC1: u8 = 0x04;
    pub const SYNC0: u8 = 0x05;
    pub const PKTLEN: u8 = 0x06;
    pub const PKTCTRL1: u8 = 0x07;
    pub const PKTCTRL0: u8 = 0x08;
    pub const ADDR: u8 = 0x09;
    pub const CHANNR: u8 = 0x0A;
    pub const FREQ2: u8 = 0x0D;
    pub const FREQ1: u8 = 0x0E;
    pub const FREQ0: u8 = 0x0F;
    pub const MCSM0: u8 = 0x18;

    /// Single address for both FIFOs; the R/W bit selects TX or RX.
    pub const FIFO: u8 = 0x3F;

    // Status registers (read-only, require burst-bit addressing).
    pub const PARTNUM: u8 = 0x30;
    pub const VERSION: u8 = 0x31;
    pub const RSSI: u8 = 0x34;
    pub const MARCSTATE: u8 = 0x35;
    pub const TXBYTES: u8 = 0x3A;
    pub const RXBYTES: u8 = 0x3B;
}

/// A private module encapsulating command strobes for the CC1101.
pub mod strobes {
    /// Reset chip.
    pub const SRES: u8 = 0x30;
    /// Enable RX.
    pub const SRX: u8 = 0x34;
    /// Enable TX.
    pub const STX: u8 = 0x35;
    /// Exit RX/TX.
    pub const SIDLE: u8 = 0x36;
    /// Flush the RX FIFO.
    pub const SFRX: u8 = 0x3A;
    /// Flush the TX FIFO.
    pub const SFTX: u8 = 0x3B;
    /// No operation (fetches the chip status byte).
    pub const SNOP: u8 = 0x3D;
}

/// A private module encapsulating the R/W/burst bits of the SPI header byte.
pub mod access {
    pub const WRITE_BURST: u8 = 0x40;
    pub const READ_SINGLE: u8 = 0x80;
    pub const READ_BURST: u8 = 0xC0;
}

/// Mask for the byte count field of the RXBYTES/TXBYTES status registers
/// (the top bit flags FIFO over/underflow).
pub const FIFO_BYTES_MASK: u8 = 0x7F;

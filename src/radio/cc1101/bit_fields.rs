use bitfield_struct::bitfield;

/// The chip status byte clocked out on MISO with every SPI header byte.
#[bitfield(u8, order = Msb)]
pub(crate) struct ChipStatus {
    /// Low when the crystal oscillator is stable.
    pub chip_rdy_n: bool,

    /// Main state machine mode (0 = IDLE, 1 = RX, 2 = TX, 6 = RX overflow,
    /// 7 = TX underflow).
    #[bits(3)]
    pub state: u8,

    /// Free bytes in the TX FIFO (when writing) or available bytes in the
    /// RX FIFO (when reading), saturating at 15.
    #[bits(4)]
    pub fifo_bytes_available: u8,
}

impl ChipStatus {
    pub(crate) const STATE_RX_OVERFLOW: u8 = 6;

    /// Is the oscillator running and the chip ready to accept commands?
    pub(crate) const fn is_ready(&self) -> bool {
        !self.chip_rdy_n()
    }
}

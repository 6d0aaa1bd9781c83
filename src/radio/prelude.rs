//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use zehnder_fan::radio::prelude::*;
//! ```

use super::RadioConfig;

/// A trait to represent initialization of an RFT capable transceiver.
pub trait RftInit {
    type InitErrorType;

    /// Reset the transceiver, verify it responds, and apply
    /// [`RadioConfig::default()`].
    fn init(&mut self) -> Result<(), Self::InitErrorType>;

    /// Write a full configuration image to the transceiver.
    ///
    /// The radio is left in an idle state with empty FIFOs.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::InitErrorType>;
}

/// A trait to represent mode switching of an RFT capable transceiver.
pub trait RftMode {
    type ModeErrorType;

    /// Exit RX/TX and settle in the idle state.
    fn as_idle(&mut self) -> Result<(), Self::ModeErrorType>;

    /// Enter RX mode.
    fn as_rx(&mut self) -> Result<(), Self::ModeErrorType>;

    /// Enter TX mode. Transmission of a previously written payload starts
    /// immediately.
    fn as_tx(&mut self) -> Result<(), Self::ModeErrorType>;
}

/// A trait to represent FIFO manipulation of an RFT capable transceiver.
pub trait RftFifo {
    type FifoErrorType;

    /// Discard anything in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Discard anything in the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// How many bytes are waiting in the RX FIFO?
    fn rx_bytes(&mut self) -> Result<u8, Self::FifoErrorType>;

    /// Has a complete packet been received?
    ///
    /// Implementations typically sample a packet-ready line (GDO0 on the
    /// CC1101) rather than the FIFO count, so this can be polled cheaply.
    fn data_ready(&mut self) -> Result<bool, Self::FifoErrorType>;
}

/// A trait to represent payload exchange over an RFT fan network.
pub trait RftRadio {
    type RadioErrorType;

    /// Tune address filtering to the given 32-bit fan network id.
    ///
    /// Transceivers with narrower hardware filters may only match part of
    /// the id; the full id always travels inside the frame payload.
    fn set_network_id(&mut self, network_id: u32) -> Result<(), Self::RadioErrorType>;

    /// Load a payload into the TX FIFO, replacing whatever was there.
    ///
    /// The radio is left idle; call [`RftMode::as_tx()`] to start the
    /// transmission. Implementations may clamp the payload to their
    /// transfer-buffer size.
    fn write_tx_payload(&mut self, payload: &[u8]) -> Result<(), Self::RadioErrorType>;

    /// Fetch a received payload of `buf.len()` bytes, if one is available.
    ///
    /// Returns `true` when `buf` was filled. Shorter receptions are left
    /// untouched (they are discarded on the next FIFO flush).
    /// Implementations may clamp the read to their transfer-buffer size, in
    /// which case only the front of `buf` is filled.
    fn read_rx_payload(&mut self, buf: &mut [u8]) -> Result<bool, Self::RadioErrorType>;
}

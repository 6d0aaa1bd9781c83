use embedded_hal::{delay::DelayNs, digital::InputPin, spi::SpiDevice};

use super::{bit_fields::ChipStatus, registers, Cc1101, Cc1101Error, BUF_LEN};
use crate::radio::prelude::{RftFifo, RftMode, RftRadio};

impl<SPI, GI, DELAY> RftRadio for Cc1101<SPI, GI, DELAY>
where
    SPI: SpiDevice,
    GI: InputPin,
    DELAY: DelayNs,
{
    type RadioErrorType = Cc1101Error<SPI::Error, GI::Error>;

    /// See [`RftRadio::set_network_id()`] for implementation-agnostic detail.
    ///
    /// The CC1101's hardware filter is a single byte, so only the lowest
    /// byte of the network id lands in the ADDR register. The default
    /// profile disables hardware address checking anyway; frames are matched
    /// by the full 32-bit id carried in their payload.
    fn set_network_id(&mut self, network_id: u32) -> Result<(), Self::RadioErrorType> {
        self.write_register(registers::ADDR, network_id as u8)
    }

    /// See [`RftRadio::write_tx_payload()`] for implementation-agnostic detail.
    ///
    /// Payloads are clamped to one SPI transfer (39 data bytes); anything
    /// past the clamp is not loaded into the FIFO.
    fn write_tx_payload(&mut self, payload: &[u8]) -> Result<(), Self::RadioErrorType> {
        self.as_idle()?;
        self.flush_tx()?;
        self.write_burst(registers::FIFO, payload)
    }

    /// See [`RftRadio::read_rx_payload()`] for implementation-agnostic detail.
    ///
    /// The RX FIFO is flushed after a successful read, discarding any
    /// trailing status bytes the chip appended. Reads are clamped to one
    /// SPI transfer (39 data bytes); a longer `buf` is only filled up to
    /// the clamp.
    fn read_rx_payload(&mut self, buf: &mut [u8]) -> Result<bool, Self::RadioErrorType> {
        if !self.data_ready()? {
            return Ok(false);
        }
        let pending = self.rx_bytes()?;
        // An overflowed FIFO stalls reception until it is flushed. The
        // status byte clocked out with the RXBYTES read reports the state.
        if self._status.state() == ChipStatus::STATE_RX_OVERFLOW {
            self.flush_rx()?;
            return Ok(false);
        }
        let buf_len = buf.len().min(BUF_LEN - 1);
        if (pending as usize) < buf_len {
            return Ok(false);
        }
        self.read_burst(registers::FIFO, buf_len as u8)?;
        buf[..buf_len].copy_from_slice(&self._buf[1..(buf_len + 1)]);
        self.flush_rx()?;
        Ok(true)
    }
}

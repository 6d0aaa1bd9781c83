use embedded_hal::{delay::DelayNs, digital::InputPin, spi::SpiDevice};

use super::{registers, strobes, Cc1101, Cc1101Error, FIFO_BYTES_MASK};
use crate::radio::prelude::RftFifo;

impl<SPI, GI, DELAY> RftFifo for Cc1101<SPI, GI, DELAY>
where
    SPI: SpiDevice,
    GI: InputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Cc1101Error<SPI::Error, GI::Error>;

    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.strobe(strobes::SFRX)
    }

    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.strobe(strobes::SFTX)
    }

    fn rx_bytes(&mut self) -> Result<u8, Self::FifoErrorType> {
        let rxbytes = self.read_status_register(registers::RXBYTES)?;
        Ok(rxbytes & FIFO_BYTES_MASK)
    }

    /// Samples the GDO0 line, which the default profile asserts on sync
    /// word detection and holds until the end of the packet.
    fn data_ready(&mut self) -> Result<bool, Self::FifoErrorType> {
        self.gdo0_pin.is_high().map_err(Cc1101Error::Gpio)
    }
}

use embedded_hal::{delay::DelayNs, digital::InputPin, spi::SpiDevice};

use super::{registers, strobes, Cc1101, Cc1101Error};
use crate::radio::{
    prelude::{RftFifo, RftInit, RftMode},
    RadioConfig,
};

impl<SPI, GI, DELAY> RftInit for Cc1101<SPI, GI, DELAY>
where
    SPI: SpiDevice,
    GI: InputPin,
    DELAY: DelayNs,
{
    type InitErrorType = Cc1101Error<SPI::Error, GI::Error>;

    /// Initialize the radio's hardware using the [`SpiDevice`] and GDO pins
    /// given to [`Cc1101::new()`].
    fn init(&mut self) -> Result<(), Self::InitErrorType> {
        self.strobe(strobes::SRES)?;
        // Worst-case reset settling per datasheet is well under 100 us once
        // CSn has been released; the extra 10 ms matches crystal start-up
        // from a cold power-on.
        self._delay_impl.delay_us(100);
        self._delay_impl.delay_ms(10);

        // A dead MISO line reads as all-zeros or all-ones. VERSION is a
        // fixed silicon revision register and is never either.
        self.strobe(strobes::SNOP)?;
        if !self._status.is_ready() {
            return Err(Cc1101Error::BinaryCorruption);
        }
        let version = self.read_status_register(registers::VERSION)?;
        if version == 0x00 || version == 0xFF {
            return Err(Cc1101Error::BinaryCorruption);
        }

        self.with_config(&RadioConfig::default())
    }

    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::InitErrorType> {
        self.as_idle()?;

        // Write the whole image in one burst starting at IOCFG2 (0x00),
        // then pin the packet length (harmlessly redundant with the image,
        // but it is the one register the frame codec depends on).
        let image = config.register_image();
        self.write_burst(registers::IOCFG2, &image)?;
        self.write_register(registers::PKTLEN, config.packet_length())?;

        self.flush_rx()?;
        self.flush_tx()
    }
}

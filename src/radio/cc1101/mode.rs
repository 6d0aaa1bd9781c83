use embedded_hal::{delay::DelayNs, digital::InputPin, spi::SpiDevice};

use super::{strobes, Cc1101, Cc1101Error};
use crate::radio::prelude::RftMode;

/// Settle time after a mode strobe before the state machine is trustworthy.
const MODE_SETTLE_US: u32 = 100;

impl<SPI, GI, DELAY> RftMode for Cc1101<SPI, GI, DELAY>
where
    SPI: SpiDevice,
    GI: InputPin,
    DELAY: DelayNs,
{
    type ModeErrorType = Cc1101Error<SPI::Error, GI::Error>;

    fn as_idle(&mut self) -> Result<(), Self::ModeErrorType> {
        self.strobe(strobes::SIDLE)?;
        self._delay_impl.delay_us(MODE_SETTLE_US);
        Ok(())
    }

    fn as_rx(&mut self) -> Result<(), Self::ModeErrorType> {
        self.strobe(strobes::SRX)?;
        self._delay_impl.delay_us(MODE_SETTLE_US);
        Ok(())
    }

    /// With MCSM1 configured as in the default profile, the radio returns
    /// to idle by itself once the TX FIFO has been sent.
    fn as_tx(&mut self) -> Result<(), Self::ModeErrorType> {
        self.strobe(strobes::STX)?;
        self._delay_impl.delay_us(MODE_SETTLE_US);
        Ok(())
    }
}

use embedded_hal::{delay::DelayNs, digital::InputPin, spi::SpiDevice};

pub(crate) mod bit_fields;
mod constants;
mod fifo;
mod init;
mod mode;
mod radio;
use crate::radio::config::IMAGE_LEN;
use bit_fields::ChipStatus;
pub use constants::{access, registers, strobes, FIFO_BYTES_MASK};

/// An collection of error types to describe hardware malfunctions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cc1101Error<SPI, GPIO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a GDO pin error.
    Gpio(GPIO),
    /// Represents a corruption of binary data (as it was transferred over
    /// the SPI bus' MISO), including an absent or unresponsive chip.
    BinaryCorruption,
}

/// Largest SPI transaction: header byte plus a full configuration image.
const BUF_LEN: usize = IMAGE_LEN + 1;

/// This struct implements the [`Rft*` traits](mod@crate::radio::prelude)
/// for the CC1101 transceiver.
///
/// The chip-select line is owned by the [`SpiDevice`] implementation.
/// `gdo0_pin` is the packet-ready line (asserted on sync word, deasserted at
/// end of packet per the IOCFG0 profile); `gdo2_pin` optionally exposes the
/// chip's carrier-sense output.
pub struct Cc1101<SPI, GI, DELAY> {
    _spi: SPI,
    gdo0_pin: GI,
    gdo2_pin: Option<GI>,
    _delay_impl: DELAY,
    _buf: [u8; BUF_LEN],
    _status: ChipStatus,
}

impl<SPI, GI, DELAY> Cc1101<SPI, GI, DELAY>
where
    SPI: SpiDevice,
    GI: InputPin,
    DELAY: DelayNs,
{
    /// Instantiate a [`Cc1101`] object for use on the specified `spi` bus
    /// with the given GDO pins.
    ///
    /// The radio's CSn pin (aka Chip Select pin) shall be defined when
    /// instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
    /// object (passed to the `spi` parameter).
    pub fn new(spi: SPI, gdo0_pin: GI, gdo2_pin: Option<GI>, delay_impl: DELAY) -> Self {
        Self {
            _spi: spi,
            gdo0_pin,
            gdo2_pin,
            _delay_impl: delay_impl,
            _buf: [0u8; BUF_LEN],
            _status: ChipStatus::from_bits(0),
        }
    }

    fn spi_transfer(&mut self, len: u8) -> Result<(), Cc1101Error<SPI::Error, GI::Error>> {
        self._spi
            .transfer_in_place(&mut self._buf[..len as usize])
            .map_err(Cc1101Error::Spi)?;
        self._status = ChipStatus::from_bits(self._buf[0]);
        Ok(())
    }

    /// Issue a command strobe. The chip status byte returned on MISO is
    /// cached in `self._status`.
    fn strobe(&mut self, strobe: u8) -> Result<(), Cc1101Error<SPI::Error, GI::Error>> {
        self._buf[0] = strobe;
        self.spi_transfer(1)
    }

    fn write_register(
        &mut self,
        reg: u8,
        value: u8,
    ) -> Result<(), Cc1101Error<SPI::Error, GI::Error>> {
        self._buf[0] = reg;
        self._buf[1] = value;
        self.spi_transfer(2)
    }

    /// Read back a single configuration register.
    pub fn read_register(&mut self, reg: u8) -> Result<u8, Cc1101Error<SPI::Error, GI::Error>> {
        self._buf[0] = reg | access::READ_SINGLE;
        self._buf[1] = 0;
        self.spi_transfer(2)?;
        Ok(self._buf[1])
    }

    fn write_burst(
        &mut self,
        reg: u8,
        buf: &[u8],
    ) -> Result<(), Cc1101Error<SPI::Error, GI::Error>> {
        self._buf[0] = reg | access::WRITE_BURST;
        let buf_len = buf.len().min(BUF_LEN - 1);
        self._buf[1..(buf_len + 1)].copy_from_slice(&buf[..buf_len]);
        self.spi_transfer(buf_len as u8 + 1)
    }

    /// Burst-read `len` bytes from `reg`; the data lands in
    /// `self._buf[1..=len]`.
    fn read_burst(&mut self, reg: u8, len: u8) -> Result<(), Cc1101Error<SPI::Error, GI::Error>> {
        self._buf[0] = reg | access::READ_BURST;
        for i in 1..(len + 1) as usize {
            self._buf[i] = 0;
        }
        self.spi_transfer(len + 1)
    }

    /// Read-only status registers (PARTNUM and up) share their address
    /// space with the command strobes; the burst bit selects the register.
    fn read_status_register(&mut self, reg: u8) -> Result<u8, Cc1101Error<SPI::Error, GI::Error>> {
        self._buf[0] = reg | access::READ_BURST;
        self._buf[1] = 0;
        self.spi_transfer(2)?;
        Ok(self._buf[1])
    }

    /// The carrier-sense state reported on the GDO2 line.
    ///
    /// Always `false` when the radio was built without a GDO2 pin.
    pub fn carrier_sense(&mut self) -> Result<bool, Cc1101Error<SPI::Error, GI::Error>> {
        match self.gdo2_pin.as_mut() {
            Some(pin) => pin.is_high().map_err(Cc1101Error::Gpio),
            None => Ok(false),
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{access, registers};
    use crate::{spi_test_expects, test::mk_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    pub fn read_register() {
        let spi_expectations = spi_test_expects![
            // read the MCSM0 register value
            (
                vec![registers::MCSM0 | access::READ_SINGLE, 0u8],
                vec![0x0Fu8, 0x18u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut gdo0_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.read_register(registers::MCSM0).unwrap(), 0x18);
        spi.done();
        gdo0_pin.done();
    }

    #[test]
    pub fn read_status_register() {
        let spi_expectations = spi_test_expects![
            // status registers are addressed with the burst bit set
            (
                vec![registers::MARCSTATE | access::READ_BURST, 0u8],
                vec![0x0Fu8, 0x0Du8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut gdo0_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.read_status_register(registers::MARCSTATE).unwrap(), 0x0D);
        spi.done();
        gdo0_pin.done();
    }

    #[test]
    pub fn carrier_sense_without_gdo2() {
        let mocks = mk_radio(&[], &[]);
        let (mut radio, mut spi, mut gdo0_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(!radio.carrier_sense().unwrap());
        spi.done();
        gdo0_pin.done();
    }
}

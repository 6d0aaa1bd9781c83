//! A module for the user-facing fan controller.

use crate::protocol::{FanDispatcher, FanEvent, ProtocolError};
use crate::radio::prelude::{RftFifo, RftInit, RftMode, RftRadio};
use crate::types::{FanSpeed, PairingInfo};

/// An collection of error types for fan control requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FanError<E> {
    /// The radio reported a hardware error.
    Radio(E),
    /// An operation is already in flight; poll until it resolves.
    Busy,
    /// The fan has not been paired (or pairing info was not restored).
    NotPaired,
}

impl<E> From<ProtocolError<E>> for FanError<E> {
    fn from(err: ProtocolError<E>) -> Self {
        match err {
            ProtocolError::Radio(err) => FanError::Radio(err),
            ProtocolError::Busy => FanError::Busy,
        }
    }
}

/// The user-facing fan handle: pairing lifecycle, speed commands, and the
/// cached fan state.
///
/// All radio work is delegated to a [`FanDispatcher`]; the controller only
/// adds pairing-info bookkeeping and commits state changes once the unit
/// acknowledges them. Drive it by calling [`FanController::poll()`]
/// periodically with a monotonic millisecond timestamp.
pub struct FanController<R> {
    dispatcher: FanDispatcher<R>,
    pairing: Option<PairingInfo>,
    speed: FanSpeed,
    pending_speed: Option<FanSpeed>,
}

impl<R, E> FanController<R>
where
    R: RftInit<InitErrorType = E>
        + RftMode<ModeErrorType = E>
        + RftFifo<FifoErrorType = E>
        + RftRadio<RadioErrorType = E>,
{
    /// Wrap a radio. Call [`FanController::init()`] before anything else.
    pub fn new(radio: R) -> Self {
        Self {
            dispatcher: FanDispatcher::new(radio),
            pairing: None,
            speed: FanSpeed::Auto,
            pending_speed: None,
        }
    }

    /// Initialize the radio hardware (see [`RftInit::init()`]).
    pub fn init(&mut self) -> Result<(), FanError<E>> {
        self.dispatcher.radio_mut().init().map_err(FanError::Radio)
    }

    /// The pairing info currently in use, if any.
    pub fn pairing_info(&self) -> Option<&PairingInfo> {
        self.pairing.as_ref()
    }

    /// Adopt pairing info restored from persistent storage
    /// (see [`PairingInfo::from_bytes()`]).
    pub fn restore_pairing(&mut self, info: PairingInfo) {
        self.pairing = Some(info);
    }

    /// Forget the paired network. The fan must be re-paired before further
    /// speed commands.
    pub fn clear_pairing(&mut self) {
        self.pairing = None;
    }

    /// The last speed the main unit acknowledged.
    pub fn speed(&self) -> FanSpeed {
        self.speed
    }

    /// Is a pairing or speed operation currently in flight?
    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    /// Begin the pairing handshake. `device_id` is the id this remote will
    /// use on the fan's network; pick it randomly per installation.
    ///
    /// Completion is reported by [`FanController::poll()`] as
    /// [`FanEvent::Paired`], at which point the info is adopted and should
    /// also be persisted by the host.
    pub fn start_pairing(&mut self, device_id: u8) -> Result<(), FanError<E>> {
        self.dispatcher.start_pairing(device_id)?;
        Ok(())
    }

    /// Command a new ventilation speed.
    pub fn set_speed(&mut self, speed: FanSpeed) -> Result<(), FanError<E>> {
        self.set_speed_with_timer(speed, 0)
    }

    /// Command a ventilation speed that reverts after `timer_minutes`
    /// (`0` means no timer).
    pub fn set_speed_with_timer(
        &mut self,
        speed: FanSpeed,
        timer_minutes: u8,
    ) -> Result<(), FanError<E>> {
        let Some(info) = self.pairing else {
            return Err(FanError::NotPaired);
        };
        self.dispatcher.start_set_speed(&info, speed, timer_minutes)?;
        self.pending_speed = Some(speed);
        Ok(())
    }

    /// Drive the pending operation forward and apply its outcome.
    ///
    /// `now_ms` is a monotonic millisecond timestamp (wrapping is fine).
    /// The resolved [`FanEvent`], if any, is also returned so the host can
    /// log it or persist fresh pairing info.
    pub fn poll(&mut self, now_ms: u32) -> Result<Option<FanEvent>, FanError<E>> {
        let event = self.dispatcher.poll(now_ms)?;
        match event {
            Some(FanEvent::SpeedSet) => {
                if let Some(speed) = self.pending_speed.take() {
                    self.speed = speed;
                }
            }
            Some(FanEvent::Paired(info)) => {
                self.pairing = Some(info);
            }
            Some(FanEvent::Failed(_)) => {
                self.pending_speed = None;
            }
            None => {}
        }
        Ok(event)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{FanController, FanError};
    use crate::protocol::{commands, device_types, FanEvent, FanFrame, Operation, FRAME_SIZE};
    use crate::test::FakeRadio;
    use crate::types::{FanSpeed, PairingInfo};

    fn paired() -> PairingInfo {
        PairingInfo {
            network_id: 0x89AB_CDEF,
            main_unit_type: device_types::MAIN_UNIT,
            main_unit_id: 0x1D,
            my_device_id: 0x42,
        }
    }

    fn any_reply() -> [u8; FRAME_SIZE] {
        let mut bytes = [0u8; FRAME_SIZE];
        bytes[2] = device_types::MAIN_UNIT;
        bytes[3] = 0x1D;
        bytes[5] = 0x05;
        bytes
    }

    fn join_open_offer() -> [u8; FRAME_SIZE] {
        let mut bytes = [0u8; FRAME_SIZE];
        bytes[2] = device_types::MAIN_UNIT;
        bytes[3] = 0x1D;
        bytes[5] = commands::NETWORK_JOIN_OPEN;
        bytes[6] = 4;
        bytes[7..11].copy_from_slice(&0x89AB_CDEFu32.to_le_bytes());
        bytes
    }

    #[test]
    fn refuses_speed_when_not_paired() {
        let mut fan = FanController::new(FakeRadio::new());
        assert_eq!(fan.set_speed(FanSpeed::High), Err(FanError::NotPaired));
    }

    #[test]
    fn speed_commits_only_after_ack() {
        let mut fan = FanController::new(FakeRadio::new());
        fan.restore_pairing(paired());
        fan.set_speed(FanSpeed::High).unwrap();
        assert_eq!(fan.speed(), FanSpeed::Auto);
        assert_eq!(fan.set_speed(FanSpeed::Low), Err(FanError::Busy));

        assert_eq!(fan.poll(0).unwrap(), None);
        fan.dispatcher.radio_mut().rx_queue.push_back(any_reply());
        assert_eq!(fan.poll(10).unwrap(), Some(FanEvent::SpeedSet));
        assert_eq!(fan.speed(), FanSpeed::High);
        assert!(!fan.is_busy());
    }

    #[test]
    fn failed_speed_command_keeps_old_state() {
        let mut fan = FanController::new(FakeRadio::new());
        fan.restore_pairing(paired());
        fan.set_speed(FanSpeed::Max).unwrap();

        let mut now = 0u32;
        let mut event = None;
        while event.is_none() {
            assert!(fan.is_busy());
            event = fan.poll(now).unwrap();
            now = now.wrapping_add(crate::protocol::REPLY_TIMEOUT_MS);
        }
        assert_eq!(event, Some(FanEvent::Failed(Operation::SetSpeed)));
        assert_eq!(fan.speed(), FanSpeed::Auto);
    }

    #[test]
    fn pairing_adopts_info() {
        let mut fan = FanController::new(FakeRadio::new());
        assert!(fan.pairing_info().is_none());
        fan.start_pairing(0x42).unwrap();

        assert_eq!(fan.poll(0).unwrap(), None);
        fan.dispatcher.radio_mut().rx_queue.push_back(join_open_offer());
        assert_eq!(fan.poll(10).unwrap(), None);
        assert_eq!(fan.poll(20).unwrap(), None);
        fan.dispatcher.radio_mut().rx_queue.push_back(any_reply());
        assert_eq!(fan.poll(30).unwrap(), None);
        assert_eq!(fan.poll(40).unwrap(), None);
        fan.dispatcher.radio_mut().rx_queue.push_back(any_reply());
        assert_eq!(fan.poll(50).unwrap(), Some(FanEvent::Paired(paired())));

        assert_eq!(fan.pairing_info(), Some(&paired()));
        // a speed command now goes through
        fan.set_speed(FanSpeed::Medium).unwrap();

        fan.clear_pairing();
        assert!(fan.is_busy());
        assert!(fan.pairing_info().is_none());
    }

    #[test]
    fn timer_command_frame() {
        let mut fan = FanController::new(FakeRadio::new());
        fan.restore_pairing(paired());
        fan.set_speed_with_timer(FanSpeed::Max, 15).unwrap();
        assert_eq!(
            fan.dispatcher.radio_mut().tx_frames[0],
            FanFrame::set_speed(&paired(), FanSpeed::Max, 15).to_bytes()
        );
    }
}

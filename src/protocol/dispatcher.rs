use super::frame::{commands, FanFrame, FRAME_SIZE, LINK_NETWORK_ID};
use crate::radio::prelude::{RftFifo, RftMode, RftRadio};
use crate::types::{FanSpeed, PairingInfo};

/// How long to listen for a reply after each transmission.
pub const REPLY_TIMEOUT_MS: u32 = 500;

/// How many times a frame is transmitted before the operation fails.
pub const TX_ATTEMPTS: u8 = 10;

/// The operation a [`FanDispatcher`] is (or was) running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Broadcasting on the link network, waiting for a main unit's offer.
    PairingDiscover,
    /// Asking to join the offered network.
    PairingJoin,
    /// Sealing the join with a final acknowledgement.
    PairingAck,
    /// Commanding a speed (or speed-with-timer) change.
    SetSpeed,
}

/// Something a [`FanDispatcher::poll()`] call resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FanEvent {
    /// The pairing handshake completed; persist this to skip pairing after
    /// a reboot.
    Paired(PairingInfo),
    /// The main unit acknowledged the speed command.
    SpeedSet,
    /// The given operation ran out of transmission attempts (or received a
    /// reply it could not make sense of).
    Failed(Operation),
}

/// Errors surfaced by dispatcher entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtocolError<E> {
    /// The radio reported a hardware error.
    Radio(E),
    /// An operation is already in flight; poll until it resolves.
    Busy,
}

impl<E> From<E> for ProtocolError<E> {
    fn from(err: E) -> Self {
        ProtocolError::Radio(err)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Transmitting,
    WaitingResponse { since: u32 },
}

/// A non-blocking driver for the fan protocol's request/reply exchanges.
///
/// Nothing here waits on the radio. Start an operation with
/// [`FanDispatcher::start_pairing()`] or
/// [`FanDispatcher::start_set_speed()`], then call
/// [`FanDispatcher::poll()`] with a monotonic millisecond timestamp until it
/// yields a [`FanEvent`]. Timeouts and retransmissions happen inside
/// `poll()`; the timestamp may wrap.
pub struct FanDispatcher<R> {
    radio: R,
    state: State,
    op: Option<Operation>,
    tx_frame: [u8; FRAME_SIZE],
    rx_frame: [u8; FRAME_SIZE],
    attempts: u8,
    max_attempts: u8,
    my_device_id: u8,
    draft: Option<PairingInfo>,
}

impl<R, E> FanDispatcher<R>
where
    R: RftMode<ModeErrorType = E>
        + RftFifo<FifoErrorType = E>
        + RftRadio<RadioErrorType = E>,
{
    /// Wrap an already initialized radio.
    pub fn new(radio: R) -> Self {
        Self {
            radio,
            state: State::Idle,
            op: None,
            tx_frame: [0; FRAME_SIZE],
            rx_frame: [0; FRAME_SIZE],
            attempts: 0,
            max_attempts: TX_ATTEMPTS,
            my_device_id: 0,
            draft: None,
        }
    }

    /// Access the wrapped radio, e.g. for re-initialization after a brownout.
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Is an operation currently in flight?
    pub fn is_busy(&self) -> bool {
        self.state != State::Idle
    }

    /// Begin the pairing handshake, transmitting on the link network.
    ///
    /// `device_id` is the id this remote will use on the fan's network;
    /// pick it randomly per installation. Reserved values (0x00, 0xFF) are
    /// replaced with 0x01.
    pub fn start_pairing(&mut self, device_id: u8) -> Result<(), ProtocolError<E>> {
        if self.state != State::Idle {
            return Err(ProtocolError::Busy);
        }
        self.my_device_id = match device_id {
            0x00 | 0xFF => 0x01,
            id => id,
        };
        self.op = Some(Operation::PairingDiscover);
        self.draft = None;
        self.attempts = 0;
        self.max_attempts = TX_ATTEMPTS;

        self.radio.as_idle()?;
        self.radio.set_network_id(LINK_NETWORK_ID)?;
        self.tx_frame = FanFrame::discovery(self.my_device_id).to_bytes();
        self.start_transmit()
    }

    /// Begin a speed (or speed-with-timer) command on the paired network.
    pub fn start_set_speed(
        &mut self,
        info: &PairingInfo,
        speed: FanSpeed,
        timer_minutes: u8,
    ) -> Result<(), ProtocolError<E>> {
        if self.state != State::Idle {
            return Err(ProtocolError::Busy);
        }
        self.op = Some(Operation::SetSpeed);
        self.attempts = 0;
        self.max_attempts = TX_ATTEMPTS;

        self.radio.as_idle()?;
        self.radio.set_network_id(info.network_id)?;
        self.tx_frame = FanFrame::set_speed(info, speed, timer_minutes).to_bytes();
        self.start_transmit()
    }

    /// Drive the pending operation forward.
    ///
    /// `now_ms` is a monotonic millisecond timestamp (wrapping is fine).
    /// Returns a [`FanEvent`] when the operation resolves, [`None`] while it
    /// is still in flight or nothing is pending.
    pub fn poll(&mut self, now_ms: u32) -> Result<Option<FanEvent>, ProtocolError<E>> {
        match self.state {
            State::Idle => Ok(None),
            State::Transmitting => {
                // A 16-byte frame at the profile's data rate is on the air
                // well within one poll interval; switch to listening.
                self.state = State::WaitingResponse { since: now_ms };
                self.radio.as_rx()?;
                Ok(None)
            }
            State::WaitingResponse { since } => {
                if self.radio.read_rx_payload(&mut self.rx_frame)? {
                    self.handle_response()
                } else if now_ms.wrapping_sub(since) >= REPLY_TIMEOUT_MS {
                    self.retry_or_fail()
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn start_transmit(&mut self) -> Result<(), ProtocolError<E>> {
        self.radio.write_tx_payload(&self.tx_frame)?;
        self.state = State::Transmitting;
        self.radio.as_tx()?;
        Ok(())
    }

    fn retry_or_fail(&mut self) -> Result<Option<FanEvent>, ProtocolError<E>> {
        self.attempts += 1;
        if self.attempts < self.max_attempts {
            self.start_transmit()?;
            Ok(None)
        } else {
            self.fail()
        }
    }

    /// Tear down the pending operation and report which one failed.
    fn fail(&mut self) -> Result<Option<FanEvent>, ProtocolError<E>> {
        self.radio.as_idle()?;
        self.state = State::Idle;
        Ok(self.op.take().map(FanEvent::Failed))
    }

    fn finish(&mut self) -> Result<(), ProtocolError<E>> {
        self.radio.as_idle()?;
        self.state = State::Idle;
        self.op = None;
        Ok(())
    }

    fn handle_response(&mut self) -> Result<Option<FanEvent>, ProtocolError<E>> {
        match self.op {
            Some(Operation::SetSpeed) => {
                // Any reply on the paired network acknowledges the command.
                self.finish()?;
                Ok(Some(FanEvent::SpeedSet))
            }
            Some(Operation::PairingDiscover) => {
                let frame = FanFrame::from_bytes(&self.rx_frame);
                if frame.command != commands::NETWORK_JOIN_OPEN {
                    return self.fail();
                }
                let info = PairingInfo {
                    network_id: frame.network_id_param(),
                    main_unit_type: frame.src_type,
                    main_unit_id: frame.src_id,
                    my_device_id: self.my_device_id,
                };
                self.draft = Some(info);
                self.op = Some(Operation::PairingJoin);
                self.attempts = 0;

                // Leave the link network and continue on the offered one.
                self.radio.as_idle()?;
                self.radio.set_network_id(info.network_id)?;
                self.tx_frame = FanFrame::join_request(&info).to_bytes();
                self.start_transmit()?;
                Ok(None)
            }
            Some(Operation::PairingJoin) => {
                let Some(info) = self.draft else {
                    return self.fail();
                };
                self.op = Some(Operation::PairingAck);
                self.attempts = 0;
                // The final acknowledgement is not retransmitted.
                self.max_attempts = 1;
                self.tx_frame = FanFrame::join_ack(&info).to_bytes();
                self.start_transmit()?;
                Ok(None)
            }
            Some(Operation::PairingAck) => {
                let Some(info) = self.draft.take() else {
                    return self.fail();
                };
                self.finish()?;
                Ok(Some(FanEvent::Paired(info)))
            }
            None => {
                // A frame arrived with no operation pending; drop it.
                self.finish()?;
                Ok(None)
            }
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{FanDispatcher, FanEvent, Operation, ProtocolError, REPLY_TIMEOUT_MS, TX_ATTEMPTS};
    use crate::protocol::frame::{commands, device_types, FanFrame, FRAME_SIZE, LINK_NETWORK_ID};
    use crate::test::{FakeMode, FakeRadio};
    use crate::types::{FanSpeed, PairingInfo};

    fn paired() -> PairingInfo {
        PairingInfo {
            network_id: 0x89AB_CDEF,
            main_unit_type: device_types::MAIN_UNIT,
            main_unit_id: 0x1D,
            my_device_id: 0x42,
        }
    }

    fn join_open_offer() -> [u8; FRAME_SIZE] {
        let mut bytes = [0u8; FRAME_SIZE];
        bytes[0] = device_types::REMOTE_CONTROL;
        bytes[1] = 0x42;
        bytes[2] = device_types::MAIN_UNIT;
        bytes[3] = 0x1D;
        bytes[4] = 0xFA;
        bytes[5] = commands::NETWORK_JOIN_OPEN;
        bytes[6] = 4;
        bytes[7..11].copy_from_slice(&0x89AB_CDEFu32.to_le_bytes());
        bytes
    }

    /// An arbitrary reply frame; set-speed and join exchanges accept any.
    fn any_reply() -> [u8; FRAME_SIZE] {
        let mut bytes = [0u8; FRAME_SIZE];
        bytes[2] = device_types::MAIN_UNIT;
        bytes[3] = 0x1D;
        bytes[5] = 0x05;
        bytes
    }

    #[test]
    fn pairing_handshake() {
        let mut dispatcher = FanDispatcher::new(FakeRadio::new());
        dispatcher.start_pairing(0x42).unwrap();
        assert!(dispatcher.is_busy());
        assert_eq!(dispatcher.radio_mut().mode, FakeMode::Tx);
        assert_eq!(dispatcher.radio_mut().network_ids, [LINK_NETWORK_ID]);
        assert_eq!(
            dispatcher.radio_mut().tx_frames[0],
            FanFrame::discovery(0x42).to_bytes()
        );

        // move to listening
        assert_eq!(dispatcher.poll(0).unwrap(), None);
        assert_eq!(dispatcher.radio_mut().mode, FakeMode::Rx);

        // main unit offers its network; the join request goes out on it
        dispatcher.radio_mut().rx_queue.push_back(join_open_offer());
        assert_eq!(dispatcher.poll(10).unwrap(), None);
        assert_eq!(
            dispatcher.radio_mut().network_ids,
            [LINK_NETWORK_ID, 0x89AB_CDEF]
        );
        assert_eq!(
            dispatcher.radio_mut().tx_frames[1],
            FanFrame::join_request(&paired()).to_bytes()
        );

        // join acknowledged; the final ack goes out
        assert_eq!(dispatcher.poll(20).unwrap(), None);
        dispatcher.radio_mut().rx_queue.push_back(any_reply());
        assert_eq!(dispatcher.poll(30).unwrap(), None);
        assert_eq!(
            dispatcher.radio_mut().tx_frames[2],
            FanFrame::join_ack(&paired()).to_bytes()
        );

        // ack acknowledged; pairing resolves
        assert_eq!(dispatcher.poll(40).unwrap(), None);
        dispatcher.radio_mut().rx_queue.push_back(any_reply());
        let event = dispatcher.poll(50).unwrap();
        assert_eq!(event, Some(FanEvent::Paired(paired())));
        assert!(!dispatcher.is_busy());
        assert_eq!(dispatcher.radio_mut().mode, FakeMode::Idle);
    }

    #[test]
    fn pairing_rejects_unexpected_offer() {
        let mut dispatcher = FanDispatcher::new(FakeRadio::new());
        dispatcher.start_pairing(0x42).unwrap();
        assert_eq!(dispatcher.poll(0).unwrap(), None);

        dispatcher.radio_mut().rx_queue.push_back(any_reply());
        let event = dispatcher.poll(10).unwrap();
        assert_eq!(event, Some(FanEvent::Failed(Operation::PairingDiscover)));
        assert!(!dispatcher.is_busy());
    }

    #[test]
    fn pairing_sanitizes_device_id() {
        for reserved in [0x00u8, 0xFF] {
            let mut dispatcher = FanDispatcher::new(FakeRadio::new());
            dispatcher.start_pairing(reserved).unwrap();
            assert_eq!(
                dispatcher.radio_mut().tx_frames[0],
                FanFrame::discovery(0x01).to_bytes()
            );
        }
    }

    #[test]
    fn set_speed_acknowledged() {
        let mut dispatcher = FanDispatcher::new(FakeRadio::new());
        dispatcher
            .start_set_speed(&paired(), FanSpeed::Medium, 0)
            .unwrap();
        assert_eq!(dispatcher.radio_mut().network_ids, [0x89AB_CDEF]);
        assert_eq!(
            dispatcher.radio_mut().tx_frames[0],
            FanFrame::set_speed(&paired(), FanSpeed::Medium, 0).to_bytes()
        );

        assert_eq!(dispatcher.poll(0).unwrap(), None);
        dispatcher.radio_mut().rx_queue.push_back(any_reply());
        assert_eq!(dispatcher.poll(10).unwrap(), Some(FanEvent::SpeedSet));
        assert_eq!(dispatcher.radio_mut().mode, FakeMode::Idle);
    }

    #[test]
    fn set_speed_retries_then_fails() {
        let mut dispatcher = FanDispatcher::new(FakeRadio::new());
        dispatcher
            .start_set_speed(&paired(), FanSpeed::Low, 0)
            .unwrap();

        let mut now = 0u32;
        let mut event = None;
        for attempt in 0..TX_ATTEMPTS {
            assert_eq!(dispatcher.poll(now).unwrap(), None);
            now = now.wrapping_add(REPLY_TIMEOUT_MS);
            event = dispatcher.poll(now).unwrap();
            if attempt + 1 < TX_ATTEMPTS {
                assert_eq!(event, None);
            }
        }
        assert_eq!(event, Some(FanEvent::Failed(Operation::SetSpeed)));
        assert_eq!(
            dispatcher.radio_mut().tx_frames.len(),
            TX_ATTEMPTS as usize
        );
        assert!(!dispatcher.is_busy());
    }

    #[test]
    fn timeout_handles_clock_wraparound() {
        let mut dispatcher = FanDispatcher::new(FakeRadio::new());
        dispatcher
            .start_set_speed(&paired(), FanSpeed::Low, 0)
            .unwrap();

        let start = u32::MAX - 100;
        assert_eq!(dispatcher.poll(start).unwrap(), None);
        // 100 ms before the deadline, no retry yet
        assert_eq!(dispatcher.poll(start.wrapping_add(400)).unwrap(), None);
        assert_eq!(dispatcher.radio_mut().tx_frames.len(), 1);
        // the deadline is past the wrap point
        assert_eq!(dispatcher.poll(start.wrapping_add(500)).unwrap(), None);
        assert_eq!(dispatcher.radio_mut().tx_frames.len(), 2);
    }

    #[test]
    fn busy_while_operation_in_flight() {
        let mut dispatcher = FanDispatcher::new(FakeRadio::new());
        dispatcher
            .start_set_speed(&paired(), FanSpeed::Max, 0)
            .unwrap();
        assert_eq!(
            dispatcher.start_pairing(0x42),
            Err(ProtocolError::Busy)
        );
        assert_eq!(
            dispatcher.start_set_speed(&paired(), FanSpeed::Low, 0),
            Err(ProtocolError::Busy)
        );
    }

    #[test]
    fn idle_poll_is_a_no_op() {
        let mut dispatcher = FanDispatcher::new(FakeRadio::new());
        assert_eq!(dispatcher.poll(0).unwrap(), None);
        assert!(dispatcher.radio_mut().tx_frames.is_empty());
    }
}

//! A module to encapsulate the fan's RF protocol: the 16-byte frame codec
//! and the non-blocking dispatcher that runs pairing and speed commands.

mod frame;
pub use frame::{commands, device_types, FanFrame, FRAME_SIZE, LINK_NETWORK_ID, TTL};

mod dispatcher;
pub use dispatcher::{
    FanDispatcher, FanEvent, Operation, ProtocolError, REPLY_TIMEOUT_MS, TX_ATTEMPTS,
};

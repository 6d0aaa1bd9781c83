#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`FanController::new()`](fn@crate::fan::FanController::new)
//! - [`FanController::init()`](fan/struct.FanController.html#method.init)
//! - [`FanController::start_pairing()`](fan/struct.FanController.html#method.start_pairing)
//! - [`FanController::set_speed()`](fan/struct.FanController.html#method.set_speed)
//! - [`FanController::set_speed_with_timer()`](fan/struct.FanController.html#method.set_speed_with_timer)
//! - [`FanController::poll()`](fan/struct.FanController.html#method.poll)
//! - [`FanController::pairing_info()`](fan/struct.FanController.html#method.pairing_info)
//!
//! ## Advanced API
//!
//! - [`Cc1101::new()`](fn@crate::radio::Cc1101::new)
//! - [`FanDispatcher::new()`](fn@crate::protocol::FanDispatcher::new)
//! - [`FanDispatcher::poll()`](protocol/struct.FanDispatcher.html#method.poll)
//! - [`FanFrame`](struct@crate::protocol::FanFrame)
//! - [`RadioConfig`](struct@crate::radio::RadioConfig)
//!
#![no_std]

mod types;
pub use types::{FanSpeed, PairingInfo};
pub mod fan;
pub mod protocol;
pub mod radio;

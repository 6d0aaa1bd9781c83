//! A module to encapsulate all things related to radio operation.
pub mod prelude;

mod cc1101;
pub use cc1101::{Cc1101, Cc1101Error};

mod config;
pub use config::RadioConfig;

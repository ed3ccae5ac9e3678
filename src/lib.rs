//! Firmware that keeps a USB power bank awake by pulsing a load on one GPIO.
//!
//! The pulse loop runs in its own FreeRTOS task on ESP-IDF. On other targets
//! the same code runs against `std` time so it can be exercised on a host.

pub mod clock;
pub mod config;
pub mod error;
pub mod gpio;
pub mod logger;
pub mod pulse;
pub mod tasks;

pub use error::{PulseError, Result};

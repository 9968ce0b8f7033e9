//! Samples an analog sensor through the ESP32 ADC, logs the readings as CSV
//! rows on a SPIFFS partition and exports the log byte for byte over the
//! serial console.

mod microcontroller_src;
mod utils;

pub mod config;
pub mod gpio;
pub mod sensors;
pub mod session;
pub mod storage;

pub use microcontroller_src::peripherals::PeripheralError;
#[cfg(target_os = "espidf")]
pub use microcontroller_src::Microcontroller;
pub use utils::{delay, logger_error, silent_mode};

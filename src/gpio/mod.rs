pub mod adc;
mod analog_in;
#[cfg(target_os = "espidf")]
mod esp_adc;

pub use {adc::*, analog_in::*};

#[cfg(target_os = "espidf")]
pub use esp_adc::*;

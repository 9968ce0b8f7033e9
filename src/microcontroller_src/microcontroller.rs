use esp_idf_svc::hal::delay::FreeRtos;

use crate::{
    gpio::{AdcChannel, AdcReader, AnalogInError, Attenuation, EspAdc},
    microcontroller_src::peripherals::Peripherals,
    storage::{self, MountedSpiffs, SpiffsConfig, SpiffsError},
};

/// Primary abstraction for interacting with the microcontroller, providing access to the
/// peripherals the logger needs.
///
/// - `peripherals`: Bookkeeping of which peripherals were already handed out
pub struct Microcontroller {
    peripherals: Peripherals,
}

impl Microcontroller {
    /// Creates a new Microcontroller instance
    pub fn new() -> Self {
        esp_idf_svc::sys::link_patches();
        Microcontroller {
            peripherals: Peripherals::new(),
        }
    }

    /// Starts the ADC1 oneshot driver. There is only one ADC unit, so this
    /// succeeds once per process.
    ///
    /// # Errors
    ///
    /// - `AnalogInError::InvalidPeripheral`: If the ADC was already taken
    /// - `AnalogInError::ChannelCreationError`: If the unit driver could not be started
    pub fn take_adc<'a>(&mut self) -> Result<EspAdc<'a>, AnalogInError> {
        self.peripherals.get_adc()?;
        EspAdc::new()
    }

    /// Configures `pin_num` as an analog input on `adc` with 11dB attenuation,
    /// the range used for sensors powered from the 3V3 rail.
    ///
    /// # Returns
    ///
    /// The `AdcChannel` to read the pin from.
    ///
    /// # Errors
    ///
    /// - `AnalogInError::InvalidPeripheral`: If the pin is taken or has no ADC channel
    /// - `AnalogInError::ChannelCreationError`: If the channel could not be configured
    pub fn set_pin_as_analog_in_high_atten(
        &mut self,
        adc: &mut EspAdc<'_>,
        pin_num: usize,
    ) -> Result<AdcChannel, AnalogInError> {
        self.set_pin_as_analog_in(adc, pin_num, Attenuation::High)
    }

    fn set_pin_as_analog_in(
        &mut self,
        adc: &mut EspAdc<'_>,
        pin_num: usize,
        attenuation: Attenuation,
    ) -> Result<AdcChannel, AnalogInError> {
        let channel = AdcChannel(self.peripherals.get_analog_pin(pin_num)?);
        adc.configure(channel, attenuation)?;
        Ok(channel)
    }

    /// Mounts the SPIFFS partition, see [storage::mount].
    pub fn mount_storage(
        &mut self,
        config: &SpiffsConfig,
    ) -> Result<MountedSpiffs, SpiffsError> {
        storage::mount(config)
    }

    pub fn sleep(&self, miliseconds: u32) {
        FreeRtos::delay_ms(miliseconds)
    }
}

impl Default for Microcontroller {
    fn default() -> Self {
        Self::new()
    }
}

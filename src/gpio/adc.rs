use crate::microcontroller_src::peripherals::PeripheralError;

/// Bit width used for every conversion. The ESP32-C6 only allows 12 bits.
pub const ADC_BITS: u32 = 12;

/// Highest raw code the converter can produce (4095 for 12 bits)
pub const MAX_DIGITAL_VAL: u16 = (1 << ADC_BITS) - 1;

/// Enums the different errors possible when working with the analog in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogInError {
    ChannelCreationError,
    ChannelNotConfigured(AdcChannel),
    ErrorReading,
    InvalidPeripheral(PeripheralError),
    InvalidPin,
}

impl From<PeripheralError> for AnalogInError {
    fn from(value: PeripheralError) -> Self {
        AnalogInError::InvalidPeripheral(value)
    }
}

/// ADC1 channel identifier. On the ESP32-C6 channel `n` is wired to GPIO `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdcChannel(pub u8);

/// Input attenuation, which sets the measurable voltage range of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attenuation {
    /// 0 dB, roughly 0 - 0.75 V
    None,
    /// 2.5 dB, roughly 0 - 1.05 V
    Low,
    /// 6 dB, roughly 0 - 1.3 V
    Medium,
    /// 11 dB, roughly 0 - 3.3 V. Used for sensors powered from the 3V3 rail.
    High,
}

/// Oneshot ADC peripheral. There is a single instance per process, created
/// once at startup and lent to readers by mutable reference.
pub trait AdcReader {
    /// Configures `channel` for 12 bit conversions with the given attenuation.
    ///
    /// # Errors
    ///
    /// - `AnalogInError::InvalidPin`: If the channel does not exist on this ADC
    /// - `AnalogInError::ChannelCreationError`: If the driver refused the configuration
    fn configure(
        &mut self,
        channel: AdcChannel,
        attenuation: Attenuation,
    ) -> Result<(), AnalogInError>;

    /// Performs one blocking conversion on a configured channel.
    ///
    /// # Errors
    ///
    /// - `AnalogInError::ChannelNotConfigured`: If `configure` was never called for `channel`
    /// - `AnalogInError::ErrorReading`: If the conversion failed
    fn read_raw(&mut self, channel: AdcChannel) -> Result<u16, AnalogInError>;
}

impl<R: AdcReader + ?Sized> AdcReader for &mut R {
    fn configure(
        &mut self,
        channel: AdcChannel,
        attenuation: Attenuation,
    ) -> Result<(), AnalogInError> {
        (**self).configure(channel, attenuation)
    }

    fn read_raw(&mut self, channel: AdcChannel) -> Result<u16, AnalogInError> {
        (**self).read_raw(channel)
    }
}

use std::mem;

const PIN_COUNT: usize = 24;
const ANALOG_PINS_BOUNDS: (usize, usize) = (0, 6);

/// Enums the errors possible when taking a peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralError {
    AlreadyTaken,
    NotAPin,
    NotAnalogCapable,
}

/// Represents an esp32 Peripheral that can be handed out once
#[derive(Debug, Default, PartialEq, Eq)]
pub enum Peripheral {
    Pin(u8),
    Adc,
    #[default]
    None,
}

impl Peripheral {
    fn take(&mut self) -> Peripheral {
        mem::take(self)
    }
}

/// Represents the peripherals of the esp32C6 this crate uses and provides a way
/// to get each one. Subsequent gets of the same peripheral return `PeripheralError::AlreadyTaken`.
/// GPIO14 is not available on the C6 and is never handed out.
pub struct Peripherals {
    pins: [Peripheral; PIN_COUNT],
    adc: Peripheral,
}

impl Peripherals {
    pub fn new() -> Peripherals {
        let pins: [Peripheral; PIN_COUNT] = std::array::from_fn(|pin_num| match pin_num {
            14 => Peripheral::None,
            _ => Peripheral::Pin(pin_num as u8),
        });
        Peripherals {
            pins,
            adc: Peripheral::Adc,
        }
    }

    /// Takes a pin that is wired to an ADC1 channel.
    ///
    /// # Returns
    ///
    /// The ADC channel number, which on the C6 is the pin number.
    ///
    /// # Errors
    ///
    /// - `PeripheralError::NotAPin`: If the pin does not exist
    /// - `PeripheralError::NotAnalogCapable`: If the pin has no ADC channel
    /// - `PeripheralError::AlreadyTaken`: If the pin was already handed out
    pub fn get_analog_pin(&mut self, pin_num: usize) -> Result<u8, PeripheralError> {
        if pin_num >= PIN_COUNT {
            return Err(PeripheralError::NotAPin);
        }
        if !(ANALOG_PINS_BOUNDS.0..=ANALOG_PINS_BOUNDS.1).contains(&pin_num) {
            return Err(PeripheralError::NotAnalogCapable);
        }
        match self.pins[pin_num].take() {
            Peripheral::Pin(pin) => Ok(pin),
            _ => Err(PeripheralError::AlreadyTaken),
        }
    }

    /// Takes the ADC1 unit.
    ///
    /// # Errors
    ///
    /// - `PeripheralError::AlreadyTaken`: If the ADC was already handed out
    pub fn get_adc(&mut self) -> Result<(), PeripheralError> {
        match self.adc.take() {
            Peripheral::Adc => Ok(()),
            _ => Err(PeripheralError::AlreadyTaken),
        }
    }
}

impl Default for Peripherals {
    fn default() -> Self {
        Self::new()
    }
}

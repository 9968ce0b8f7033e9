use esp_idf_svc::hal::{adc::attenuation::adc_atten_t, adc::*, gpio::*};
use oneshot::{config::AdcChannelConfig, AdcChannelDriver, AdcDriver};
use std::rc::Rc;

use super::adc::{AdcChannel, AdcReader, AnalogInError, Attenuation};

pub type SharableAdcDriver<'a> = Rc<AdcDriver<'a, ADC1>>;

/// Oneshot driver for ADC1, owning one channel driver per configured channel
/// - `adc_driver`: The unit driver shared by every channel driver
/// - `channels`: Channels configured so far, in configuration order
pub struct EspAdc<'a> {
    adc_driver: SharableAdcDriver<'a>,
    channels: Vec<(AdcChannel, AnalogChannels<'a>)>,
}

/// Enums the possible channels from the ADC. In the ESP32-C6 the
/// ADC has 7 channels, each on a different GPIO going from
/// GPIO-0 to GPIO-6 inclusive
enum AnalogChannels<'a> {
    Channel0(AdcChannelDriver<'a, Gpio0, SharableAdcDriver<'a>>),
    Channel1(AdcChannelDriver<'a, Gpio1, SharableAdcDriver<'a>>),
    Channel2(AdcChannelDriver<'a, Gpio2, SharableAdcDriver<'a>>),
    Channel3(AdcChannelDriver<'a, Gpio3, SharableAdcDriver<'a>>),
    Channel4(AdcChannelDriver<'a, Gpio4, SharableAdcDriver<'a>>),
    Channel5(AdcChannelDriver<'a, Gpio5, SharableAdcDriver<'a>>),
    Channel6(AdcChannelDriver<'a, Gpio6, SharableAdcDriver<'a>>),
}

fn to_adc_atten(atten: Attenuation) -> adc_atten_t {
    match atten {
        Attenuation::None => attenuation::NONE,
        Attenuation::Low => attenuation::DB_2_5,
        Attenuation::Medium => attenuation::DB_6,
        Attenuation::High => attenuation::DB_11,
    }
}

impl<'a> EspAdc<'a> {
    /// Starts the ADC1 unit driver. Must only be called once, see
    /// `Microcontroller::take_adc`.
    pub(crate) fn new() -> Result<Self, AnalogInError> {
        let driver = AdcDriver::new(unsafe { ADC1::new() })
            .map_err(|_| AnalogInError::ChannelCreationError)?;
        Ok(EspAdc {
            adc_driver: Rc::new(driver),
            channels: Vec::new(),
        })
    }

    fn new_channel(
        &self,
        channel: AdcChannel,
        attenuation: Attenuation,
    ) -> Result<AnalogChannels<'a>, AnalogInError> {
        let mut config = AdcChannelConfig::new();
        config.attenuation = to_adc_atten(attenuation);
        config.resolution = Resolution::Resolution12Bit;
        config.calibration = true;
        let driver = self.adc_driver.clone();
        let adc_channel_driver = match channel.0 {
            0 => AnalogChannels::Channel0(
                AdcChannelDriver::new(driver, unsafe { Gpio0::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            1 => AnalogChannels::Channel1(
                AdcChannelDriver::new(driver, unsafe { Gpio1::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            2 => AnalogChannels::Channel2(
                AdcChannelDriver::new(driver, unsafe { Gpio2::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            3 => AnalogChannels::Channel3(
                AdcChannelDriver::new(driver, unsafe { Gpio3::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            4 => AnalogChannels::Channel4(
                AdcChannelDriver::new(driver, unsafe { Gpio4::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            5 => AnalogChannels::Channel5(
                AdcChannelDriver::new(driver, unsafe { Gpio5::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            6 => AnalogChannels::Channel6(
                AdcChannelDriver::new(driver, unsafe { Gpio6::new() }, &config)
                    .map_err(|_| AnalogInError::ChannelCreationError)?,
            ),
            _ => return Err(AnalogInError::InvalidPin),
        };
        Ok(adc_channel_driver)
    }
}

impl<'a> AdcReader for EspAdc<'a> {
    fn configure(
        &mut self,
        channel: AdcChannel,
        attenuation: Attenuation,
    ) -> Result<(), AnalogInError> {
        let channel_driver = self.new_channel(channel, attenuation)?;
        self.channels.retain(|(configured, _)| *configured != channel);
        self.channels.push((channel, channel_driver));
        Ok(())
    }

    fn read_raw(&mut self, channel: AdcChannel) -> Result<u16, AnalogInError> {
        let (_, channel_driver) = self
            .channels
            .iter_mut()
            .find(|(configured, _)| *configured == channel)
            .ok_or(AnalogInError::ChannelNotConfigured(channel))?;
        match *channel_driver {
            AnalogChannels::Channel0(ref mut channel_driver) => channel_driver.read_raw(),
            AnalogChannels::Channel1(ref mut channel_driver) => channel_driver.read_raw(),
            AnalogChannels::Channel2(ref mut channel_driver) => channel_driver.read_raw(),
            AnalogChannels::Channel3(ref mut channel_driver) => channel_driver.read_raw(),
            AnalogChannels::Channel4(ref mut channel_driver) => channel_driver.read_raw(),
            AnalogChannels::Channel5(ref mut channel_driver) => channel_driver.read_raw(),
            AnalogChannels::Channel6(ref mut channel_driver) => channel_driver.read_raw(),
        }
        .map_err(|_| AnalogInError::ErrorReading)
    }
}

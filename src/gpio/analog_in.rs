use std::num::NonZeroU16;

use super::adc::{AdcChannel, AdcReader, AnalogInError, MAX_DIGITAL_VAL};
use crate::utils::delay::Delay;

/// Pause between consecutive conversions, letting the analog front-end settle
pub const SETTLE_DELAY_MS: u32 = 2;

/// Reads `amount_of_samples` times from `channel` and returns the floored average.
/// A `SETTLE_DELAY_MS` pause is inserted between consecutive reads, so a single
/// sample is returned untouched and without waiting.
///
/// # Arguments
///
/// - `adc`: The ADC peripheral, with `channel` already configured
/// - `delay`: Used for the settle pauses
/// - `channel`: The channel to sample
/// - `amount_of_samples`: How many conversions to average, at least one
///
/// # Returns
///
/// A `Result` with the average code in `[0, MAX_DIGITAL_VAL]`, or an `AnalogInError`
/// as soon as one read fails.
///
/// # Errors
///
/// - `AnalogInError::ErrorReading`: If a read operation fails
/// - `AnalogInError::ChannelNotConfigured`: If `channel` was not configured
pub fn average_channel<R, D>(
    adc: &mut R,
    delay: &mut D,
    channel: AdcChannel,
    amount_of_samples: NonZeroU16,
) -> Result<u16, AnalogInError>
where
    R: AdcReader + ?Sized,
    D: Delay + ?Sized,
{
    let mut smooth_val: u32 = 0;
    for sample in 0..amount_of_samples.get() {
        if sample > 0 {
            delay.delay_ms(SETTLE_DELAY_MS);
        }
        let read_val = adc.read_raw(channel)?.min(MAX_DIGITAL_VAL);
        smooth_val += read_val as u32;
    }
    let result = smooth_val / amount_of_samples.get() as u32;
    Ok(result as u16)
}

/// Driver for receiving analog inputs from a particular channel
/// - `adc`: The ADC peripheral (usually borrowed) the channel belongs to
/// - `delay`: Delay used between the samples of a smooth read
/// - `channel`: The configured channel
pub struct AnalogIn<R: AdcReader, D: Delay> {
    adc: R,
    delay: D,
    channel: AdcChannel,
}

impl<R: AdcReader, D: Delay> AnalogIn<R, D> {
    /// Wraps a channel of an already configured ADC.
    pub fn new(adc: R, delay: D, channel: AdcChannel) -> Self {
        AnalogIn {
            adc,
            delay,
            channel,
        }
    }

    pub fn channel(&self) -> AdcChannel {
        self.channel
    }

    /// Returns one raw value in [0, 4095].
    ///
    /// # Errors
    ///
    /// - `AnalogInError::ErrorReading`: If the read operation failed
    pub fn read_raw(&mut self) -> Result<u16, AnalogInError> {
        Ok(self.adc.read_raw(self.channel)?.min(MAX_DIGITAL_VAL))
    }

    /// Reads multiple times from the channel and returns the average value.
    /// See [average_channel].
    pub fn smooth_read(&mut self, amount_of_samples: NonZeroU16) -> Result<u16, AnalogInError> {
        average_channel(
            &mut self.adc,
            &mut self.delay,
            self.channel,
            amount_of_samples,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gpio::adc::mock::ScriptedAdc;
    use crate::utils::delay::RecordingDelay;

    const CH: AdcChannel = AdcChannel(4);

    fn samples(n: u16) -> NonZeroU16 {
        NonZeroU16::new(n).unwrap()
    }

    #[test]
    fn test0_single_sample_is_returned_unmodified() {
        let mut adc = ScriptedAdc::with_samples(CH, &[1234]);
        let mut delay = RecordingDelay::default();
        let avg = average_channel(&mut adc, &mut delay, CH, samples(1)).unwrap();
        assert_eq!(avg, 1234);
        assert!(delay.pauses.is_empty());
    }

    #[test]
    fn test1_average_is_floored() {
        let mut adc = ScriptedAdc::with_samples(CH, &[10, 11, 11]);
        let mut delay = RecordingDelay::default();
        let avg = average_channel(&mut adc, &mut delay, CH, samples(3)).unwrap();
        assert_eq!(avg, 10);
        assert_eq!(delay.pauses, vec![SETTLE_DELAY_MS, SETTLE_DELAY_MS]);
    }

    #[test]
    fn test2_average_stays_in_range_for_saturated_reads() {
        let reads = [MAX_DIGITAL_VAL; 8];
        let mut adc = ScriptedAdc::with_samples(CH, &reads);
        let mut delay = RecordingDelay::default();
        let avg = average_channel(&mut adc, &mut delay, CH, samples(8)).unwrap();
        assert_eq!(avg, MAX_DIGITAL_VAL);
    }

    #[test]
    fn test3_average_of_mixed_extremes_stays_in_range() {
        let reads: Vec<u16> = (0..64).map(|i| if i % 2 == 0 { 0 } else { 4095 }).collect();
        let mut adc = ScriptedAdc::with_samples(CH, &reads);
        let mut delay = RecordingDelay::default();
        let avg = average_channel(&mut adc, &mut delay, CH, samples(64)).unwrap();
        assert_eq!(avg, 2047);
    }

    #[test]
    fn test4_out_of_range_codes_are_clamped() {
        let mut adc = ScriptedAdc::with_samples(CH, &[5000, 5000]);
        let mut delay = RecordingDelay::default();
        let avg = average_channel(&mut adc, &mut delay, CH, samples(2)).unwrap();
        assert_eq!(avg, MAX_DIGITAL_VAL);
    }

    #[test]
    fn test5_read_failure_is_propagated() {
        let mut adc = ScriptedAdc::with_samples(CH, &[100]);
        let mut delay = RecordingDelay::default();
        let res = average_channel(&mut adc, &mut delay, CH, samples(2));
        assert_eq!(res, Err(AnalogInError::ErrorReading));
    }

    #[test]
    fn test6_unconfigured_channel_is_rejected() {
        let mut adc = ScriptedAdc::new();
        let mut delay = RecordingDelay::default();
        let res = average_channel(&mut adc, &mut delay, AdcChannel(2), samples(1));
        assert_eq!(res, Err(AnalogInError::ChannelNotConfigured(AdcChannel(2))));
    }

    #[test]
    fn test7_analog_in_smooth_read_borrows_the_adc() {
        let mut adc = ScriptedAdc::with_samples(CH, &[100, 200, 300, 400, 4000]);
        {
            let mut analog_in = AnalogIn::new(&mut adc, RecordingDelay::default(), CH);
            assert_eq!(analog_in.smooth_read(samples(4)).unwrap(), 250);
            assert_eq!(analog_in.read_raw().unwrap(), 4000);
        }
        assert_eq!(adc.reads, 5);
    }
}

use std::num::NonZeroU16;

use super::SampleSource;
use crate::gpio::{AdcReader, AnalogIn, AnalogInError, MAX_DIGITAL_VAL};
use crate::utils::delay::Delay;

/// Header of the potentiometer log
pub const POTENTIOMETER_CSV_HEADER: &str = "index,raw,millivolts";

/// Full scale of the 11 dB attenuation range, in millivolts
const FULL_SCALE_MV: u32 = 3300;

/// Scales an averaged code to millivolts on the 0 - 3.3 V range.
pub fn raw_to_millivolts(code: u16) -> u32 {
    code.min(MAX_DIGITAL_VAL) as u32 * FULL_SCALE_MV / MAX_DIGITAL_VAL as u32
}

/// Live potentiometer rows: `<index>,<raw>,<millivolts>`
pub struct PotentiometerSource<R: AdcReader, D: Delay> {
    analog_in: AnalogIn<R, D>,
    samples_per_reading: NonZeroU16,
}

impl<R: AdcReader, D: Delay> PotentiometerSource<R, D> {
    pub fn new(analog_in: AnalogIn<R, D>, samples_per_reading: NonZeroU16) -> Self {
        PotentiometerSource {
            analog_in,
            samples_per_reading,
        }
    }
}

impl<R: AdcReader, D: Delay> SampleSource for PotentiometerSource<R, D> {
    fn header(&self) -> Option<&str> {
        Some(POTENTIOMETER_CSV_HEADER)
    }

    fn next_row(&mut self, index: usize) -> Result<String, AnalogInError> {
        let raw = self.analog_in.smooth_read(self.samples_per_reading)?;
        Ok(format!("{},{},{}", index, raw, raw_to_millivolts(raw)))
    }

    fn is_paced(&self) -> bool {
        true
    }
}

use super::SampleSource;
use crate::gpio::AnalogInError;

/// Deterministic fake rows `<time_step>,<angle>,<sensor>` used to exercise the
/// filesystem without hardware. The angle sweeps 0..180 in 15 degree steps and
/// the sensor value cycles through 100..150. Writes no header.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntheticSource;

impl SyntheticSource {
    pub fn angle(time_step: usize) -> usize {
        (time_step * 15) % 180
    }

    pub fn sensor(time_step: usize) -> usize {
        100 + (time_step * 3) % 50
    }
}

impl SampleSource for SyntheticSource {
    fn header(&self) -> Option<&str> {
        None
    }

    fn next_row(&mut self, index: usize) -> Result<String, AnalogInError> {
        Ok(format!(
            "{},{},{}",
            index,
            Self::angle(index),
            Self::sensor(index)
        ))
    }

    fn is_paced(&self) -> bool {
        false
    }
}

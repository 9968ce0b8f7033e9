use std::num::NonZeroU16;

use super::SampleSource;
use crate::gpio::{AdcReader, AnalogIn, AnalogInError, MAX_DIGITAL_VAL};
use crate::utils::delay::Delay;

const KELVIN_OFFSET: f32 = 273.15;

/// Header of the thermistor log
pub const THERMISTOR_CSV_HEADER: &str = "index,temperature_C";

/// NTC thermistor read through a voltage divider:
/// `Vin -> r_fixed -> node -> thermistor -> GND`, with the ADC on the node.
/// Resistance is turned into temperature with the Beta equation
/// `1/T = 1/T0 + ln(R/R0)/B`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermistor {
    /// Divider supply voltage, also the ADC full scale
    pub vin: f32,
    /// Series resistor in ohms
    pub r_fixed: f32,
    /// Thermistor resistance at `t0_kelvin`, in ohms
    pub r0: f32,
    pub t0_kelvin: f32,
    pub beta: f32,
    /// Code produced when the node sits at `vin`
    pub max_code: u16,
}

impl Default for Thermistor {
    /// 10k NTC, B = 3950, on a 10k divider fed from 3.3 V
    fn default() -> Self {
        Thermistor {
            vin: 3.3,
            r_fixed: 10_000.0,
            r0: 10_000.0,
            t0_kelvin: 25.0 + KELVIN_OFFSET,
            beta: 3950.0,
            max_code: MAX_DIGITAL_VAL,
        }
    }
}

impl Thermistor {
    /// Converts an averaged ADC code into degrees Celsius.
    ///
    /// At `max_code` and above the node equals `vin` and the divider inversion
    /// divides by zero, so those codes return `f32::NAN`. A code of 0 is left
    /// to the float arithmetic: `ln(0)` is `-inf` and the result lands on
    /// absolute zero, -273.15 °C.
    pub fn raw_to_celsius(&self, code: u16) -> f32 {
        if code >= self.max_code {
            return f32::NAN;
        }
        let v_node = code as f32 * self.vin / self.max_code as f32;
        let r_thermistor = self.r_fixed * v_node / (self.vin - v_node);
        let inv_t = 1.0 / self.t0_kelvin + (r_thermistor / self.r0).ln() / self.beta;
        1.0 / inv_t - KELVIN_OFFSET
    }
}

/// Live thermistor rows: `#<index>, <temperature>°C`
pub struct ThermistorSource<R: AdcReader, D: Delay> {
    analog_in: AnalogIn<R, D>,
    samples_per_reading: NonZeroU16,
    thermistor: Thermistor,
}

impl<R: AdcReader, D: Delay> ThermistorSource<R, D> {
    pub fn new(
        analog_in: AnalogIn<R, D>,
        samples_per_reading: NonZeroU16,
        thermistor: Thermistor,
    ) -> Self {
        ThermistorSource {
            analog_in,
            samples_per_reading,
            thermistor,
        }
    }

    /// Takes one averaged reading and converts it
    pub fn read_celsius(&mut self) -> Result<f32, AnalogInError> {
        let code = self.analog_in.smooth_read(self.samples_per_reading)?;
        Ok(self.thermistor.raw_to_celsius(code))
    }
}

impl<R: AdcReader, D: Delay> SampleSource for ThermistorSource<R, D> {
    fn header(&self) -> Option<&str> {
        Some(THERMISTOR_CSV_HEADER)
    }

    fn next_row(&mut self, index: usize) -> Result<String, AnalogInError> {
        let temperature = self.read_celsius()?;
        Ok(format_row(index, temperature))
    }

    fn is_paced(&self) -> bool {
        true
    }
}

fn format_row(index: usize, temperature: f32) -> String {
    format!("#{}, {:.2}°C", index, temperature)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gpio::{adc::mock::ScriptedAdc, AdcChannel};
    use crate::utils::delay::RecordingDelay;

    #[test]
    fn test0_half_scale_is_room_temperature() {
        let t = Thermistor::default().raw_to_celsius(2048);
        assert!((t - 25.0).abs() < 0.05, "got {t}");
    }

    #[test]
    fn test1_conversion_is_deterministic() {
        let model = Thermistor::default();
        for code in [1, 500, 2048, 3000, 4094] {
            assert_eq!(
                model.raw_to_celsius(code).to_bits(),
                model.raw_to_celsius(code).to_bits()
            );
        }
    }

    #[test]
    fn test2_higher_code_means_colder() {
        let model = Thermistor::default();
        let warm = model.raw_to_celsius(1000);
        let cold = model.raw_to_celsius(3000);
        assert!(warm > 25.0);
        assert!(cold < 25.0);
        assert!(warm > cold);
    }

    #[test]
    fn test3_saturated_code_is_nan() {
        let model = Thermistor::default();
        assert!(model.raw_to_celsius(MAX_DIGITAL_VAL).is_nan());
        assert!(model.raw_to_celsius(u16::MAX).is_nan());
    }

    #[test]
    fn test4_zero_code_is_absolute_zero() {
        let t = Thermistor::default().raw_to_celsius(0);
        assert!(!t.is_nan());
        assert_eq!(t, -KELVIN_OFFSET);
        assert_eq!(format_row(0, t), "#0, -273.15°C");
    }

    #[test]
    fn test5_rows_use_two_decimals_and_degree_sign() {
        assert_eq!(format_row(0, 24.996), "#0, 25.00°C");
        assert_eq!(format_row(12, -3.14159), "#12, -3.14°C");
        assert_eq!(format_row(3, f32::NAN), "#3, NaN°C");
    }

    #[test]
    fn test6_source_averages_then_converts() {
        let channel = AdcChannel(4);
        let mut adc = ScriptedAdc::with_samples(channel, &[2047, 2049, 4095]);
        let analog_in = AnalogIn::new(&mut adc, RecordingDelay::default(), channel);
        let mut source = ThermistorSource::new(
            analog_in,
            NonZeroU16::new(2).unwrap(),
            Thermistor::default(),
        );

        assert_eq!(source.header(), Some(THERMISTOR_CSV_HEADER));
        assert!(source.is_paced());
        assert_eq!(source.next_row(0).unwrap(), "#0, 24.99°C");
        assert_eq!(source.next_row(1), Err(AnalogInError::ErrorReading));
    }
}

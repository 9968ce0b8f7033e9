use std::path::Path;

use crate::{
    config::LoggerConfig,
    gpio::{AdcChannel, AdcReader, AnalogIn},
    sensors::{SampleSource, SyntheticSource, Thermistor, ThermistorSource},
    storage::{self, StorageError},
    utils::delay::Delay,
};

/// Logs `config.rows_per_session` thermistor readings from `channel` into the
/// configured CSV log, one every `config.sample_period_ms`.
///
/// # Returns
///
/// The number of rows appended.
///
/// # Errors
///
/// - `StorageError`: See [storage::append_rows]
pub fn log_thermistor_samples<R, D>(
    config: &LoggerConfig,
    adc: &mut R,
    channel: AdcChannel,
    delay: D,
) -> Result<usize, StorageError>
where
    R: AdcReader,
    D: Delay + Clone,
{
    let mut pacing = delay.clone();
    let analog_in = AnalogIn::new(adc, delay, channel);
    log::info!(
        "Logging {} thermistor rows from ADC channel {}",
        config.rows_per_session,
        analog_in.channel().0
    );
    let mut source = ThermistorSource::new(
        analog_in,
        config.samples_per_reading,
        Thermistor::default(),
    );
    log_samples(config.log_path(), config, &mut source, &mut pacing)
}

/// Appends `rows` synthetic rows to `path`, for checking the filesystem
/// without any sensor attached.
pub fn log_synthetic_samples<P: AsRef<Path>>(
    path: P,
    rows: usize,
) -> Result<usize, StorageError> {
    storage::append_rows(path, rows, 0, &mut SyntheticSource, &mut NoPacing)
}

fn log_samples<P, S, D>(
    path: P,
    config: &LoggerConfig,
    source: &mut S,
    pacing: &mut D,
) -> Result<usize, StorageError>
where
    P: AsRef<Path>,
    S: SampleSource,
    D: Delay,
{
    storage::append_rows(
        path,
        config.rows_per_session,
        config.sample_period_ms,
        source,
        pacing,
    )
}

/// Synthetic rows are never paced, so no delay is ever requested
struct NoPacing;

impl Delay for NoPacing {
    fn delay_ms(&mut self, _ms: u32) {}
}

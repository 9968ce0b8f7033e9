use std::num::NonZeroU16;

use crate::storage::SpiffsConfig;

const LOG_FILE_NAME: &str = "potdata.csv";
const SAMPLES_PER_READING: u16 = 8;
const SAMPLE_PERIOD_MS: u32 = 2000;
const ROWS_PER_SESSION: usize = 20;
const THERMISTOR_PIN: usize = 4;
const EXPORT_LEAD_IN_MS: u32 = 6000;
const EXPORT_DRAIN_MS: u32 = 2000;

/// Settings of a logging session
/// - `storage`: Where the SPIFFS partition is mounted
/// - `log_file_name`: CSV file, relative to the mount point
/// - `samples_per_reading`: Conversions averaged into one logged reading
/// - `sample_period_ms`: Pause between logged rows
/// - `rows_per_session`: Rows appended each time the device logs
/// - `thermistor_pin`: GPIO the thermistor divider is wired to
/// - `export_lead_in_ms`: Time given to the operator to start capturing the serial port
/// - `export_drain_ms`: Time given to the UART to push out an export before printing anything else
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub storage: SpiffsConfig,
    pub log_file_name: String,
    pub samples_per_reading: NonZeroU16,
    pub sample_period_ms: u32,
    pub rows_per_session: usize,
    pub thermistor_pin: usize,
    pub export_lead_in_ms: u32,
    pub export_drain_ms: u32,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            storage: SpiffsConfig::default(),
            log_file_name: String::from(LOG_FILE_NAME),
            samples_per_reading: NonZeroU16::new(SAMPLES_PER_READING).unwrap_or(NonZeroU16::MIN),
            sample_period_ms: SAMPLE_PERIOD_MS,
            rows_per_session: ROWS_PER_SESSION,
            thermistor_pin: THERMISTOR_PIN,
            export_lead_in_ms: EXPORT_LEAD_IN_MS,
            export_drain_ms: EXPORT_DRAIN_MS,
        }
    }
}

impl LoggerConfig {
    /// Absolute path of the CSV log
    pub fn log_path(&self) -> String {
        self.storage.file_path(&self.log_file_name)
    }
}

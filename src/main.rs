//! Logs thermistor readings to SPIFFS, then exports the CSV over the console
//! so it can be captured into a spreadsheet.

#[cfg(target_os = "espidf")]
fn main() {
    use spiffs_sensor_logger::{config::LoggerConfig, Microcontroller};

    let mut micro = Microcontroller::new();
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = LoggerConfig::default();
    let storage = micro
        .mount_storage(&config.storage)
        .expect("Error mounting SPIFFS");
    let info = storage.info();
    log::info!(
        "SPIFFS at {}: {} of {} bytes used",
        config.storage.base_path,
        info.used,
        info.total
    );

    if let Err(err) = device::run(&mut micro, &config) {
        log::error!("logging session failed: {:?}", err);
    }

    if let Err(err) = storage.unmount() {
        log::error!("unmount failed: {:?}", err);
    }
}

#[cfg(target_os = "espidf")]
mod device {
    use spiffs_sensor_logger::{
        config::LoggerConfig, delay::TaskDelay, logger_error::LoggerError, session, storage,
        Microcontroller,
    };
    use std::io;

    pub fn run(micro: &mut Microcontroller, config: &LoggerConfig) -> Result<(), LoggerError> {
        let mut adc = micro.take_adc()?;
        let channel = micro.set_pin_as_analog_in_high_atten(&mut adc, config.thermistor_pin)?;

        // Time for the operator to start capturing the serial port
        micro.sleep(config.export_lead_in_ms);

        session::log_thermistor_samples(config, &mut adc, channel, TaskDelay)?;

        let log_path = config.log_path();
        storage::export_raw(&log_path, &mut io::stdout().lock())?;
        micro.sleep(config.export_drain_ms);

        // The diagnostic reader reports a missing file on stdout itself
        let _ = storage::print_with_diagnostics(&log_path, &mut io::stdout().lock());
        Ok(())
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    use spiffs_sensor_logger::{session, storage};
    use std::{fs, io};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = std::env::temp_dir().join("spiffs_sensor_logger");
    if let Err(err) = fs::create_dir_all(&dir) {
        log::error!("could not create {}: {}", dir.display(), err);
        return;
    }
    let path = dir.join("data.csv");

    if let Err(err) = session::log_synthetic_samples(&path, 10) {
        log::error!("logging failed: {:?}", err);
        return;
    }
    let _ = storage::print_with_diagnostics(&path, &mut io::stdout().lock());
    if let Err(err) = storage::export_raw(&path, &mut io::stdout().lock()) {
        log::error!("export failed: {}", err);
    }
}

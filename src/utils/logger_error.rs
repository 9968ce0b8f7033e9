use crate::{
    gpio::AnalogInError,
    microcontroller_src::peripherals::PeripheralError,
    storage::{SpiffsError, StorageError},
};

/// Any error a logging session can end with
#[derive(Debug)]
pub enum LoggerError {
    AnalogInError(AnalogInError),
    PeripheralError(PeripheralError),
    SpiffsError(SpiffsError),
    StorageError(StorageError),
    ExportError(std::io::Error),
}

impl From<AnalogInError> for LoggerError {
    fn from(value: AnalogInError) -> Self {
        LoggerError::AnalogInError(value)
    }
}

impl From<PeripheralError> for LoggerError {
    fn from(value: PeripheralError) -> Self {
        LoggerError::PeripheralError(value)
    }
}

impl From<SpiffsError> for LoggerError {
    fn from(value: SpiffsError) -> Self {
        LoggerError::SpiffsError(value)
    }
}

impl From<StorageError> for LoggerError {
    fn from(value: StorageError) -> Self {
        LoggerError::StorageError(value)
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(value: std::io::Error) -> Self {
        LoggerError::ExportError(value)
    }
}

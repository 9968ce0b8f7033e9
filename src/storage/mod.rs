mod csv_log;
mod file_reader;
mod spiffs;
mod text_file;

pub use {csv_log::*, file_reader::*, spiffs::*, text_file::*};

use crate::gpio::AnalogInError;
use std::io;

/// Enums the different errors possible when working with files on the flash filesystem
#[derive(Debug)]
pub enum StorageError {
    OpenForAppend(io::Error),
    OpenForRead(io::Error),
    OpenForWrite(io::Error),
    ReadError(io::Error),
    WriteError(io::Error),
    SampleError(AnalogInError),
}

impl From<AnalogInError> for StorageError {
    fn from(value: AnalogInError) -> Self {
        StorageError::SampleError(value)
    }
}

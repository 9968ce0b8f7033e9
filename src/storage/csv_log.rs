use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
};

use super::StorageError;
use crate::{sensors::SampleSource, utils::delay::Delay};

/// Appends `row_count` rows produced by `source` to the CSV file at `path`.
///
/// The file is created if missing. If it is empty once opened, the header of
/// the source (if any) is written first, so a file carries at most one header
/// no matter how many times it is appended to. Every row is flushed as soon as
/// it is written. Paced sources wait `period_ms` between consecutive rows.
///
/// # Returns
///
/// A `Result` with the number of rows written, or a `StorageError`. Rows
/// written before a failure stay in the file.
///
/// # Errors
///
/// - `StorageError::OpenForAppend`: If the file could not be opened. Nothing is written.
/// - `StorageError::WriteError`: If a write or flush failed
/// - `StorageError::SampleError`: If the source failed to produce a row
pub fn append_rows<P, S, D>(
    path: P,
    row_count: usize,
    period_ms: u32,
    source: &mut S,
    delay: &mut D,
) -> Result<usize, StorageError>
where
    P: AsRef<Path>,
    S: SampleSource + ?Sized,
    D: Delay + ?Sized,
{
    let path = path.as_ref();
    let file = open_for_append(path)?;
    let mut writer = BufWriter::new(&file);

    if let Some(header) = source.header() {
        let empty = file.metadata().map_err(StorageError::ReadError)?.len() == 0;
        if empty {
            write_row(&mut writer, header)?;
        }
    }

    if !source.is_paced() {
        log::info!("[+] appending {} rows to {}", row_count, path.display());
    }

    for index in 0..row_count {
        if source.is_paced() {
            log::info!("Collecting sample {} of {}...", index + 1, row_count);
        }
        let row = source.next_row(index)?;
        write_row(&mut writer, &row)?;
        if source.is_paced() && index + 1 < row_count {
            delay.delay_ms(period_ms);
        }
    }
    Ok(row_count)
}

fn open_for_append(path: &Path) -> Result<File, StorageError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| {
            log::error!("open for append failed: {}", path.display());
            StorageError::OpenForAppend(err)
        })
}

fn write_row<W: Write>(writer: &mut W, row: &str) -> Result<(), StorageError> {
    writer
        .write_all(row.as_bytes())
        .and_then(|_| writer.write_all(b"\n"))
        .and_then(|_| writer.flush())
        .map_err(StorageError::WriteError)
}

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read, Write},
    path::Path,
};

use super::StorageError;
use crate::utils::silent_mode::SilentMode;

/// Size of the chunks copied during an export
const EXPORT_CHUNK_SIZE: usize = 256;

/// Written instead of the file when an export cannot open it, so the capture
/// still parses as CSV.
pub const EXPORT_ERROR_PAYLOAD: &[u8] = b"error,message\r\n,Could not open file\r\n";

/// What an export sent to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The file was copied verbatim, this many bytes
    Copied(u64),
    /// The file could not be opened and `EXPORT_ERROR_PAYLOAD` was sent instead
    Missing,
}

/// Prints the file at `path` line by line to `out`, preceded by a banner and
/// followed by an empty line. Meant for checking a file by eye, not for export.
///
/// # Errors
///
/// - `StorageError::OpenForRead`: If the file could not be opened. A one line
///   notice is still written to `out`.
/// - `StorageError::ReadError`: If reading the file failed midway
/// - `StorageError::WriteError`: If writing to `out` failed
pub fn print_with_diagnostics<P: AsRef<Path>, W: Write>(
    path: P,
    out: &mut W,
) -> Result<(), StorageError> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            writeln!(out, "[-] open for read failed: {}", path.display())
                .map_err(StorageError::WriteError)?;
            return Err(StorageError::OpenForRead(err));
        }
    };

    writeln!(out, "[*] contents of {}:", path.display()).map_err(StorageError::WriteError)?;

    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(StorageError::ReadError)?;
        if read == 0 {
            break;
        }
        out.write_all(&line).map_err(StorageError::WriteError)?;
    }

    writeln!(out).map_err(StorageError::WriteError)?;
    out.flush().map_err(StorageError::WriteError)
}

/// Streams the exact bytes of the file at `path` to `out`, with diagnostics
/// suppressed for the whole call so nothing else is interleaved with the data.
/// If the file cannot be opened, `EXPORT_ERROR_PAYLOAD` is written instead.
///
/// # Errors
///
/// Only failures of `out` or reads of an already opened file are returned.
pub fn export_raw<P: AsRef<Path>, W: Write>(path: P, out: &mut W) -> io::Result<ExportOutcome> {
    let _silent = SilentMode::enter();

    let outcome = match File::open(path.as_ref()) {
        Ok(mut file) => {
            let mut buf = [0_u8; EXPORT_CHUNK_SIZE];
            let mut copied: u64 = 0;
            loop {
                let n = match file.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => return Err(err),
                };
                out.write_all(&buf[..n])?;
                copied += n as u64;
            }
            ExportOutcome::Copied(copied)
        }
        Err(_) => {
            out.write_all(EXPORT_ERROR_PAYLOAD)?;
            ExportOutcome::Missing
        }
    };
    out.flush()?;
    Ok(outcome)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sensors::SyntheticSource;
    use crate::storage::append_rows;
    use crate::utils::delay::RecordingDelay;
    use log::LevelFilter;
    use serial_test::serial;
    use std::fs;

    /// Output that records the log level active at every write
    struct LevelRecorder {
        bytes: Vec<u8>,
        levels: Vec<LevelFilter>,
    }

    impl Write for LevelRecorder {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.levels.push(log::max_level());
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    #[serial(log_level)]
    fn test0_export_of_missing_file_is_the_error_payload_only() {
        log::set_max_level(LevelFilter::Info);
        let dir = tempfile::tempdir().unwrap();
        let mut out = LevelRecorder {
            bytes: Vec::new(),
            levels: Vec::new(),
        };

        let outcome = export_raw(dir.path().join("nope.csv"), &mut out).unwrap();

        assert_eq!(outcome, ExportOutcome::Missing);
        assert_eq!(out.bytes, b"error,message\r\n,Could not open file\r\n");
        assert!(!out.levels.is_empty());
        assert!(out.levels.iter().all(|level| *level <= LevelFilter::Warn));
        assert_eq!(log::max_level(), LevelFilter::Info);
    }

    #[test]
    #[serial(log_level)]
    fn test1_export_copies_bytes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut contents = String::from("index,temperature_C\n");
        for i in 0..40 {
            contents.push_str(&format!("#{}, 2{}.50°C\n", i, i % 10));
        }
        contents.push_str("no trailing newline");
        fs::write(&path, &contents).unwrap();
        let mut out = Vec::new();

        let outcome = export_raw(&path, &mut out).unwrap();

        assert!(contents.len() > EXPORT_CHUNK_SIZE);
        assert_eq!(outcome, ExportOutcome::Copied(contents.len() as u64));
        assert_eq!(out, contents.as_bytes());
    }

    #[test]
    #[serial(log_level)]
    fn test2_export_of_empty_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        let mut out = Vec::new();

        assert_eq!(export_raw(&path, &mut out).unwrap(), ExportOutcome::Copied(0));
        assert!(out.is_empty());
    }

    #[test]
    #[serial(log_level)]
    fn test3_export_runs_silent_and_restores_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "0,0,100\n").unwrap();
        log::set_max_level(LevelFilter::Info);
        let mut out = LevelRecorder {
            bytes: Vec::new(),
            levels: Vec::new(),
        };

        export_raw(&path, &mut out).unwrap();

        assert_eq!(out.bytes, b"0,0,100\n");
        assert!(out.levels.iter().all(|level| *level <= LevelFilter::Warn));
        assert_eq!(log::max_level(), LevelFilter::Info);
    }

    #[test]
    fn test4_diagnostic_print_round_trips_written_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut delay = RecordingDelay::default();
        append_rows(&path, 5, 0, &mut SyntheticSource, &mut delay).unwrap();
        let written = fs::read(&path).unwrap();
        let mut out = Vec::new();

        print_with_diagnostics(&path, &mut out).unwrap();

        let banner = format!("[*] contents of {}:\n", path.display()).into_bytes();
        let mut expected = banner.clone();
        expected.extend_from_slice(&written);
        expected.push(b'\n');
        assert_eq!(out, expected);
        assert_eq!(&out[banner.len()..out.len() - 1], written.as_slice());
    }

    #[test]
    fn test5_diagnostic_print_of_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let mut out = Vec::new();

        let res = print_with_diagnostics(&path, &mut out);

        assert!(matches!(res, Err(StorageError::OpenForRead(_))));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("[-] open for read failed: {}\n", path.display())
        );
    }

    #[test]
    fn test6_diagnostic_print_keeps_non_ascii_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temps.csv");
        fs::write(&path, "index,temperature_C\n#0, 24.99°C\n").unwrap();
        let mut out = Vec::new();

        print_with_diagnostics(&path, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("index,temperature_C\n#0, 24.99°C\n\n"));
    }
}

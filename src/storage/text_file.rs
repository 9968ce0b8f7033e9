use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
};

use super::StorageError;

/// Creates or truncates the file at `path` and writes `text` into it.
/// Not to be used on CSV logs, which are append only.
///
/// # Errors
///
/// - `StorageError::OpenForWrite`: If the file could not be created or written
pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<(), StorageError> {
    fs::write(path, text).map_err(StorageError::OpenForWrite)
}

/// Appends `text` to the file at `path`, creating it if needed.
///
/// # Errors
///
/// - `StorageError::OpenForAppend`: If the file could not be opened
/// - `StorageError::WriteError`: If the write failed
pub fn append_text<P: AsRef<Path>>(path: P, text: &str) -> Result<(), StorageError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(StorageError::OpenForAppend)?;
    let bytes = text.as_bytes();
    file.write_all(bytes).map_err(StorageError::WriteError)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_write_then_append_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");

        write_text(&path, "Hello File System Lab!\nLine 2.\n").unwrap();
        append_text(&path, "Line 3 after update.\n").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Hello File System Lab!\nLine 2.\nLine 3 after update.\n"
        );
    }

    #[test]
    fn test1_write_truncates_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");

        write_text(&path, "first version, quite long\n").unwrap();
        write_text(&path, "second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn test2_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let res = write_text(dir.path().join("a").join("b.txt"), "x");
        assert!(matches!(res, Err(StorageError::OpenForWrite(_))));
    }
}

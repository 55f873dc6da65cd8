//! Rotating log file writer.
//!
//! [`RotatingFileWriter`] appends to one log file and rotates it once it grows
//! past a size limit, keeping a fixed number of numbered backups
//! (`zbooks.log.1` is the newest). It implements [`std::io::Write`], so wrapped
//! in a `Mutex` it serves directly as a `tracing-subscriber` writer.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Size-rotated append-only log file.
///
/// The file is opened lazily on the first write, so construction never fails.
pub struct RotatingFileWriter {
    file_path: PathBuf,
    file: Option<File>,
    written: u64,
    max_bytes: u64,
    max_backups: usize,
}

impl RotatingFileWriter {
    /// Creates a writer with the default limits (10 MB, 3 backups).
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Creates a writer rotating after `max_bytes` and keeping `max_backups`.
    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            file: None,
            written: 0,
            max_bytes,
            max_backups,
        }
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{index}"));
        self.file_path.with_file_name(name)
    }

    fn open(&mut self) -> io::Result<&mut File> {
        if self.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            self.written = file.metadata().map(|m| m.len()).unwrap_or(0);
            self.file = Some(file);
        }
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("log file unavailable"))
    }

    /// Shifts backups up by one and moves the live file to `.1`.
    fn rotate(&mut self) -> io::Result<()> {
        self.file = None;
        self.written = 0;

        if self.max_backups == 0 {
            return remove_if_exists(&self.file_path);
        }

        remove_if_exists(&self.backup_path(self.max_backups))?;
        for index in (1..self.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        if self.file_path.exists() {
            fs::rename(&self.file_path, self.backup_path(1))?;
        }
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open()?;
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }

        let file = self.open()?;
        file.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.as_mut().map_or(Ok(()), Write::flush)
    }
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("file_path", &self.file_path)
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn appends_until_limit_then_rotates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zbooks.log");
        let mut writer = RotatingFileWriter::with_limits(path.clone(), 10, 2);

        writer.write_all(b"first\n").unwrap();
        writer.write_all(b"second\n").unwrap();
        writer.write_all(b"third\n").unwrap();
        writer.write_all(b"fourth\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(read(&path), "fourth\n");
        assert_eq!(read(&dir.path().join("zbooks.log.1")), "third\n");
        assert_eq!(read(&dir.path().join("zbooks.log.2")), "second\n");
        assert!(!dir.path().join("zbooks.log.3").exists());
    }

    #[test]
    fn counts_existing_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zbooks.log");
        fs::write(&path, "0123456789").unwrap();

        let mut writer = RotatingFileWriter::with_limits(path.clone(), 12, 1);
        writer.write_all(b"next\n").unwrap();

        assert_eq!(read(&path), "next\n");
        assert_eq!(read(&dir.path().join("zbooks.log.1")), "0123456789");
    }
}

//! Append-only line writer with size-based rotation.
//!
//! Backups are numbered: `zatalog-otlp.json.1` is the most recent, up to
//! [`MAX_BACKUP_FILES`]. Older files are shifted up and the oldest dropped.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the live file grows past this size.
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of rotated files kept next to the live one.
const MAX_BACKUP_FILES: usize = 3;

pub struct FileWriter {
    path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limit(path, MAX_FILE_SIZE_BYTES)
    }

    const fn with_limit(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes) {
            *file = None;
            rotate(&self.path)?;
        }

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file not open"))?;

        writeln!(handle, "{line}")?;
        handle.flush()
    }
}

fn backup_path(path: &Path, n: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}

fn rotate(path: &Path) -> io::Result<()> {
    let oldest = backup_path(path, MAX_BACKUP_FILES);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }
    for n in (1..MAX_BACKUP_FILES).rev() {
        let from = backup_path(path, n);
        if from.exists() {
            fs::rename(&from, backup_path(path, n + 1))?;
        }
    }
    fs::rename(path, backup_path(path, 1))
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lines_are_appended() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn full_file_rotates_and_keeps_three_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_limit(path.clone(), 4);

        for i in 0..6 {
            writer.write_line(&format!("line-{i}")).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "line-5\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 1)).unwrap(), "line-4\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 3)).unwrap(), "line-2\n");
        assert!(!backup_path(&path, 4).exists());
    }
}

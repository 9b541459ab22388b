//! Size-based rotating file appender
//!
//! Implements [`MakeWriter`] so it can back any `tracing-subscriber` fmt layer.
//! Each formatted record arrives as one `write` call made while the appender
//! lock is held, so record bytes never interleave between threads.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

/// Shared handle to a rotating log file.
#[derive(Debug, Clone)]
pub struct RotatingFileAppender {
    inner: Arc<Mutex<RotatingFile>>,
}

impl RotatingFileAppender {
    /// Open (or create) `path` for appending.
    ///
    /// Once the file would reach `max_bytes` it is moved to `path.1`,
    /// older backups shift up by one, and anything beyond `backup_count`
    /// is deleted. With `backup_count == 0` the file is truncated instead.
    pub fn open(
        path: impl Into<PathBuf>,
        max_bytes: u64,
        backup_count: usize,
    ) -> io::Result<Self> {
        let file = RotatingFile::open(path.into(), max_bytes, backup_count)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.lock().path.clone()
    }

    fn lock(&self) -> MutexGuard<'_, RotatingFile> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<'a> MakeWriter<'a> for RotatingFileAppender {
    type Writer = RotatingWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriter { file: self.lock() }
    }
}

/// Writer returned by [`RotatingFileAppender::make_writer`]; holds the lock
/// until dropped.
pub struct RotatingWriter<'a> {
    file: MutexGuard<'a, RotatingFile>,
}

impl Write for RotatingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[derive(Debug)]
struct RotatingFile {
    path: PathBuf,
    file: Option<File>,
    written: u64,
    max_bytes: u64,
    backup_count: usize,
}

impl RotatingFile {
    fn open(path: PathBuf, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            file: Some(file),
            written,
            max_bytes,
            backup_count,
        })
    }

    fn should_roll(&self, incoming: usize) -> bool {
        self.written > 0 && self.written + incoming as u64 >= self.max_bytes
    }

    fn write_record(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.should_roll(buf.len()) {
            self.roll()?;
        }

        if self.file.is_none() {
            // a previous roll failed after closing the file
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            self.written = file.metadata()?.len();
            self.file = Some(file);
        }

        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        self.written += buf.len() as u64;
        Ok(())
    }

    fn roll(&mut self) -> io::Result<()> {
        // close before renaming, required on Windows
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }

        if self.backup_count > 0 {
            for index in (1..self.backup_count).rev() {
                let from = backup_path(&self.path, index);
                if from.exists() {
                    let to = backup_path(&self.path, index + 1);
                    remove_if_exists(&to)?;
                    fs::rename(&from, &to)?;
                }
            }

            let first = backup_path(&self.path, 1);
            remove_if_exists(&first)?;
            fs::rename(&self.path, &first)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.file = Some(file);
        self.written = 0;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// `app.log` + 2 -> `app.log.2`
pub fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

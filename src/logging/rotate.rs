//! Size-based rotating log file.
//!
//! The active file is renamed to a timestamped backup once the next write
//! would push it past the size limit. Backups are named
//! `<stem>-<unix-millis>.<ext>`, optionally compressed with zstd
//! (`.zst` suffix), and pruned by count and age after each rotation.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::time::{Clock, SystemClock, from_unix_millis};

/// Bytes per megabyte, as used by the `max-size` setting.
pub const MEGABYTE: u64 = 1024 * 1024;

/// zstd compression level for rotated backups.
const COMPRESSION_LEVEL: i32 = 3;

/// When and how the log file is rotated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Path of the active log file.
    pub filename: PathBuf,
    /// Size in bytes at which the active file is rotated.
    pub max_size: u64,
    /// Number of backups to retain; `0` keeps all of them.
    pub max_backups: usize,
    /// Backups older than this are deleted; `None` keeps them forever.
    pub max_age: Option<Duration>,
    /// Compress backups with zstd.
    pub compress: bool,
}

impl RotationPolicy {
    /// Creates a policy with a 100 MB limit that never prunes or compresses.
    #[must_use]
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            max_size: 100 * MEGABYTE,
            max_backups: 0,
            max_age: None,
            compress: false,
        }
    }

    /// Sets the rotation size in bytes.
    #[must_use]
    pub const fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    /// Sets how many backups are retained.
    #[must_use]
    pub const fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    /// Sets the maximum backup age.
    #[must_use]
    pub const fn with_max_age(mut self, age: Option<Duration>) -> Self {
        self.max_age = age;
        self
    }

    /// Enables or disables backup compression.
    #[must_use]
    pub const fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    fn stem_and_ext(&self) -> (String, Option<String>) {
        let stem = self
            .filename
            .file_stem()
            .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
        let ext = self
            .filename
            .extension()
            .map(|e| e.to_string_lossy().into_owned());
        (stem, ext)
    }

    fn directory(&self) -> PathBuf {
        self.filename
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    fn backup_name(&self, millis: u64) -> String {
        match self.stem_and_ext() {
            (stem, Some(ext)) => format!("{stem}-{millis}.{ext}"),
            (stem, None) => format!("{stem}-{millis}"),
        }
    }

    /// Extracts the timestamp from a backup file name, if it is one of ours.
    fn backup_millis(&self, file_name: &str) -> Option<u64> {
        let (stem, ext) = self.stem_and_ext();
        let name = file_name.strip_suffix(".zst").unwrap_or(file_name);
        let name = match ext {
            Some(ext) => name.strip_suffix(&format!(".{ext}"))?,
            None => name,
        };
        name.strip_prefix(&format!("{stem}-"))?.parse().ok()
    }
}

/// A log file that rotates itself according to a [`RotationPolicy`].
///
/// Wrap in a `Mutex` to use as a `tracing-subscriber` writer.
#[derive(Debug)]
pub struct RotatingFile<C = SystemClock> {
    policy: RotationPolicy,
    clock: C,
    file: File,
    size: u64,
}

impl RotatingFile<SystemClock> {
    /// Opens (or creates) the active log file for appending.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be created.
    pub fn open(policy: RotationPolicy) -> io::Result<Self> {
        Self::with_clock(policy, SystemClock)
    }
}

impl<C: Clock> RotatingFile<C> {
    /// Opens the active log file using a custom clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be created.
    pub fn with_clock(policy: RotationPolicy, clock: C) -> io::Result<Self> {
        fs::create_dir_all(policy.directory())?;
        let file = open_append(&policy.filename)?;
        let size = file.metadata()?.len();
        Ok(Self {
            policy,
            clock,
            file,
            size,
        })
    }

    /// Returns the rotation policy.
    #[must_use]
    pub const fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Returns the current size of the active file in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Moves the active file to a backup and starts a fresh one.
    ///
    /// # Errors
    ///
    /// Returns an error if the active file cannot be renamed or reopened.
    /// Compression and pruning failures are reported on stderr only, since
    /// this writer may itself be the log sink.
    pub fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let backup = self.free_backup_path();
        fs::rename(&self.policy.filename, &backup)?;
        self.file = open_append(&self.policy.filename)?;
        self.size = 0;

        if self.policy.compress {
            if let Err(e) = compress_file(&backup) {
                eprintln!("failed to compress log backup {}: {e}", backup.display());
            }
        }

        if let Err(e) = self.prune() {
            eprintln!("failed to prune log backups: {e}");
        }

        Ok(())
    }

    /// Picks a backup path that does not exist yet.
    fn free_backup_path(&self) -> PathBuf {
        let dir = self.policy.directory();
        let mut millis = self.clock.unix_millis();
        loop {
            let candidate = dir.join(self.policy.backup_name(millis));
            if !candidate.exists() && !with_zst_suffix(&candidate).exists() {
                return candidate;
            }
            millis += 1;
        }
    }

    /// Deletes backups beyond `max_backups` (oldest first) or older than `max_age`.
    fn prune(&self) -> io::Result<()> {
        if self.policy.max_backups == 0 && self.policy.max_age.is_none() {
            return Ok(());
        }

        let mut backups = self.list_backups()?;
        // Newest first
        backups.sort_by(|a, b| b.0.cmp(&a.0));

        let now = self.clock.now();
        for (index, (millis, path)) in backups.iter().enumerate() {
            let over_count = self.policy.max_backups != 0 && index >= self.policy.max_backups;
            let too_old = self.policy.max_age.is_some_and(|max_age| {
                now.duration_since(from_unix_millis(*millis))
                    .is_ok_and(|age| age > max_age)
            });

            if over_count || too_old {
                fs::remove_file(path)?;
            }
        }

        Ok(())
    }

    fn list_backups(&self) -> io::Result<Vec<(u64, PathBuf)>> {
        let mut backups = Vec::new();
        for entry in fs::read_dir(self.policy.directory())? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(millis) = file_name
                .to_str()
                .and_then(|name| self.policy.backup_millis(name))
            else {
                continue;
            };
            backups.push((millis, entry.path()));
        }
        Ok(backups)
    }
}

impl<C: Clock> Write for RotatingFile<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        if len > self.policy.max_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "write of {len} bytes exceeds max log file size of {} bytes",
                    self.policy.max_size
                ),
            ));
        }

        if self.size + len > self.policy.max_size {
            self.rotate()?;
        }

        let written = self.file.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn with_zst_suffix(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".zst");
    PathBuf::from(name)
}

/// Compresses `path` to `<path>.zst` and removes the original.
fn compress_file(path: &Path) -> io::Result<()> {
    let input = fs::read(path)?;
    let compressed = zstd::encode_all(input.as_slice(), COMPRESSION_LEVEL)?;
    fs::write(with_zst_suffix(path), compressed)?;
    fs::remove_file(path)
}

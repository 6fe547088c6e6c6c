//! Line sources for ts2phc output.
//!
//! Two sources are supported: a log file (read from the start and
//! optionally followed as it grows) and the systemd journal of a unit,
//! read through a `journalctl -f` child process. Both hand out complete
//! lines with the line terminator removed; bytes that are not valid UTF-8
//! are replaced rather than rejected.

use crate::config::{ExporterConfig, LogSourceConfig};
use crate::constants::JOURNALCTL_COMMAND;
use crate::error::{ExporterError, Result};
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, info, warn};

/// A stream of log lines
#[derive(Debug)]
pub enum LogSource {
    File(FileTail),
    Journal(JournalFollower),
}

impl LogSource {
    /// Open the source selected by `config`
    pub async fn open(config: &ExporterConfig) -> Result<Self> {
        match &config.source {
            LogSourceConfig::File { path, follow } => {
                let tail = FileTail::open(path, *follow, config.poll_interval()).await?;
                Ok(LogSource::File(tail))
            }
            LogSourceConfig::Journal { unit } => Ok(LogSource::Journal(JournalFollower::spawn(unit)?)),
        }
    }

    /// Next complete line, or `None` once the source has ended.
    ///
    /// Cancel safe: a partially read line is kept and completed by the next call.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        match self {
            LogSource::File(tail) => tail.next_line().await,
            LogSource::Journal(journal) => journal.next_line().await,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            LogSource::File(tail) => format!("logfile {}", tail.path.display()),
            LogSource::Journal(journal) => format!("journal unit {}", journal.unit),
        }
    }
}

/// Reads a log file line by line, optionally waiting for appended data
#[derive(Debug)]
pub struct FileTail {
    path: PathBuf,
    reader: BufReader<File>,
    follow: bool,
    poll_interval: Duration,
    /// Bytes consumed from the start of the file
    position: u64,
    /// Bytes of a line whose terminator has not been read yet
    pending: Vec<u8>,
}

impl FileTail {
    pub async fn open(path: impl AsRef<Path>, follow: bool, poll_interval: Duration) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).await.map_err(|e| {
            ExporterError::log_source(format!("logfile {}", path.display()), e.to_string())
        })?;

        info!(path = %path.display(), follow, "Reading ts2phc log file");

        Ok(Self {
            path,
            reader: BufReader::new(file),
            follow,
            poll_interval,
            position: 0,
            pending: Vec::new(),
        })
    }

    pub async fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            let read = self.reader.read_until(b'\n', &mut self.pending).await?;
            self.position += read as u64;

            if self.pending.last() == Some(&b'\n') {
                return Ok(Some(take_line(&mut self.pending)));
            }

            // EOF, possibly with an unterminated line held in `pending`
            if !self.follow {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(take_line(&mut self.pending)));
            }

            if read == 0 {
                self.rewind_if_truncated().await?;
                tokio::time::sleep(self.poll_interval).await;
            }
        }
    }

    async fn rewind_if_truncated(&mut self) -> Result<()> {
        let len = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Log file missing, waiting for it to reappear");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        if len < self.position {
            warn!(
                path = %self.path.display(),
                len,
                position = self.position,
                "Log file truncated, reading from the beginning"
            );
            self.reader.seek(SeekFrom::Start(0)).await?;
            self.position = 0;
            self.pending.clear();
        }
        Ok(())
    }
}

/// Follows the journal of a systemd unit through `journalctl -f`.
///
/// The child process is killed when the follower is dropped.
#[derive(Debug)]
pub struct JournalFollower {
    unit: String,
    child: Child,
    reader: BufReader<ChildStdout>,
    pending: Vec<u8>,
}

impl JournalFollower {
    pub fn spawn(unit: &str) -> Result<Self> {
        let describe = || format!("journal unit {}", unit);

        let mut child = Command::new(JOURNALCTL_COMMAND)
            .args(["-u", unit, "-f"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ExporterError::log_source(describe(), format!("unable to run {}: {}", JOURNALCTL_COMMAND, e))
            })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            ExporterError::log_source(describe(), format!("{} stdout was not captured", JOURNALCTL_COMMAND))
        })?;

        info!(unit, pid = child.id(), "Following journal");

        Ok(Self {
            unit: unit.to_string(),
            child,
            reader: BufReader::new(stdout),
            pending: Vec::new(),
        })
    }

    pub async fn next_line(&mut self) -> Result<Option<String>> {
        let read = self.reader.read_until(b'\n', &mut self.pending).await?;
        if read == 0 && self.pending.is_empty() {
            match self.child.try_wait() {
                Ok(Some(status)) => warn!(unit = %self.unit, %status, "journalctl exited"),
                Ok(None) => warn!(unit = %self.unit, "journalctl closed its output"),
                Err(e) => warn!(unit = %self.unit, error = %e, "Unable to query journalctl status"),
            }
            return Ok(None);
        }
        Ok(Some(take_line(&mut self.pending)))
    }
}

/// Drain `buf` into a string without its `\n` / `\r\n` terminator
fn take_line(buf: &mut Vec<u8>) -> String {
    let mut end = buf.len();
    if end > 0 && buf[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && buf[end - 1] == b'\r' {
        end -= 1;
    }
    let line = String::from_utf8_lossy(&buf[..end]).into_owned();
    buf.clear();
    line
}

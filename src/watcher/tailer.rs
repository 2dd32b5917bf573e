//! Poll-based line tailer for growing log files.
//!
//! Attaches at end-of-file and yields only lines appended afterwards.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::stream::{self, Stream};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};

use super::error::TailError;

/// Default sleep between reads when the file has not grown.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Incremental line reader over a single append-only file.
///
/// The source owns its file handle and cursor exclusively. A line is only
/// yielded once its terminating `\n` has been written; partial writes stay
/// pending until they are completed.
#[derive(Debug)]
pub struct LineSource {
    /// Path to the tailed file.
    path: PathBuf,
    reader: BufReader<File>,
    /// Byte offset just past the last yielded line.
    offset: u64,
    /// Bytes of an incomplete trailing line.
    pending: Vec<u8>,
    poll_interval: Duration,
}

impl LineSource {
    /// Open `path` and position the cursor at its current end.
    ///
    /// # Errors
    ///
    /// Returns [`TailError::NotFound`] if the file does not exist,
    /// [`TailError::PermissionDenied`] if it cannot be opened for reading,
    /// and [`TailError::Open`] for any other failure, including a failed seek.
    pub async fn open(path: impl Into<PathBuf>, poll_interval: Duration) -> Result<Self, TailError> {
        let path = path.into();
        let mut file = File::open(&path)
            .await
            .map_err(|e| TailError::from_open(path.clone(), e))?;

        let offset = file
            .seek(SeekFrom::End(0))
            .await
            .map_err(|e| TailError::Open {
                path: path.clone(),
                source: e,
            })?;

        tracing::debug!(path = %path.display(), offset, "Attached to end of file");

        Ok(Self {
            path,
            reader: BufReader::new(file),
            offset,
            pending: Vec::new(),
            poll_interval,
        })
    }

    /// Path being tailed.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset just past the last line returned.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Wait for the next complete line.
    ///
    /// Sleeps for the poll interval whenever no complete line is available.
    /// Trailing `\r` and `\n` are stripped.
    ///
    /// # Errors
    ///
    /// Returns [`TailError::Read`] on any I/O failure. The source should not
    /// be used after an error.
    pub async fn next_line(&mut self) -> Result<String, TailError> {
        loop {
            if let Some(line) = self.try_next_line().await? {
                return Ok(line);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Read the next complete line without waiting.
    ///
    /// Returns `Ok(None)` at end-of-file, including when only part of a line
    /// has been written so far.
    ///
    /// # Errors
    ///
    /// Returns [`TailError::Read`] on any I/O failure.
    pub async fn try_next_line(&mut self) -> Result<Option<String>, TailError> {
        let read = self
            .reader
            .read_until(b'\n', &mut self.pending)
            .await
            .map_err(|e| TailError::Read {
                path: self.path.clone(),
                source: e,
            })?;

        if read == 0 || self.pending.last() != Some(&b'\n') {
            if !self.pending.is_empty() {
                tracing::trace!(
                    path = %self.path.display(),
                    pending = self.pending.len(),
                    "Waiting for rest of partial line"
                );
            }
            return Ok(None);
        }

        let raw = std::mem::take(&mut self.pending);
        self.offset += raw.len() as u64;
        Ok(Some(decode_line(&raw)))
    }

    /// Convert into a stream of lines that ends after the first error.
    pub fn into_lines(self) -> impl Stream<Item = Result<String, TailError>> {
        stream::unfold(Some(self), |state| async move {
            let mut source = state?;
            match source.next_line().await {
                Ok(line) => Some((Ok(line), Some(source))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

//! crates/batchlog/src/benchmark.rs
//! Tab-separated benchmark records for performance studies.
//!
//! The recorder opens its file once, on the first record, and keeps it for
//! the lifetime of the owning context. If the file cannot be opened the
//! recorder goes quiet for good: later records are dropped without retrying
//! and without surfacing an error to the caller. The reason is reported once
//! through `tracing`.

use std::fmt;
use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;

use crate::number::Significant;

/// Significant digits used for the float columns of a record.
pub const BENCHMARK_PRECISION: usize = 6;

/// Reasons the benchmark file could not be opened.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    /// No file name was configured before the first record.
    #[error("no benchmark file name configured")]
    NoPath,
    /// The file could not be created.
    #[error("failed to open benchmark file {}: {source}", path.display())]
    Open {
        /// Path that was tried.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// One full benchmark row.
///
/// Renders as `elapsed\ttag\tcodelength\ttop\tnon_trivial\tlevels`, without
/// the trailing newline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenchmarkRecord<'a> {
    /// Seconds since the context was created.
    pub elapsed_secs: f64,
    /// Caller-chosen label for the measurement point.
    pub tag: &'a str,
    /// Codelength reached at this point.
    pub codelength: f64,
    /// Number of top-level modules.
    pub num_top_modules: u32,
    /// Number of top-level modules with more than one member.
    pub num_non_trivial_top_modules: u32,
    /// Depth of the module hierarchy.
    pub num_levels: u32,
}

impl fmt::Display for BenchmarkRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            Significant::new(self.elapsed_secs, BENCHMARK_PRECISION),
            self.tag,
            Significant::new(self.codelength, BENCHMARK_PRECISION),
            self.num_top_modules,
            self.num_non_trivial_top_modules,
            self.num_levels,
        )
    }
}

enum FileState {
    Unopened,
    Open(LineWriter<File>),
    Failed,
}

/// Lazily opened, append-only sink for [`BenchmarkRecord`]s.
pub struct BenchmarkRecorder {
    path: Option<PathBuf>,
    state: FileState,
    started: Instant,
}

impl BenchmarkRecorder {
    /// Creates a recorder that measures elapsed time from `started`.
    #[must_use]
    pub const fn new(started: Instant) -> Self {
        Self {
            path: None,
            state: FileState::Unopened,
            started,
        }
    }

    /// Configures the target file.
    ///
    /// Only effective before the first record; the path is fixed once the
    /// recorder has tried to open it.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if matches!(self.state, FileState::Unopened) {
            self.path = Some(path);
        } else {
            tracing::debug!(
                path = %path.display(),
                "benchmark file already chosen, ignoring new name"
            );
        }
    }

    /// Returns the configured path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Reports whether the file is open and accepting records.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, FileState::Open(_))
    }

    /// Appends one record, or only `tag` when `write_only_tag` is set.
    ///
    /// Silently does nothing when the file could not be opened.
    pub fn record(
        &mut self,
        tag: &str,
        codelength: f64,
        num_top_modules: u32,
        num_non_trivial_top_modules: u32,
        num_levels: u32,
        write_only_tag: bool,
    ) {
        let elapsed_secs = self.started.elapsed().as_secs_f64();
        let Some(file) = self.file() else {
            return;
        };

        let written = if write_only_tag {
            writeln!(file, "{tag}")
        } else {
            let record = BenchmarkRecord {
                elapsed_secs,
                tag,
                codelength,
                num_top_modules,
                num_non_trivial_top_modules,
                num_levels,
            };
            writeln!(file, "{record}")
        };

        if let Err(error) = written {
            tracing::warn!(%error, tag, "failed to write benchmark record");
        }
    }

    /// Flushes buffered records to disk.
    pub fn flush(&mut self) {
        if let FileState::Open(file) = &mut self.state
            && let Err(error) = file.flush()
        {
            tracing::warn!(%error, "failed to flush benchmark file");
        }
    }

    fn file(&mut self) -> Option<&mut LineWriter<File>> {
        if matches!(self.state, FileState::Unopened) {
            self.state = match open(self.path.as_deref()) {
                Ok(file) => FileState::Open(file),
                Err(error) => {
                    tracing::warn!(%error, "benchmark records disabled");
                    FileState::Failed
                }
            };
        }

        match &mut self.state {
            FileState::Open(file) => Some(file),
            FileState::Unopened | FileState::Failed => None,
        }
    }
}

impl fmt::Debug for BenchmarkRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkRecorder")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

fn open(path: Option<&Path>) -> Result<LineWriter<File>, BenchmarkError> {
    let path = path
        .filter(|path| !path.as_os_str().is_empty())
        .ok_or(BenchmarkError::NoPath)?;
    let file = File::create(path).map_err(|source| BenchmarkError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "opened benchmark file");
    Ok(LineWriter::new(file))
}

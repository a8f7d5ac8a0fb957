#![deny(unsafe_code)]
#![deny(missing_docs)]

//! crates/test-support/src/lib.rs
//!
//! Shared helpers for the batchlog test suites: an in-memory writer that can
//! be handed to a logging context while the test keeps a handle to read it
//! back, and scratch directories for benchmark files.

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use tempfile::TempDir;

/// Cloneable in-memory writer; every clone appends to the same buffer.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far as UTF-8 text.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    /// Returns the written text and clears the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.bytes.borrow_mut());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Reports whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.borrow().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Temporary directory that is removed when dropped.
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Creates a fresh directory under the system temp location.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Returns the path of `name` inside the directory.
    #[must_use]
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_buffer() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();
        writer.write_all(b"hello").expect("write succeeds");
        assert_eq!(buffer.contents(), "hello");
        assert_eq!(buffer.take(), "hello");
        assert!(buffer.is_empty());
    }

    #[test]
    fn scratch_dir_joins_names() {
        let dir = ScratchDir::new().expect("tempdir");
        assert!(dir.join("bench.tsv").ends_with("bench.tsv"));
    }
}

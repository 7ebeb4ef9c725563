//! In-memory opener for testing.

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read};
use std::sync::{Arc, Mutex};

use super::{Opener, Resource};
use crate::context::Context;

/// Opener that resolves identifiers against an in-memory table.
///
/// Unknown identifiers fail with [`io::ErrorKind::NotFound`]. Every open
/// attempt and every close of a handed-out resource is recorded, so tests can
/// assert on how a reader drove the opener.
#[derive(Debug, Clone, Default)]
pub struct MemoryOpener {
    files: BTreeMap<String, Arc<[u8]>>,
    journal: Arc<Mutex<Journal>>,
}

#[derive(Debug, Default)]
struct Journal {
    opened: Vec<String>,
    closed: Vec<String>,
}

impl MemoryOpener {
    /// Create an empty opener; every open fails until files are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`MemoryOpener::insert`].
    pub fn with_file(mut self, path: impl Into<String>, data: impl AsRef<[u8]>) -> Self {
        self.insert(path, data);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, data: impl AsRef<[u8]>) {
        self.files.insert(path.into(), Arc::from(data.as_ref()));
    }

    /// Paths passed to `open`, in call order, including failed attempts.
    pub fn opened(&self) -> Vec<String> {
        self.journal.lock().unwrap().opened.clone()
    }

    /// Paths whose resources were closed, in close order.
    pub fn closed(&self) -> Vec<String> {
        self.journal.lock().unwrap().closed.clone()
    }

    /// Number of resources handed out and not yet closed.
    pub fn open_count(&self) -> usize {
        let journal = self.journal.lock().unwrap();
        let succeeded = journal
            .opened
            .iter()
            .filter(|p| self.files.contains_key(p.as_str()))
            .count();
        succeeded.saturating_sub(journal.closed.len())
    }
}

impl Opener for MemoryOpener {
    fn open(&self, _ctx: &Context, path: &str) -> io::Result<Box<dyn Resource>> {
        self.journal.lock().unwrap().opened.push(path.to_string());
        let data = self.files.get(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{path}: file does not exist"))
        })?;
        Ok(Box::new(MemoryFile {
            path: path.to_string(),
            cursor: Cursor::new(Arc::clone(data)),
            journal: Arc::clone(&self.journal),
        }))
    }
}

/// Resource handed out by [`MemoryOpener`].
struct MemoryFile {
    path: String,
    cursor: Cursor<Arc<[u8]>>,
    journal: Arc<Mutex<Journal>>,
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Resource for MemoryFile {
    fn close(&mut self) -> io::Result<()> {
        self.journal.lock().unwrap().closed.push(self.path.clone());
        Ok(())
    }
}

//! Readable, closable resources.

use std::fs::File;
use std::io::{self, Read};

/// An open, sequential, readable and closable handle.
///
/// Dropping a resource releases it as well; `close` exists so that callers
/// who care about release errors can observe them.
pub trait Resource: Read + Send {
    /// Release the underlying handle.
    ///
    /// Callers must not read from the resource after closing it.
    fn close(&mut self) -> io::Result<()>;
}

impl Resource for File {
    fn close(&mut self) -> io::Result<()> {
        // std reports no error from closing a file opened for reading; the
        // descriptor goes away when the owning box is dropped.
        Ok(())
    }
}

impl<R: Resource + ?Sized> Resource for Box<R> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Adapts any reader into a [`Resource`] whose `close` does nothing.
#[derive(Debug, Clone, Default)]
pub struct NopClose<R> {
    inner: R,
}

impl<R> NopClose<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for NopClose<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read + Send> Resource for NopClose<R> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

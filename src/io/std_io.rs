//! Standard implementations for files and stdin.

use std::fs::File;
use std::io::{self, Read};

use tracing::debug;

use super::{Opener, Resource};
use crate::context::Context;

/// Opener backed by the platform filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOpener;

impl FsOpener {
    pub fn new() -> Self {
        Self
    }
}

impl Opener for FsOpener {
    fn open(&self, ctx: &Context, path: &str) -> io::Result<Box<dyn Resource>> {
        // The open syscall itself cannot be interrupted, so the context is
        // only consulted before it starts.
        ctx.check()?;
        let file = File::open(path)?;
        debug!(path, "opened file");
        Ok(Box::new(file))
    }
}

/// Opener that resolves `"-"` to stdin and everything else through `inner`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioOpener<O> {
    inner: O,
}

impl<O: Opener> StdioOpener<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: Opener> Opener for StdioOpener<O> {
    fn open(&self, ctx: &Context, path: &str) -> io::Result<Box<dyn Resource>> {
        if path == "-" {
            ctx.check()?;
            debug!("opened stdin");
            return Ok(Box::new(StdinInput::new()));
        }
        self.inner.open(ctx, path)
    }
}

/// Resource reading from the process's standard input.
///
/// Closing it is a no-op: stdin belongs to the process, not to the reader.
#[derive(Debug)]
pub struct StdinInput {
    stdin: io::Stdin,
}

impl StdinInput {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }

    /// Identifier used for stdin in handler callbacks and error messages.
    pub fn id(&self) -> &'static str {
        "-"
    }
}

impl Default for StdinInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for StdinInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stdin.read(buf)
    }
}

impl Resource for StdinInput {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

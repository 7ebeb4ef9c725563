//! Lazy concatenation of a sequence of named files.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Read};

use tracing::{debug, warn};

use crate::context::Context;
use crate::io::{Opener, Resource, StdinInput};

/// Outcome of a single [`ConcatReader::read_step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Bytes were copied into the caller's buffer.
    Data(usize),
    /// The current file reached its end and was closed. No bytes were read,
    /// but more input may follow.
    Boundary,
    /// Every path has been consumed (or the reader was closed).
    End,
}

struct Current {
    path: String,
    resource: Box<dyn Resource>,
}

/// A reader over the concatenation of a sequence of paths.
///
/// Files are opened on demand as data is read and closed as soon as they are
/// exhausted, so at most one file is open at any time. Paths are read in the
/// order they were supplied. The reader takes ownership of the path list.
///
/// Dropping the reader closes the open file, if any; call
/// [`ConcatReader::close`] to observe the close error instead.
pub struct ConcatReader<O> {
    ctx: Context,
    opener: O,
    paths: VecDeque<String>,
    current: Option<Current>,
}

impl<O: Opener> ConcatReader<O> {
    /// Construct a reader over `paths`. With no paths, the reader is empty and
    /// reports end-of-data on every read without calling the opener.
    pub fn new<I, S>(ctx: Context, opener: O, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ctx,
            opener,
            paths: paths.into_iter().map(Into::into).collect(),
            current: None,
        }
    }

    /// Path of the file currently open, if any.
    pub fn current_path(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.path.as_str())
    }

    /// Number of paths that have not been opened yet.
    pub fn pending(&self) -> usize {
        self.paths.len()
    }

    /// True when no file is open and no paths remain.
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none() && self.paths.is_empty()
    }

    /// Advance the reader by at most one underlying read.
    ///
    /// Opens the next path if no file is open. A failed open is reported as-is
    /// and the failed path is not retried. When the open file is exhausted it
    /// is closed and [`Step::Boundary`] is returned; the next call moves on to
    /// the following path. Read errors are propagated and leave the current
    /// file open.
    pub fn read_step(&mut self, buf: &mut [u8]) -> io::Result<Step> {
        if buf.is_empty() {
            return Ok(if self.is_exhausted() {
                Step::End
            } else {
                Step::Data(0)
            });
        }

        if self.current.is_none() {
            let Some(path) = self.paths.pop_front() else {
                return Ok(Step::End);
            };
            debug!(path = %path, pending = self.paths.len(), "opening next input");
            let resource = self.opener.open(&self.ctx, &path)?;
            self.current = Some(Current { path, resource });
        }

        let n = match self.current.as_mut() {
            Some(current) => current.resource.read(buf)?,
            None => return Ok(Step::End),
        };

        match n {
            0 => {
                if let Some(mut done) = self.current.take() {
                    debug!(path = %done.path, "input exhausted");
                    if let Err(e) = done.resource.close() {
                        warn!(path = %done.path, error = %e, "failed to close exhausted input");
                    }
                }
                Ok(Step::Boundary)
            }
            n => Ok(Step::Data(n)),
        }
    }

    /// Close the open file, if any, and discard all pending paths.
    ///
    /// Returns the close error of the open file. The reader is left empty
    /// either way; closing again is a no-op.
    pub fn close(&mut self) -> io::Result<()> {
        self.paths.clear();
        match self.current.take() {
            Some(mut current) => {
                debug!(path = %current.path, "closing input");
                current.resource.close()
            }
            None => Ok(()),
        }
    }
}

impl<O: Opener> Read for ConcatReader<O> {
    /// Reads from the concatenation, stepping over file boundaries so that
    /// `Ok(0)` is only returned once every path has been consumed.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.read_step(buf)? {
                Step::Data(n) => return Ok(n),
                Step::Boundary => continue,
                Step::End => return Ok(0),
            }
        }
    }
}

impl<O: Opener> Resource for ConcatReader<O> {
    fn close(&mut self) -> io::Result<()> {
        ConcatReader::close(self)
    }
}

impl<O> Drop for ConcatReader<O> {
    fn drop(&mut self) {
        if let Some(mut current) = self.current.take() {
            if let Err(e) = current.resource.close() {
                warn!(path = %current.path, error = %e, "failed to close input on drop");
            }
        }
    }
}

impl<O> fmt::Debug for ConcatReader<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcatReader")
            .field("current", &self.current.as_ref().map(|c| &c.path))
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

/// Either a concatenation of paths or a fallback resource.
#[derive(Debug)]
pub enum Input<O, R> {
    /// At least one path was given.
    Concat(ConcatReader<O>),
    /// The path list was empty.
    Fallback(R),
}

impl<O: Opener, R: Read> Read for Input<O, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::Concat(r) => r.read(buf),
            Input::Fallback(r) => r.read(buf),
        }
    }
}

impl<O: Opener, R: Resource> Resource for Input<O, R> {
    fn close(&mut self) -> io::Result<()> {
        match self {
            Input::Concat(r) => r.close(),
            Input::Fallback(r) => r.close(),
        }
    }
}

/// Concatenate `paths`, or hand back `fallback` unchanged if there are none.
pub fn concat_or<O, R, I, S>(ctx: Context, opener: O, paths: I, fallback: R) -> Input<O, R>
where
    O: Opener,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
    if paths.is_empty() {
        debug!("no input paths, using fallback");
        return Input::Fallback(fallback);
    }
    Input::Concat(ConcatReader::new(ctx, opener, paths))
}

/// Concatenate `paths`, or read stdin if there are none.
pub fn concat_or_stdin<O, I, S>(ctx: Context, opener: O, paths: I) -> Input<O, StdinInput>
where
    O: Opener,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    concat_or(ctx, opener, paths, StdinInput::new())
}

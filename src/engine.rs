//! Engine that runs concatenated or per-file processing over a set of inputs.

use std::io::{self, Read};

use tracing::{debug, warn};

use crate::concat::{ConcatReader, Input};
use crate::context::Context;
use crate::error::{AggregateError, ErrorPolicy, SingleIoError, Stage};
use crate::io::{Opener, Resource, StdinInput};

/// A resolved set of inputs plus the policy for processing them.
pub struct InputEngine<O> {
    ctx: Context,
    opener: O,
    paths: Vec<String>,
    error_policy: ErrorPolicy,
    stdin_fallback: bool,
}

impl<O: Opener> InputEngine<O> {
    /// Create a new input engine.
    pub fn new(
        ctx: Context,
        opener: O,
        paths: Vec<String>,
        error_policy: ErrorPolicy,
        stdin_fallback: bool,
    ) -> Self {
        Self {
            ctx,
            opener,
            paths,
            error_policy,
            stdin_fallback,
        }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// True when processing would read stdin instead of any path.
    pub fn reads_stdin(&self) -> bool {
        self.stdin_fallback && self.paths.is_empty()
    }

    /// A single reader over all inputs, in order.
    ///
    /// Errors are plain `io::Error`s as produced by the reader; the error
    /// policy does not apply to a concatenated stream.
    pub fn concat(&self) -> Input<&O, StdinInput> {
        if self.reads_stdin() {
            return Input::Fallback(StdinInput::new());
        }
        Input::Concat(ConcatReader::new(
            self.ctx.clone(),
            &self.opener,
            self.paths.iter().cloned(),
        ))
    }

    /// Run `handler` on each input in order.
    ///
    /// Open failures are reported at [`Stage::Open`], handler failures at
    /// [`Stage::Read`] and failures to close a handled input at
    /// [`Stage::Close`]. With `FastFail` processing stops at the first error;
    /// with `Accumulate` every input is visited and all errors are returned.
    pub fn for_each<F>(&self, mut handler: F) -> Result<(), AggregateError>
    where
        F: FnMut(&str, &mut dyn Read) -> io::Result<()>,
    {
        if self.reads_stdin() {
            debug!("no input paths, reading stdin");
            let mut stdin = StdinInput::new();
            return handler(stdin.id(), &mut stdin)
                .map_err(|e| SingleIoError::new(Stage::Read, "-", e).into());
        }

        let mut errors = Vec::new();
        for path in &self.paths {
            let Err(e) = self.visit(path, &mut handler) else {
                continue;
            };
            if self.error_policy == ErrorPolicy::FastFail {
                errors.push(e);
                break;
            }
            warn!(path = %path, error = %e.error, stage = %e.stage, "input failed, continuing");
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AggregateError { errors })
        }
    }

    /// Open one input, hand it to `handler` and close it.
    ///
    /// A handler error wins over a close error on the same input.
    fn visit<F>(&self, path: &str, handler: &mut F) -> Result<(), SingleIoError>
    where
        F: FnMut(&str, &mut dyn Read) -> io::Result<()>,
    {
        let mut resource = self
            .opener
            .open(&self.ctx, path)
            .map_err(|e| SingleIoError::new(Stage::Open, path, e))?;
        debug!(path, "handling input");

        let handled =
            handler(path, &mut resource).map_err(|e| SingleIoError::new(Stage::Read, path, e));
        let closed = resource
            .close()
            .map_err(|e| SingleIoError::new(Stage::Close, path, e));
        handled.and(closed)
    }

    /// Read every input fully, returning `(path, contents)` pairs in order.
    pub fn read_all(&self) -> Result<Vec<(String, Vec<u8>)>, AggregateError> {
        let mut out = Vec::with_capacity(self.paths.len());
        self.for_each(|path, reader| {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf)?;
            out.push((path.to_string(), buf));
            Ok(())
        })?;
        Ok(out)
    }
}

//! Per-file iteration with a caller-supplied handler.

use std::io::{self, Read};

use tracing::{debug, warn};

use crate::context::Context;
use crate::io::{Opener, StdinInput};

/// Open each path in order and pass its reader to `handler`.
///
/// The handler receives the path together with either the open reader or the
/// open error, and decides what a failed open means. A successfully opened
/// file is closed as soon as the handler returns, whatever the handler
/// reported. If the handler returns an error, iteration stops and that error
/// is returned; no further paths are opened.
pub fn each<O, I, S, F, E>(ctx: &Context, opener: &O, paths: I, mut handler: F) -> Result<(), E>
where
    O: Opener + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&str, io::Result<&mut dyn Read>) -> Result<(), E>,
{
    for path in paths {
        let path = path.as_ref();
        let outcome = match opener.open(ctx, path) {
            Ok(mut resource) => {
                debug!(path, "handling input");
                let reader: &mut dyn Read = &mut resource;
                let outcome = handler(path, Ok(reader));
                if let Err(e) = resource.close() {
                    warn!(path, error = %e, "failed to close input");
                }
                outcome
            }
            Err(e) => handler(path, Err(e)),
        };
        outcome?;
    }
    Ok(())
}

/// Like [`each`], but with no paths the handler is called once on `fallback`
/// under the identifier `"-"`. The fallback is neither opened nor closed.
pub fn each_or<O, I, S, R, F, E>(
    ctx: &Context,
    opener: &O,
    paths: I,
    mut fallback: R,
    mut handler: F,
) -> Result<(), E>
where
    O: Opener + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: Read,
    F: FnMut(&str, io::Result<&mut dyn Read>) -> Result<(), E>,
{
    let mut paths = paths.into_iter().peekable();
    if paths.peek().is_none() {
        debug!("no input paths, using fallback");
        let reader: &mut dyn Read = &mut fallback;
        return handler("-", Ok(reader));
    }
    each(ctx, opener, paths, handler)
}

/// Like [`each`], but with no paths the handler reads stdin.
pub fn each_or_stdin<O, I, S, F, E>(ctx: &Context, opener: &O, paths: I, handler: F) -> Result<(), E>
where
    O: Opener + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&str, io::Result<&mut dyn Read>) -> Result<(), E>,
{
    each_or(ctx, opener, paths, StdinInput::new(), handler)
}

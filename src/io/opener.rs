//! Opener trait definition.

use std::fmt;
use std::io;
use std::sync::Arc;

use super::Resource;
use crate::context::Context;

/// Capability that turns a path identifier into an open [`Resource`].
///
/// Readers in this crate treat the opener as opaque: they never retry a
/// failed open and never inspect the error it returns.
pub trait Opener: Send + Sync {
    fn open(&self, ctx: &Context, path: &str) -> io::Result<Box<dyn Resource>>;
}

impl<O: Opener + ?Sized> Opener for &O {
    fn open(&self, ctx: &Context, path: &str) -> io::Result<Box<dyn Resource>> {
        (**self).open(ctx, path)
    }
}

impl<O: Opener + ?Sized> Opener for Box<O> {
    fn open(&self, ctx: &Context, path: &str) -> io::Result<Box<dyn Resource>> {
        (**self).open(ctx, path)
    }
}

impl<O: Opener + ?Sized> Opener for Arc<O> {
    fn open(&self, ctx: &Context, path: &str) -> io::Result<Box<dyn Resource>> {
        (**self).open(ctx, path)
    }
}

/// An [`Opener`] backed by a closure.
///
/// ```rust,ignore
/// use fileinput::io::{FnOpener, NopClose};
///
/// let opener = FnOpener::new(|_ctx, path: &str| {
///     Ok(Box::new(NopClose::new(std::io::Cursor::new(path.to_uppercase()))) as _)
/// });
/// ```
#[derive(Clone)]
pub struct FnOpener<F> {
    f: F,
}

impl<F> FnOpener<F>
where
    F: Fn(&Context, &str) -> io::Result<Box<dyn Resource>> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnOpener<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOpener").finish_non_exhaustive()
    }
}

impl<F> Opener for FnOpener<F>
where
    F: Fn(&Context, &str) -> io::Result<Box<dyn Resource>> + Send + Sync,
{
    fn open(&self, ctx: &Context, path: &str) -> io::Result<Box<dyn Resource>> {
        (self.f)(ctx, path)
    }
}

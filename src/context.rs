//! Cancellation and deadline signal passed to every open call.
//!
//! A `Context` is a cheap handle: clones share the same cancellation flag, so
//! cancelling any clone is observed by all of them. Cancellation is
//! cooperative. The readers in this crate never poll the context themselves;
//! they hand it to the [`Opener`](crate::io::Opener), which decides whether
//! and how to honour it.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Reason a context is no longer live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("context canceled")]
    Canceled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

impl From<ContextError> for io::Error {
    fn from(e: ContextError) -> Self {
        // Interrupted is avoided on purpose: `Read` consumers retry it.
        match e {
            ContextError::Canceled => io::Error::other(e),
            ContextError::DeadlineExceeded => io::Error::new(io::ErrorKind::TimedOut, e),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    canceled: AtomicBool,
    deadline: Option<Instant>,
}

#[derive(Debug, Clone, Default)]
pub struct Context {
    inner: Arc<Inner>,
}

impl Context {
    /// A context that is never canceled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self::from_deadline(Some(deadline))
    }

    /// A context that expires after `timeout`. A timeout past the range of
    /// `Instant` means no deadline at all.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::from_deadline(Instant::now().checked_add(timeout))
    }

    fn from_deadline(deadline: Option<Instant>) -> Self {
        Self {
            inner: Arc::new(Inner {
                canceled: AtomicBool::new(false),
                deadline,
            }),
        }
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.inner.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.inner.canceled.load(Ordering::SeqCst)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Returns why the context is done, or `None` while it is still live.
    pub fn err(&self) -> Option<ContextError> {
        if self.is_canceled() {
            return Some(ContextError::Canceled);
        }
        match self.inner.deadline {
            Some(d) if Instant::now() >= d => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Like [`Context::err`], but shaped for use with `?` in I/O code.
    pub fn check(&self) -> io::Result<()> {
        match self.err() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

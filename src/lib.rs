//! # fileinput
//!
//! Helpers for command-line tools that take a list of file paths, or read
//! stdin when none are given.
//!
//! ## Overview
//!
//! fileinput provides:
//! - **Lazy concatenation**: `ConcatReader` reads a list of paths as one byte
//!   stream, opening each file only when it is reached and closing it as soon
//!   as it is exhausted. At most one file is open at a time.
//! - **Per-file iteration**: `each` hands every opened file (or its open
//!   error) to a callback and stops at the first error the callback returns.
//! - **Pluggable opening**: the `Opener` trait decides how a path becomes a
//!   readable resource. `FsOpener` uses the filesystem, `MemoryOpener` an
//!   in-memory table for tests.
//! - **Stdin fallback**: `concat_or_stdin` and `each_or_stdin` read stdin when
//!   the path list is empty.
//! - **Error policies**: `InputEngine` runs per-file processing under
//!   `FastFail` or `Accumulate` and attaches paths to errors.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::io::Read;
//! use fileinput::{ConcatReader, Context, FsOpener};
//!
//! fn main() -> std::io::Result<()> {
//!     let paths: Vec<String> = std::env::args().skip(1).collect();
//!     let mut reader = ConcatReader::new(Context::background(), FsOpener, paths);
//!
//!     let mut text = String::new();
//!     reader.read_to_string(&mut text)?;
//!     reader.close()?;
//!     print!("{text}");
//!     Ok(())
//! }
//! ```
//!
//! ## Reading semantics
//!
//! `ConcatReader::read_step` exposes the reader's state machine directly. A
//! file running out produces `Step::Boundary`, a zero-byte result that is not
//! end-of-data; only `Step::End` means every path has been consumed. The
//! `std::io::Read` implementation steps over boundaries, so `Ok(0)` from
//! `read` keeps its usual end-of-data meaning and `read_to_end` reads every
//! file.
//!
//! Errors are passed through unchanged. A failed open is reported on the read
//! that reached the path; the path is consumed and not retried, and reading
//! does not skip ahead to the next one.
//!
//! ## Features
//!
//! - `json` - Load `InputConfig` from JSON files
//! - `yaml` - Load `InputConfig` from YAML files
//! - `miette` - Pretty error reporting with miette
//! - `sarge` - CLI argument parsing and the `fcat` binary

pub mod builder;
pub mod cli;
pub mod concat;
pub mod config;
pub mod context;
pub mod each;
pub mod engine;
pub mod error;
pub mod io;

// Re-exports for convenience
pub use builder::FileInputBuilder;
pub use concat::{ConcatReader, Input, Step, concat_or, concat_or_stdin};
pub use config::{InputConfig, Mode};
pub use context::{Context, ContextError};
pub use each::{each, each_or, each_or_stdin};
pub use engine::InputEngine;
pub use error::{AggregateError, ErrorPolicy, SingleIoError, Stage, UnknownPolicy};
pub use io::{FnOpener, FsOpener, MemoryOpener, NopClose, Opener, Resource, StdinInput, StdioOpener};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::IoDiagnostic;

//! I/O abstractions for opening and reading named inputs.
//!
//! This module provides:
//! - `Opener`: Trait mapping a path identifier to an open resource
//! - `Resource`: Trait for readable, closable handles
//! - Standard implementations for the filesystem and stdin
//! - An in-memory opener for testing

mod input;
mod memory;
mod opener;
mod std_io;

pub use input::{NopClose, Resource};
pub use memory::MemoryOpener;
pub use opener::{FnOpener, Opener};
pub use std_io::{FsOpener, StdinInput, StdioOpener};

//! CLI integration helpers.
//!
//! Argument parsing belongs to the application; this module only turns the
//! parsed values into the ordered path list the readers consume. An empty
//! list means "read stdin".
//!
//! # Example with sarge
//!
//! ```rust,ignore
//! use fileinput::cli::InputArgs;
//! use sarge::prelude::*;
//!
//! let mut reader = ArgumentReader::new();
//! let input_ref = reader.add::<InputArgs>(tag::both('i', "input"));
//! let args = reader.parse()?;
//! let input = input_ref.get(&args).and_then(Result::ok).unwrap_or_default();
//! ```

#[cfg(feature = "sarge")]
mod sarge;

/// Ordered input paths collected from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputArgs(pub Vec<String>);

impl InputArgs {
    /// Create new empty input arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect paths from raw arguments, e.g. `std::env::args().skip(1)`.
    ///
    /// A lone `--` is dropped; everything after it is taken literally.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut paths = Vec::new();
        let mut literal = false;
        for arg in args {
            let arg = arg.into();
            if !literal && arg == "--" {
                literal = true;
                continue;
            }
            paths.push(arg);
        }
        Self(paths)
    }

    /// Add an input path.
    pub fn with_input(mut self, path: impl Into<String>) -> Self {
        self.0.push(path.into());
        self
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_paths(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no paths were given and stdin should be read instead.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for InputArgs {
    fn from(paths: Vec<String>) -> Self {
        Self(paths)
    }
}

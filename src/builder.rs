//! Builder for creating InputEngine instances.

use crate::cli::InputArgs;
use crate::config::InputConfig;
use crate::context::Context;
use crate::engine::InputEngine;
use crate::error::{ErrorPolicy, UnknownPolicy};
use crate::io::{FsOpener, Opener, StdioOpener};

pub struct FileInputBuilder<O = StdioOpener<FsOpener>> {
    paths: Vec<String>,
    opener: O,
    ctx: Context,
    error_policy: ErrorPolicy,
    stdin_fallback: bool,
}

impl FileInputBuilder {
    /// A builder over the filesystem where `"-"` names stdin.
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            opener: StdioOpener::new(FsOpener::new()),
            ctx: Context::background(),
            error_policy: ErrorPolicy::default(),
            stdin_fallback: true,
        }
    }

    pub fn from_config(config: &InputConfig) -> Result<Self, UnknownPolicy> {
        Self::new().apply_config(config)
    }
}

impl Default for FileInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Opener> FileInputBuilder<O> {
    /// Replace the opener, e.g. with a `MemoryOpener` in tests.
    pub fn with_opener<P: Opener>(self, opener: P) -> FileInputBuilder<P> {
        FileInputBuilder {
            paths: self.paths,
            opener,
            ctx: self.ctx,
            error_policy: self.error_policy,
            stdin_fallback: self.stdin_fallback,
        }
    }

    pub fn add_path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn paths_from_args(mut self, args: &[String]) -> Self {
        self.paths = args.to_vec();
        self
    }

    pub fn with_input_args(self, args: &InputArgs) -> Self {
        self.paths_from_args(args.as_slice())
    }

    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn with_mode(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_stdin_fallback(mut self, enabled: bool) -> Self {
        self.stdin_fallback = enabled;
        self
    }

    /// Append the configured paths and take over its policy and fallback.
    ///
    /// Fails without touching the builder if the policy name is unknown.
    pub fn apply_config(mut self, config: &InputConfig) -> Result<Self, UnknownPolicy> {
        self.error_policy = config.policy()?;
        self.paths.extend(config.paths.iter().cloned());
        self.stdin_fallback = config.stdin_fallback;
        Ok(self)
    }

    pub fn build(self) -> InputEngine<O> {
        InputEngine::new(
            self.ctx,
            self.opener,
            self.paths,
            self.error_policy,
            self.stdin_fallback,
        )
    }
}

//! Error type shared by the rewriting, interpretation and output layers.

use crate::interpreter::DrawCommand;
use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong between a grammar and a written drawing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `]` was met while only the root turtle was on the branch stack.
    ///
    /// `index` is the position of the offending symbol; `emitted` holds every
    /// command produced before interpretation stopped.
    #[error("unbalanced branch close at symbol {index} ({} segments drawn before it)", .emitted.len())]
    StackUnderflow {
        index: usize,
        emitted: Vec<DrawCommand>,
    },

    /// A parameter, rule or grammar was rejected before any work started.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `predicted` is `None` when the length does not even fit in a `usize`.
    #[error("expansion exceeds the limit of {limit} symbols (predicted: {predicted:?})")]
    ExpansionTooLarge {
        predicted: Option<usize>,
        limit: usize,
    },

    /// Reading a configuration or writing an image failed.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration JSON could not be parsed.
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}

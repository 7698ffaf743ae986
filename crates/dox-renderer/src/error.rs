//! Render pass errors.

use std::path::PathBuf;

/// Error type reported by delegation adapters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error that aborts a render pass.
///
/// Every variant is fatal: the pass stops and no output is returned.
/// Recoverable conditions (unresolved links, unsupported image formats) never
/// surface here.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The tree violates a structural contract of the parser.
    #[error("malformed document tree at {kind} node: {reason}")]
    MalformedTree {
        /// Kind name of the offending node.
        kind: &'static str,
        reason: String,
    },
    /// A symbol code outside the fixed symbol table.
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),
    /// An accent symbol without the letter it decorates.
    #[error("accent symbol {0} has no letter")]
    MissingAccentLetter(&'static str),
    /// An accent symbol decorating something other than an ASCII letter.
    #[error("accent symbol cannot decorate {0:?}")]
    InvalidAccentLetter(char),
    /// A parameter section of unclassified kind.
    #[error("unknown parameter section kind")]
    UnknownParamSection,
    /// The syntax highlighter failed.
    #[error("highlighting `{context}` failed: {source}")]
    Highlight {
        /// Language/context identifier passed to the highlighter.
        context: String,
        #[source]
        source: BoxError,
    },
    /// The diagram renderer failed.
    #[error("rendering diagram {} failed: {source}", .path.display())]
    Diagram {
        /// Source description file.
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

impl RenderError {
    pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedTree {
            kind,
            reason: reason.into(),
        }
    }
}

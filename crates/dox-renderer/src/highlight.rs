//! Fallback highlighter.

use crate::delegate::Highlighter;
use crate::error::BoxError;
use crate::escape::escape_html;

/// [`Highlighter`] that escapes source text without colorizing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&mut self, _context: &str, source: &str) -> Result<String, BoxError> {
        Ok(escape_html(source).into_owned())
    }
}

//! Per-pass render state and the output sink it guards.

use crate::escape::escape_html;

/// Context flags threaded through one traversal.
///
/// Created fresh for every pass, never stored on the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RenderState {
    /// Emission is suppressed while the subtree is still traversed.
    pub suppressed: bool,
    /// Whitespace is emitted verbatim instead of collapsing.
    pub preformatted: bool,
    /// Open multi-fragment inclusion, holding the suppression that was active
    /// when its first fragment opened.
    pub fragment_outer: Option<bool>,
}

/// Flag changes made by an enter rule, undone by the matching leave rule.
#[derive(Debug, Default)]
pub(crate) struct Frame {
    pub restore_suppressed: Option<bool>,
    pub restore_preformatted: Option<bool>,
    /// Whether enter opened an `<a>` that leave must close.
    pub link_open: bool,
}

/// Append-only output with suppression applied at the point of emission.
pub(crate) struct Sink<'o> {
    out: &'o mut String,
    pub state: RenderState,
}

impl<'o> Sink<'o> {
    pub fn new(out: &'o mut String) -> Self {
        Self {
            out,
            state: RenderState::default(),
        }
    }

    /// Literal markup.
    pub fn markup(&mut self, markup: &str) {
        if !self.state.suppressed {
            self.out.push_str(markup);
        }
    }

    /// Document text, escaped.
    pub fn text(&mut self, text: &str) {
        if !self.state.suppressed {
            self.out.push_str(&escape_html(text));
        }
    }

    /// Output of an open inclusion sequence: bypasses the sequence's own
    /// suppression but honors whatever was active outside it.
    pub fn fragment(&mut self, markup: &str) {
        if self.state.fragment_outer == Some(false) {
            self.out.push_str(markup);
        }
    }

    /// Turn suppression on, returning the value to restore.
    pub fn suppress(&mut self) -> bool {
        std::mem::replace(&mut self.state.suppressed, true)
    }

    /// Turn preformatted mode on, returning the value to restore.
    pub fn preformat(&mut self) -> bool {
        std::mem::replace(&mut self.state.preformatted, true)
    }

    /// Undo the flag changes recorded in `frame`.
    pub fn restore(&mut self, frame: &Frame) {
        if let Some(suppressed) = frame.restore_suppressed {
            self.state.suppressed = suppressed;
        }
        if let Some(preformatted) = frame.restore_preformatted {
            self.state.preformatted = preformatted;
        }
    }
}

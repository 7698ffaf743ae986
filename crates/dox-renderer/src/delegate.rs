//! Contracts for the collaborators the renderer calls mid-traversal.
//!
//! The renderer never highlights code, rasterizes diagrams, decides link
//! reachability, or chooses label wording itself. Each concern is a trait so the
//! orchestration layer can plug in project-specific behavior.

use std::path::Path;

use dox_tree::{ParamSectKind, SimpleSectKind};

use crate::error::BoxError;

/// Fully-qualified link target returned by a [`LinkResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// Value for the `href` attribute (unescaped).
    pub href: String,
    /// Whether the target lives outside the current project.
    pub external: bool,
}

/// Decides whether a cross-reference can be linked and where it points.
pub trait LinkResolver {
    /// Resolve `(scope, file, anchor)` to a locator, or `None` when unreachable.
    fn resolve(&self, scope: Option<&str>, file: &str, anchor: Option<&str>) -> Option<Locator>;
}

/// Colorizes source fragments.
pub trait Highlighter {
    /// Return highlighted markup for `source`.
    ///
    /// The result is emitted as trusted markup: the highlighter is responsible
    /// for escaping whatever it passes through.
    fn highlight(&mut self, context: &str, source: &str) -> Result<String, BoxError>;
}

/// Rasterizes diagram description files.
pub trait DiagramRenderer {
    /// Render `source` into `output_dir` and return the asset base name.
    ///
    /// The renderer references the asset as `{base}.{image format}`.
    fn render(&mut self, source: &Path, output_dir: &Path) -> Result<String, BoxError>;
}

/// Headings whose wording is delegated to a [`Translator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    SeeAlso,
    Returns,
    Author,
    Authors,
    Version,
    Since,
    Date,
    Note,
    Warning,
    Precondition,
    Postcondition,
    Invariant,
    Remarks,
    Attention,
    Parameters,
    ReturnValues,
    Exceptions,
    InternalUseOnly,
}

impl Label {
    /// Heading for an admonition, `None` for kinds without a fixed heading.
    #[must_use]
    pub fn for_simple_sect(kind: SimpleSectKind) -> Option<Self> {
        let label = match kind {
            SimpleSectKind::See => Self::SeeAlso,
            SimpleSectKind::Return => Self::Returns,
            SimpleSectKind::Author => Self::Author,
            SimpleSectKind::Authors => Self::Authors,
            SimpleSectKind::Version => Self::Version,
            SimpleSectKind::Since => Self::Since,
            SimpleSectKind::Date => Self::Date,
            SimpleSectKind::Note => Self::Note,
            SimpleSectKind::Warning => Self::Warning,
            SimpleSectKind::Pre => Self::Precondition,
            SimpleSectKind::Post => Self::Postcondition,
            SimpleSectKind::Invar => Self::Invariant,
            SimpleSectKind::Remark => Self::Remarks,
            SimpleSectKind::Attention => Self::Attention,
            SimpleSectKind::User | SimpleSectKind::Unknown => return None,
        };
        Some(label)
    }

    /// Heading for a parameter section, `None` for an unclassified kind.
    #[must_use]
    pub fn for_param_sect(kind: ParamSectKind) -> Option<Self> {
        match kind {
            ParamSectKind::Param => Some(Self::Parameters),
            ParamSectKind::RetVal => Some(Self::ReturnValues),
            ParamSectKind::Exception => Some(Self::Exceptions),
            ParamSectKind::Unknown => None,
        }
    }
}

/// Supplies localized heading text.
pub trait Translator {
    /// Heading text for `label`. Returned text is emitted as trusted markup.
    fn label(&self, label: Label) -> String;
}

/// Diagram renderer used when no rasterizer is configured.
///
/// Fails every request so a diagram is never silently dropped.
#[derive(Debug, Default)]
pub struct MissingDiagramRenderer;

impl DiagramRenderer for MissingDiagramRenderer {
    fn render(&mut self, source: &Path, _output_dir: &Path) -> Result<String, BoxError> {
        Err(format!(
            "no diagram renderer configured for {}",
            source.display()
        )
        .into())
    }
}

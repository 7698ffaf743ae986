//! Node kinds and their payloads.
//!
//! [`NodeKind`] is a closed union over every construct the comment parser can
//! produce. Leaf kinds carry payload only; compound kinds carry payload and own
//! an ordered list of children in the [`DocTree`](crate::DocTree) arena.

/// Target of a cross-reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkTarget {
    /// External scope (tag file) identifier, `None` for in-project targets.
    pub scope: Option<String>,
    /// Target file identifier.
    pub file: String,
    /// Anchor within the target file.
    pub anchor: Option<String>,
}

impl LinkTarget {
    /// Link to a file in the current project.
    #[must_use]
    pub fn file(file: impl Into<String>) -> Self {
        Self {
            scope: None,
            file: file.into(),
            anchor: None,
        }
    }

    /// Set the anchor within the target file.
    #[must_use]
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// Set the external scope the file belongs to.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// Symbolic character codes.
///
/// Accent marks (`Uml` through `Ring`, except `Szlig`) are parameterized by the
/// letter stored alongside the code in [`NodeKind::Symbol`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    BSlash,
    At,
    Less,
    Greater,
    Amp,
    Dollar,
    Hash,
    Percent,
    Copy,
    Apos,
    Quot,
    Uml,
    Acute,
    Grave,
    Circ,
    Tilde,
    Szlig,
    Cedil,
    Ring,
    Nbsp,
    /// Code the parser could not classify. Rendering it is a contract violation.
    Unknown(String),
}

impl SymbolKind {
    /// Parse a symbol from its command name (`"copy"`, `"uml"`, `"\\"`, ...).
    ///
    /// Unrecognized names map to [`SymbolKind::Unknown`].
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code {
            "\\" | "bslash" => Self::BSlash,
            "@" | "at" => Self::At,
            "<" | "lt" => Self::Less,
            ">" | "gt" => Self::Greater,
            "&" | "amp" => Self::Amp,
            "$" | "dollar" => Self::Dollar,
            "#" | "hash" => Self::Hash,
            "%" | "percent" => Self::Percent,
            "copy" => Self::Copy,
            "apos" => Self::Apos,
            "quot" => Self::Quot,
            "uml" => Self::Uml,
            "acute" => Self::Acute,
            "grave" => Self::Grave,
            "circ" => Self::Circ,
            "tilde" => Self::Tilde,
            "szlig" => Self::Szlig,
            "cedil" => Self::Cedil,
            "ring" => Self::Ring,
            "nbsp" => Self::Nbsp,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Whether the symbol needs an accompanying letter.
    #[must_use]
    pub fn is_accent(&self) -> bool {
        matches!(
            self,
            Self::Uml
                | Self::Acute
                | Self::Grave
                | Self::Circ
                | Self::Tilde
                | Self::Cedil
                | Self::Ring
        )
    }
}

/// Inline style toggled by [`NodeKind::StyleChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Italic,
    Code,
    Subscript,
    Superscript,
    Center,
    Small,
}

/// Flavor of a verbatim block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbatimKind {
    /// Source code, passed through the highlighter.
    Code,
    /// Literal text shown preformatted.
    Verbatim,
    /// Raw markup for the HTML target only.
    HtmlOnly,
    /// Raw markup for the LaTeX target only.
    LatexOnly,
}

/// Flavor of a whole-file inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeKind {
    Include,
    DontInclude,
    HtmlInclude,
    VerbInclude,
}

/// Kind of one fragment in a multi-fragment code inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncOperatorKind {
    Line,
    SkipLine,
    Until,
    /// Fragment that is consumed but never shown.
    Skip,
}

impl IncOperatorKind {
    /// Whether this fragment's text is sent to the highlighter.
    #[must_use]
    pub fn is_rendered(self) -> bool {
        !matches!(self, Self::Skip)
    }
}

/// Admonition ("simple section") kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleSectKind {
    See,
    Return,
    Author,
    Authors,
    Version,
    Since,
    Date,
    Note,
    Warning,
    Pre,
    Post,
    Invar,
    Remark,
    Attention,
    /// Section with a user supplied [`NodeKind::Title`] child.
    User,
    Unknown,
}

/// Parameter section kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSectKind {
    Param,
    RetVal,
    Exception,
    /// Kind the parser could not classify. Rendering it is a contract violation.
    Unknown,
}

/// Output format an image node was written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Html,
    Latex,
    Rtf,
}

/// A node's kind together with its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    // Leaves
    Word(String),
    LinkedWord {
        word: String,
        target: LinkTarget,
    },
    /// Whitespace run. The characters are only shown in preformatted context.
    WhiteSpace(String),
    Symbol {
        kind: SymbolKind,
        letter: Option<char>,
    },
    Url(String),
    LineBreak,
    HorRuler,
    StyleChange {
        style: Style,
        enable: bool,
    },
    Verbatim {
        kind: VerbatimKind,
        context: String,
        text: String,
    },
    Anchor(String),
    Include {
        kind: IncludeKind,
        context: String,
        text: String,
    },
    IncOperator {
        kind: IncOperatorKind,
        context: String,
        text: String,
        first: bool,
        last: bool,
    },
    Formula {
        name: String,
        text: String,
    },

    // Compounds
    Root,
    Para,
    AutoList {
        enumerated: bool,
    },
    AutoListItem,
    SimpleSect(SimpleSectKind),
    Title,
    SimpleList,
    SimpleListItem,
    Section {
        anchor: String,
        title: String,
    },
    HtmlList {
        ordered: bool,
    },
    HtmlListItem,
    HtmlPre,
    HtmlDescList,
    HtmlDescTitle,
    HtmlDescData,
    HtmlTable,
    HtmlRow,
    HtmlCell {
        heading: bool,
    },
    HtmlCaption,
    IndexEntry,
    Internal,
    HRef(String),
    HtmlHeader(u8),
    Image {
        kind: ImageKind,
        name: String,
    },
    DotFile(String),
    Link(LinkTarget),
    Ref {
        target: LinkTarget,
        title: String,
    },
    SecRefItem {
        file: String,
        anchor: String,
    },
    SecRefList,
    Language(String),
    ParamSect(ParamSectKind),
    ParamList(Vec<String>),
    XRefItem {
        file: String,
        anchor: String,
        title: String,
    },
    InternalRef {
        file: String,
        anchor: String,
    },
    Copy,
}

impl NodeKind {
    /// Whether this kind never owns children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Word(_)
                | Self::LinkedWord { .. }
                | Self::WhiteSpace(_)
                | Self::Symbol { .. }
                | Self::Url(_)
                | Self::LineBreak
                | Self::HorRuler
                | Self::StyleChange { .. }
                | Self::Verbatim { .. }
                | Self::Anchor(_)
                | Self::Include { .. }
                | Self::IncOperator { .. }
                | Self::Formula { .. }
        )
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Word(_) => "word",
            Self::LinkedWord { .. } => "linked word",
            Self::WhiteSpace(_) => "whitespace",
            Self::Symbol { .. } => "symbol",
            Self::Url(_) => "url",
            Self::LineBreak => "line break",
            Self::HorRuler => "horizontal ruler",
            Self::StyleChange { .. } => "style change",
            Self::Verbatim { .. } => "verbatim",
            Self::Anchor(_) => "anchor",
            Self::Include { .. } => "include",
            Self::IncOperator { .. } => "include fragment",
            Self::Formula { .. } => "formula",
            Self::Root => "root",
            Self::Para => "paragraph",
            Self::AutoList { .. } => "auto list",
            Self::AutoListItem => "auto list item",
            Self::SimpleSect(_) => "simple section",
            Self::Title => "title",
            Self::SimpleList => "simple list",
            Self::SimpleListItem => "simple list item",
            Self::Section { .. } => "section",
            Self::HtmlList { .. } => "html list",
            Self::HtmlListItem => "html list item",
            Self::HtmlPre => "preformatted block",
            Self::HtmlDescList => "description list",
            Self::HtmlDescTitle => "description title",
            Self::HtmlDescData => "description data",
            Self::HtmlTable => "table",
            Self::HtmlRow => "table row",
            Self::HtmlCell { .. } => "table cell",
            Self::HtmlCaption => "caption",
            Self::IndexEntry => "index entry",
            Self::Internal => "internal",
            Self::HRef(_) => "href",
            Self::HtmlHeader(_) => "header",
            Self::Image { .. } => "image",
            Self::DotFile(_) => "dot file",
            Self::Link(_) => "link",
            Self::Ref { .. } => "ref",
            Self::SecRefItem { .. } => "section ref item",
            Self::SecRefList => "section ref list",
            Self::Language(_) => "language",
            Self::ParamSect(_) => "parameter section",
            Self::ParamList(_) => "parameter list",
            Self::XRefItem { .. } => "xref item",
            Self::InternalRef { .. } => "internal ref",
            Self::Copy => "copy",
        }
    }
}

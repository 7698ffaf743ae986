//! Single-pass HTML renderer for documentation comment trees.

use std::path::{Path, PathBuf};

use dox_tree::{
    DocTree, ImageKind, IncOperatorKind, IncludeKind, LinkTarget, Node, NodeKind, SimpleSectKind,
    Style, VerbatimKind,
};

use crate::delegate::{
    DiagramRenderer, Highlighter, Label, LinkResolver, MissingDiagramRenderer, Translator,
};
use crate::error::RenderError;
use crate::escape::{escape_html, render_symbol};
use crate::highlight::PlainHighlighter;
use crate::resolver::{FileLinkResolver, with_extension};
use crate::state::{Frame, Sink};
use crate::translator::EnglishTranslator;

const FRAGMENT_OPEN: &str = r#"<div class="fragment"><pre>"#;
const FRAGMENT_CLOSE: &str = "</pre></div>";

/// Output settings shared by all passes of one renderer.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Directory generated diagram assets are written to.
    pub output_dir: PathBuf,
    /// Extension of generated pages, including the dot.
    pub file_extension: String,
    /// Image format produced by the diagram renderer.
    pub dot_image_format: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("html"),
            file_extension: ".html".to_owned(),
            dot_image_format: "png".to_owned(),
        }
    }
}

/// Renders a [`DocTree`] to HTML in one depth-first pass.
///
/// Highlighting, diagram rasterization, link resolution and label wording are
/// delegated to pluggable collaborators. Render state lives only for the
/// duration of a pass, so one renderer can render any number of trees.
///
/// # Example
///
/// ```
/// use dox_renderer::HtmlDocRenderer;
/// use dox_tree::{NodeKind, TreeBuilder};
///
/// let tree = TreeBuilder::new()
///     .open(NodeKind::Para)
///     .word("a<b")
///     .close()
///     .finish()
///     .unwrap();
///
/// let html = HtmlDocRenderer::new().render(&tree).unwrap();
/// assert_eq!(html, "a&lt;b");
/// ```
pub struct HtmlDocRenderer {
    options: HtmlOptions,
    resolver: Box<dyn LinkResolver>,
    highlighter: Box<dyn Highlighter>,
    diagrams: Box<dyn DiagramRenderer>,
    translator: Box<dyn Translator>,
}

impl HtmlDocRenderer {
    /// Create a renderer with default options and collaborators.
    ///
    /// Defaults: [`FileLinkResolver`] for `.html`, [`PlainHighlighter`],
    /// [`EnglishTranslator`] and [`MissingDiagramRenderer`].
    #[must_use]
    pub fn new() -> Self {
        let options = HtmlOptions::default();
        Self {
            resolver: Box::new(FileLinkResolver::new(options.file_extension.clone())),
            highlighter: Box::new(PlainHighlighter),
            diagrams: Box::new(MissingDiagramRenderer),
            translator: Box::new(EnglishTranslator),
            options,
        }
    }

    /// Replace the output options.
    ///
    /// The link resolver is not touched; configure it with the same file
    /// extension via [`with_resolver`](Self::with_resolver).
    #[must_use]
    pub fn with_options(mut self, options: HtmlOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_resolver<R: LinkResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    #[must_use]
    pub fn with_highlighter<H: Highlighter + 'static>(mut self, highlighter: H) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    #[must_use]
    pub fn with_diagram_renderer<D: DiagramRenderer + 'static>(mut self, diagrams: D) -> Self {
        self.diagrams = Box::new(diagrams);
        self
    }

    #[must_use]
    pub fn with_translator<T: Translator + 'static>(mut self, translator: T) -> Self {
        self.translator = Box::new(translator);
        self
    }

    #[must_use]
    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }

    /// Render `tree` and return the markup.
    ///
    /// On error nothing is returned; the partial output is discarded.
    pub fn render(&mut self, tree: &DocTree) -> Result<String, RenderError> {
        let mut out = String::with_capacity(4096);
        self.render_into(tree, &mut out)?;
        Ok(out)
    }

    /// Render `tree`, appending to `out`.
    ///
    /// On error `out` may hold partial markup and must not be used.
    pub fn render_into(&mut self, tree: &DocTree, out: &mut String) -> Result<(), RenderError> {
        let start = out.len();
        let mut sink = Sink::new(out);
        self.visit(tree.root_node(), &mut sink)?;

        if sink.state.fragment_outer.is_some() {
            return Err(RenderError::malformed(
                "include fragment",
                "inclusion sequence has no last fragment",
            ));
        }

        tracing::debug!(nodes = tree.len(), bytes = out.len() - start, "Rendered document tree");
        Ok(())
    }

    fn visit(&mut self, node: Node<'_>, sink: &mut Sink<'_>) -> Result<(), RenderError> {
        let frame = self.open(node, sink)?;
        for child in node.children() {
            self.visit(child, sink)?;
        }
        self.close(node, &frame, sink);
        sink.restore(&frame);
        Ok(())
    }

    /// Leaf rules, and enter rules of compound nodes.
    #[allow(clippy::too_many_lines)]
    fn open(&mut self, node: Node<'_>, sink: &mut Sink<'_>) -> Result<Frame, RenderError> {
        let mut frame = Frame::default();
        match node.kind() {
            NodeKind::Word(text) => sink.text(text),
            NodeKind::LinkedWord { word, target } => {
                let open = self.start_link(target, sink);
                sink.text(word);
                end_link(open, sink);
            }
            NodeKind::WhiteSpace(chars) => {
                if sink.state.preformatted {
                    sink.markup(chars);
                } else {
                    sink.markup(" ");
                }
            }
            NodeKind::Symbol { kind, letter } => {
                let literal = render_symbol(kind, *letter)?;
                sink.markup(&literal);
            }
            NodeKind::Url(url) => {
                let url = escape_html(url);
                sink.markup(&format!(r#"<a href="{url}">{url}</a>"#));
            }
            NodeKind::LineBreak => sink.markup("<br>\n"),
            NodeKind::HorRuler => sink.markup("<hr>\n"),
            NodeKind::StyleChange { style, enable } => {
                sink.markup(style_markup(*style, *enable));
            }
            NodeKind::Verbatim {
                kind,
                context,
                text,
            } => match kind {
                VerbatimKind::Code => self.code_fragment(context, text, sink)?,
                VerbatimKind::Verbatim => verbatim_fragment(text, sink),
                VerbatimKind::HtmlOnly => sink.markup(text),
                VerbatimKind::LatexOnly => {}
            },
            NodeKind::Anchor(anchor) => {
                sink.markup(&format!(r#"<a name="{}"></a>"#, escape_html(anchor)));
            }
            NodeKind::Include {
                kind,
                context,
                text,
            } => match kind {
                IncludeKind::Include => self.code_fragment(context, text, sink)?,
                IncludeKind::DontInclude => {}
                IncludeKind::HtmlInclude => sink.markup(text),
                IncludeKind::VerbInclude => verbatim_fragment(text, sink),
            },
            NodeKind::IncOperator {
                kind,
                context,
                text,
                first,
                last,
            } => self.inc_operator(*kind, context, text, *first, *last, sink)?,
            NodeKind::Formula { name, text } => {
                let src = escape_html(name);
                if text.starts_with('\\') {
                    sink.markup(&format!(
                        "<p><center>\n<img align=\"top\" src=\"{src}.png\">\n</center><p>\n"
                    ));
                } else {
                    sink.markup(&format!("<img align=\"top\" src=\"{src}.png\"> "));
                }
            }

            NodeKind::Root
            | NodeKind::Para
            | NodeKind::Title
            | NodeKind::Language(_)
            | NodeKind::Copy => {}
            NodeKind::AutoList { enumerated } => {
                sink.markup(if *enumerated { "<ol>\n" } else { "<ul>\n" });
            }
            NodeKind::AutoListItem | NodeKind::SimpleListItem => sink.markup("<li>"),
            NodeKind::SimpleSect(kind) => {
                sink.markup("<dl compact><dt><b>");
                if let Some(label) = Label::for_simple_sect(*kind) {
                    sink.markup(&self.translator.label(label));
                }
                // User sections get their heading from a Title child.
                if *kind != SimpleSectKind::User {
                    sink.markup(":</b></dt><dd>");
                }
            }
            NodeKind::SimpleList => sink.markup("<ul>\n"),
            NodeKind::Section { anchor, title } => {
                let level = (node.section_depth() + 1).min(6);
                sink.markup(&format!(r#"<h{level}><a name="{}"></a>"#, escape_html(anchor)));
                sink.text(title);
                sink.markup(&format!("</h{level}>\n"));
            }
            NodeKind::HtmlList { ordered } => {
                sink.markup(if *ordered { "<ol>\n" } else { "<ul>\n" });
            }
            NodeKind::HtmlListItem => sink.markup("<li>\n"),
            NodeKind::HtmlPre => {
                sink.markup("<pre>\n");
                frame.restore_preformatted = Some(sink.preformat());
            }
            NodeKind::HtmlDescList => sink.markup("<dl>\n"),
            NodeKind::HtmlDescTitle => sink.markup("<dt>"),
            NodeKind::HtmlDescData => sink.markup("<dd>"),
            NodeKind::HtmlTable => {
                sink.markup("<table border=\"1\" cellspacing=\"3\" cellpadding=\"3\">\n");
            }
            NodeKind::HtmlRow => sink.markup("<tr>\n"),
            NodeKind::HtmlCell { heading } => sink.markup(if *heading { "<th>" } else { "<td>" }),
            NodeKind::HtmlCaption => sink.markup("<caption align=\"bottom\">"),
            NodeKind::IndexEntry => {
                frame.restore_suppressed = Some(sink.suppress());
            }
            NodeKind::Internal => {
                sink.markup("<p><b>");
                sink.markup(&self.translator.label(Label::InternalUseOnly));
                sink.markup("</b></p>\n<p>\n");
            }
            NodeKind::HRef(url) => {
                sink.markup(&format!(r#"<a href="{}">"#, escape_html(url)));
            }
            NodeKind::HtmlHeader(level) => {
                if !(1..=6).contains(level) {
                    return Err(RenderError::malformed(
                        node.kind().name(),
                        format!("heading level {level} outside 1..=6"),
                    ));
                }
                sink.markup(&format!("<h{level}>"));
            }
            NodeKind::Image { kind, name } => {
                if *kind == ImageKind::Html {
                    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
                    sink.markup(&format!(
                        "<div align=\"center\">\n<img src=\"{}\" alt=\"{}\">\n",
                        escape_html(name),
                        escape_html(base)
                    ));
                    if node.has_children() {
                        sink.markup("<p><strong>");
                    }
                } else {
                    tracing::warn!(
                        image = %name,
                        ?kind,
                        "Image format not supported by HTML, skipping"
                    );
                    frame.restore_suppressed = Some(sink.suppress());
                }
            }
            NodeKind::DotFile(file) => {
                // Rasterize even when suppressed; the asset may be referenced elsewhere.
                let asset = self
                    .diagrams
                    .render(Path::new(file), &self.options.output_dir)
                    .map_err(|source| RenderError::Diagram {
                        path: PathBuf::from(file),
                        source,
                    })?;
                let asset = escape_html(&asset);
                sink.markup(&format!(
                    "<div align=\"center\">\n<img src=\"{asset}.{}\" alt=\"{asset}\">\n",
                    escape_html(&self.options.dot_image_format)
                ));
                if node.has_children() {
                    sink.markup("<p><strong>");
                }
            }
            NodeKind::Link(target) => {
                frame.link_open = self.start_link(target, sink);
            }
            NodeKind::Ref { target, title } => {
                frame.link_open = self.start_link(target, sink);
                if !node.has_children() {
                    sink.text(title);
                }
            }
            NodeKind::SecRefItem { file, anchor } => {
                let file = self.output_file_name(file);
                sink.markup(&format!(
                    r#"<li><a href="{}#{}">"#,
                    escape_html(&file),
                    escape_html(anchor)
                ));
            }
            NodeKind::SecRefList => sink.markup("<multicol cols=3>\n<ul>\n"),
            NodeKind::ParamSect(kind) => {
                let label =
                    Label::for_param_sect(*kind).ok_or(RenderError::UnknownParamSection)?;
                sink.markup("<dl compact><dt><b>");
                sink.markup(&self.translator.label(label));
                sink.markup(":</b></dt><dd>\n");
                sink.markup("  <table border=\"0\" cellspacing=\"2\" cellpadding=\"0\">\n");
            }
            NodeKind::ParamList(names) => {
                sink.markup("    <tr><td valign=top><em>");
                sink.text(&names.join(","));
                sink.markup("</em>&nbsp;</td><td>");
            }
            NodeKind::XRefItem {
                file,
                anchor,
                title,
            } => {
                let file = self.output_file_name(file);
                sink.markup(&format!(
                    r#"<dl compact><dt><b><a class="el" href="{}#{}">"#,
                    escape_html(&file),
                    escape_html(anchor)
                ));
                sink.text(title);
                sink.markup(":</a></b></dt><dd>");
            }
            NodeKind::InternalRef { file, anchor } => {
                let target = LinkTarget::file(file.as_str()).with_anchor(anchor.as_str());
                frame.link_open = self.start_link(&target, sink);
            }
        }
        Ok(frame)
    }

    /// Leave rules of compound nodes.
    fn close(&self, node: Node<'_>, frame: &Frame, sink: &mut Sink<'_>) {
        match node.kind() {
            NodeKind::AutoList { enumerated } => {
                sink.markup(if *enumerated { "</ol>\n" } else { "</ul>\n" });
            }
            NodeKind::AutoListItem => sink.markup("</li>"),
            NodeKind::Para => {
                if !node.is_last_paragraph() && !in_parameter_block(node) {
                    sink.markup("\n<p>\n");
                }
            }
            NodeKind::SimpleSect(_) | NodeKind::XRefItem { .. } => sink.markup("</dd></dl>\n"),
            NodeKind::Title => sink.markup("</b></dt><dd>"),
            NodeKind::SimpleList => sink.markup("</ul>\n"),
            NodeKind::SimpleListItem | NodeKind::HtmlListItem => sink.markup("</li>\n"),
            NodeKind::HtmlList { ordered } => {
                sink.markup(if *ordered { "</ol>\n" } else { "</ul>\n" });
            }
            NodeKind::HtmlPre => sink.markup("</pre>\n"),
            NodeKind::HtmlDescList => sink.markup("</dl>\n"),
            NodeKind::HtmlDescTitle => sink.markup("</dt>\n"),
            NodeKind::HtmlDescData => sink.markup("</dd>\n"),
            NodeKind::HtmlTable => sink.markup("</table>\n"),
            NodeKind::HtmlRow => sink.markup("</tr>\n"),
            NodeKind::HtmlCell { heading } => sink.markup(if *heading { "</th>" } else { "</td>" }),
            NodeKind::HtmlCaption => sink.markup("</caption>\n"),
            NodeKind::Internal => sink.markup("</p>\n"),
            NodeKind::HRef(_) => sink.markup("</a>"),
            NodeKind::HtmlHeader(level) => sink.markup(&format!("</h{level}>\n")),
            NodeKind::Image { kind, .. } => {
                if *kind == ImageKind::Html {
                    if node.has_children() {
                        sink.markup("</strong></p>");
                    }
                    sink.markup("</div>\n");
                }
            }
            NodeKind::DotFile(_) => {
                if node.has_children() {
                    sink.markup("</strong></p>\n");
                }
                sink.markup("</div>\n");
            }
            NodeKind::Link(_) => end_link(frame.link_open, sink),
            NodeKind::Ref { .. } | NodeKind::InternalRef { .. } => {
                end_link(frame.link_open, sink);
                sink.markup(" ");
            }
            NodeKind::SecRefItem { .. } => sink.markup("</a> "),
            NodeKind::SecRefList => sink.markup("</ul>\n</multicol>\n"),
            NodeKind::ParamSect(_) => sink.markup("  </table>\n</dl>\n"),
            NodeKind::ParamList(_) => sink.markup("</td></tr>\n"),
            _ => {}
        }
    }

    /// Open a hyperlink if the target resolves. Returns whether `<a>` was emitted.
    fn start_link(&self, target: &LinkTarget, sink: &mut Sink<'_>) -> bool {
        let scope = target.scope.as_deref();
        let anchor = target.anchor.as_deref();
        match self.resolver.resolve(scope, &target.file, anchor) {
            Some(locator) => {
                let class = if locator.external { "elRef" } else { "el" };
                sink.markup(&format!(
                    r#"<a class="{class}" href="{}">"#,
                    escape_html(&locator.href)
                ));
                true
            }
            None => {
                tracing::debug!(
                    file = %target.file,
                    scope = ?scope,
                    anchor = ?anchor,
                    "Unresolved cross-reference, emitting plain text"
                );
                false
            }
        }
    }

    fn highlight(&mut self, context: &str, text: &str) -> Result<String, RenderError> {
        self.highlighter
            .highlight(context, text)
            .map_err(|source| RenderError::Highlight {
                context: context.to_owned(),
                source,
            })
    }

    fn code_fragment(
        &mut self,
        context: &str,
        text: &str,
        sink: &mut Sink<'_>,
    ) -> Result<(), RenderError> {
        if sink.state.suppressed {
            return Ok(());
        }
        let html = self.highlight(context, text)?;
        sink.markup(FRAGMENT_OPEN);
        sink.markup(&html);
        sink.markup(FRAGMENT_CLOSE);
        Ok(())
    }

    fn inc_operator(
        &mut self,
        kind: IncOperatorKind,
        context: &str,
        text: &str,
        first: bool,
        last: bool,
        sink: &mut Sink<'_>,
    ) -> Result<(), RenderError> {
        if first {
            if sink.state.fragment_outer.is_some() {
                return Err(RenderError::malformed(
                    "include fragment",
                    "first fragment inside an open inclusion sequence",
                ));
            }
            let outer = sink.suppress();
            sink.state.fragment_outer = Some(outer);
            sink.fragment(FRAGMENT_OPEN);
        } else if sink.state.fragment_outer.is_none() {
            return Err(RenderError::malformed(
                "include fragment",
                "fragment outside an inclusion sequence",
            ));
        }

        if kind.is_rendered() && sink.state.fragment_outer == Some(false) {
            let html = self.highlight(context, text)?;
            sink.fragment(&html);
        }

        if last {
            sink.fragment(FRAGMENT_CLOSE);
            if let Some(outer) = sink.state.fragment_outer.take() {
                sink.state.suppressed = outer;
            }
        } else {
            sink.fragment("\n");
        }
        Ok(())
    }

    fn output_file_name(&self, file: &str) -> String {
        with_extension(file, &self.options.file_extension)
    }
}

impl Default for HtmlDocRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn end_link(open: bool, sink: &mut Sink<'_>) {
    if open {
        sink.markup("</a>");
    }
}

fn verbatim_fragment(text: &str, sink: &mut Sink<'_>) {
    sink.markup(FRAGMENT_OPEN);
    sink.text(text);
    sink.markup(FRAGMENT_CLOSE);
}

fn in_parameter_block(node: Node<'_>) -> bool {
    node.parent().is_some_and(|parent| {
        matches!(
            parent.kind(),
            NodeKind::ParamSect(_) | NodeKind::ParamList(_)
        )
    })
}

fn style_markup(style: Style, enable: bool) -> &'static str {
    match (style, enable) {
        (Style::Bold, true) => "<b>",
        (Style::Bold, false) => "</b> ",
        (Style::Italic, true) => "<em>",
        (Style::Italic, false) => "</em> ",
        (Style::Code, true) => "<code>",
        (Style::Code, false) => "</code> ",
        (Style::Subscript, true) => "<sub>",
        (Style::Subscript, false) => "</sub> ",
        (Style::Superscript, true) => "<sup>",
        (Style::Superscript, false) => "</sup> ",
        (Style::Center, true) => "<center>",
        (Style::Center, false) => "</center> ",
        (Style::Small, true) => "<small>",
        (Style::Small, false) => "</small> ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use dox_tree::{ParamSectKind, SymbolKind, TreeBuilder};
    use pretty_assertions::assert_eq;

    fn render(builder: TreeBuilder) -> String {
        HtmlDocRenderer::new().render(&builder.finish().unwrap()).unwrap()
    }

    fn render_err(builder: TreeBuilder) -> RenderError {
        HtmlDocRenderer::new()
            .render(&builder.finish().unwrap())
            .unwrap_err()
    }

    struct FixedDiagrams;

    impl DiagramRenderer for FixedDiagrams {
        fn render(&mut self, source: &Path, _output_dir: &Path) -> Result<String, BoxError> {
            Ok(source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default())
        }
    }

    struct FailingHighlighter;

    impl Highlighter for FailingHighlighter {
        fn highlight(&mut self, _context: &str, _source: &str) -> Result<String, BoxError> {
            Err("lexer crashed".into())
        }
    }

    #[test]
    fn test_words_and_whitespace() {
        let html = render(TreeBuilder::new().word("Hello").space().word("world"));
        assert_eq!(html, "Hello world");
    }

    #[test]
    fn test_whitespace_collapses_outside_pre() {
        let html = render(
            TreeBuilder::new()
                .word("a")
                .leaf(NodeKind::WhiteSpace("\n\t  ".to_owned()))
                .word("b"),
        );
        assert_eq!(html, "a b");
    }

    #[test]
    fn test_whitespace_verbatim_inside_pre() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::HtmlPre)
                .word("a")
                .leaf(NodeKind::WhiteSpace("\n  ".to_owned()))
                .word("b")
                .close()
                .leaf(NodeKind::WhiteSpace("\n  ".to_owned())),
        );
        assert_eq!(html, "<pre>\na\n  b</pre>\n ");
    }

    #[test]
    fn test_symbol() {
        let html = render(TreeBuilder::new().leaf(NodeKind::Symbol {
            kind: SymbolKind::Acute,
            letter: Some('e'),
        }));
        assert_eq!(html, "&eacute;");
    }

    #[test]
    fn test_unknown_symbol_is_fatal() {
        let err = render_err(TreeBuilder::new().leaf(NodeKind::Symbol {
            kind: SymbolKind::Unknown("reg".to_owned()),
            letter: None,
        }));
        assert!(matches!(err, RenderError::UnknownSymbol(code) if code == "reg"));
    }

    #[test]
    fn test_url() {
        let url = "http://x.org/?a=1&b=2".to_owned();
        let html = render(TreeBuilder::new().leaf(NodeKind::Url(url)));
        assert_eq!(
            html,
            r#"<a href="http://x.org/?a=1&amp;b=2">http://x.org/?a=1&amp;b=2</a>"#
        );
    }

    #[test]
    fn test_style_changes() {
        let html = render(
            TreeBuilder::new()
                .leaf(NodeKind::StyleChange {
                    style: Style::Bold,
                    enable: true,
                })
                .word("x")
                .leaf(NodeKind::StyleChange {
                    style: Style::Bold,
                    enable: false,
                })
                .leaf(NodeKind::StyleChange {
                    style: Style::Code,
                    enable: true,
                })
                .word("y")
                .leaf(NodeKind::StyleChange {
                    style: Style::Code,
                    enable: false,
                }),
        );
        assert_eq!(html, "<b>x</b> <code>y</code> ");
    }

    #[test]
    fn test_verbatim_kinds() {
        let verbatim = |kind: VerbatimKind, text: &str| NodeKind::Verbatim {
            kind,
            context: "a.cpp".to_owned(),
            text: text.to_owned(),
        };
        let html = render(
            TreeBuilder::new()
                .leaf(verbatim(VerbatimKind::Verbatim, "x < y"))
                .leaf(verbatim(VerbatimKind::HtmlOnly, "<span>raw</span>"))
                .leaf(verbatim(VerbatimKind::LatexOnly, "\\LaTeX")),
        );
        assert_eq!(
            html,
            r#"<div class="fragment"><pre>x &lt; y</pre></div><span>raw</span>"#
        );
    }

    #[test]
    fn test_code_block_uses_highlighter() {
        let html = render(TreeBuilder::new().leaf(NodeKind::Verbatim {
            kind: VerbatimKind::Code,
            context: "a.cpp".to_owned(),
            text: "a && b".to_owned(),
        }));
        assert_eq!(html, r#"<div class="fragment"><pre>a &amp;&amp; b</pre></div>"#);
    }

    #[test]
    fn test_highlighter_failure_is_fatal() {
        let tree = TreeBuilder::new()
            .leaf(NodeKind::Include {
                kind: IncludeKind::Include,
                context: "main.c".to_owned(),
                text: "int x;".to_owned(),
            })
            .finish()
            .unwrap();
        let err = HtmlDocRenderer::new()
            .with_highlighter(FailingHighlighter)
            .render(&tree)
            .unwrap_err();
        assert!(matches!(err, RenderError::Highlight { ref context, .. } if context == "main.c"));
    }

    #[test]
    fn test_include_kinds() {
        let include = |kind: IncludeKind, text: &str| NodeKind::Include {
            kind,
            context: "x.h".to_owned(),
            text: text.to_owned(),
        };
        let html = render(
            TreeBuilder::new()
                .leaf(include(IncludeKind::DontInclude, "skipped"))
                .leaf(include(IncludeKind::HtmlInclude, "<i>raw</i>"))
                .leaf(include(IncludeKind::VerbInclude, "a&b")),
        );
        assert_eq!(
            html,
            r#"<i>raw</i><div class="fragment"><pre>a&amp;b</pre></div>"#
        );
    }

    #[test]
    fn test_anchor() {
        let html = render(TreeBuilder::new().leaf(NodeKind::Anchor("sec_1".to_owned())));
        assert_eq!(html, r#"<a name="sec_1"></a>"#);
    }

    #[test]
    fn test_formula_inline_and_display() {
        let html = render(
            TreeBuilder::new()
                .leaf(NodeKind::Formula {
                    name: "form_0".to_owned(),
                    text: "$x^2$".to_owned(),
                })
                .leaf(NodeKind::Formula {
                    name: "form_1".to_owned(),
                    text: "\\[ y \\]".to_owned(),
                }),
        );
        assert_eq!(
            html,
            "<img align=\"top\" src=\"form_0.png\"> \
             <p><center>\n<img align=\"top\" src=\"form_1.png\">\n</center><p>\n"
        );
    }

    #[test]
    fn test_auto_lists() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::AutoList { enumerated: true })
                .open(NodeKind::AutoListItem)
                .word("one")
                .close()
                .close()
                .open(NodeKind::AutoList { enumerated: false })
                .close(),
        );
        assert_eq!(html, "<ol>\n<li>one</li></ol>\n<ul>\n</ul>\n");
    }

    #[test]
    fn test_paragraph_separator_omitted_for_last() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::Para)
                .word("first")
                .close()
                .open(NodeKind::Para)
                .word("second")
                .close(),
        );
        assert_eq!(html, "first\n<p>\nsecond");
    }

    #[test]
    fn test_simple_sect_with_label() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::SimpleSect(SimpleSectKind::Warning))
                .open(NodeKind::Para)
                .word("careful")
                .close()
                .close(),
        );
        assert_eq!(
            html,
            "<dl compact><dt><b>Warning:</b></dt><dd>careful</dd></dl>\n"
        );
    }

    #[test]
    fn test_user_simple_sect_uses_title() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::SimpleSect(SimpleSectKind::User))
                .open(NodeKind::Title)
                .word("Custom")
                .close()
                .open(NodeKind::Para)
                .word("body")
                .close()
                .close(),
        );
        assert_eq!(
            html,
            "<dl compact><dt><b>Custom</b></dt><dd>body</dd></dl>\n"
        );
    }

    #[test]
    fn test_section_heading_level_from_depth() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::Section {
                    anchor: "intro".to_owned(),
                    title: "Intro & Scope".to_owned(),
                })
                .open(NodeKind::Section {
                    anchor: "details".to_owned(),
                    title: "Details".to_owned(),
                })
                .close()
                .close(),
        );
        assert_eq!(
            html,
            "<h2><a name=\"intro\"></a>Intro &amp; Scope</h2>\n\
             <h3><a name=\"details\"></a>Details</h3>\n"
        );
    }

    #[test]
    fn test_table() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::HtmlTable)
                .open(NodeKind::HtmlRow)
                .open(NodeKind::HtmlCell { heading: true })
                .word("H")
                .close()
                .close()
                .open(NodeKind::HtmlRow)
                .open(NodeKind::HtmlCell { heading: false })
                .word("D")
                .close()
                .close()
                .open(NodeKind::HtmlCaption)
                .word("cap")
                .close()
                .close(),
        );
        assert_eq!(
            html,
            "<table border=\"1\" cellspacing=\"3\" cellpadding=\"3\">\n\
             <tr>\n<th>H</th></tr>\n\
             <tr>\n<td>D</td></tr>\n\
             <caption align=\"bottom\">cap</caption>\n\
             </table>\n"
        );
    }

    #[test]
    fn test_description_list() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::HtmlDescList)
                .open(NodeKind::HtmlDescTitle)
                .word("term")
                .close()
                .open(NodeKind::HtmlDescData)
                .word("meaning")
                .close()
                .close(),
        );
        assert_eq!(html, "<dl>\n<dt>term</dt>\n<dd>meaning</dd>\n</dl>\n");
    }

    #[test]
    fn test_internal_block() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::Internal)
                .word("secret")
                .close(),
        );
        assert_eq!(
            html,
            "<p><b>For internal use only.</b></p>\n<p>\nsecret</p>\n"
        );
    }

    #[test]
    fn test_header_level_out_of_range_is_fatal() {
        for level in [0, 7] {
            let err = render_err(
                TreeBuilder::new()
                    .open(NodeKind::HtmlHeader(level))
                    .word("x")
                    .close(),
            );
            let RenderError::MalformedTree { reason, .. } = &err else {
                panic!("{level}: expected malformed tree, got {err:?}");
            };
            assert!(reason.contains("1..=6"), "{reason}");
        }
    }

    #[test]
    fn test_accent_letter_must_be_ascii_letter() {
        let err = render_err(TreeBuilder::new().leaf(NodeKind::Symbol {
            kind: SymbolKind::Uml,
            letter: Some('<'),
        }));
        assert!(matches!(err, RenderError::InvalidAccentLetter('<')));
    }

    #[test]
    fn test_href_and_header() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::HtmlHeader(3))
                .word("Title")
                .close()
                .open(NodeKind::HRef("https://x.org/\"q\"".to_owned()))
                .word("site")
                .close(),
        );
        assert_eq!(
            html,
            "<h3>Title</h3>\n<a href=\"https://x.org/&quot;q&quot;\">site</a>"
        );
    }

    #[test]
    fn test_html_image_with_caption() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::Image {
                    kind: ImageKind::Html,
                    name: "img/logo.png".to_owned(),
                })
                .word("Logo")
                .close(),
        );
        assert_eq!(
            html,
            "<div align=\"center\">\n<img src=\"img/logo.png\" alt=\"logo.png\">\n\
             <p><strong>Logo</strong></p></div>\n"
        );
    }

    #[test]
    fn test_html_image_without_caption() {
        let html = render(TreeBuilder::new().open(NodeKind::Image {
            kind: ImageKind::Html,
            name: "dir\\pic.gif".to_owned(),
        }));
        assert_eq!(
            html,
            "<div align=\"center\">\n<img src=\"dir\\pic.gif\" alt=\"pic.gif\">\n</div>\n"
        );
    }

    #[test]
    fn test_dot_file() {
        let tree = TreeBuilder::new()
            .open(NodeKind::DotFile("graphs/flow.dot".to_owned()))
            .word("Flow")
            .close()
            .finish()
            .unwrap();
        let html = HtmlDocRenderer::new()
            .with_diagram_renderer(FixedDiagrams)
            .render(&tree)
            .unwrap();
        assert_eq!(
            html,
            "<div align=\"center\">\n<img src=\"flow.dot.png\" alt=\"flow.dot\">\n\
             <p><strong>Flow</strong></p>\n</div>\n"
        );
    }

    #[test]
    fn test_dot_file_without_renderer_is_fatal() {
        let err = render_err(TreeBuilder::new().open(NodeKind::DotFile("a.dot".to_owned())));
        assert!(matches!(err, RenderError::Diagram { ref path, .. } if path == Path::new("a.dot")));
    }

    #[test]
    fn test_linked_word_resolved() {
        let html = render(TreeBuilder::new().leaf(NodeKind::LinkedWord {
            word: "Foo".to_owned(),
            target: LinkTarget::file("classFoo").with_anchor("a1"),
        }));
        assert_eq!(html, r#"<a class="el" href="classFoo.html#a1">Foo</a>"#);
    }

    #[test]
    fn test_unresolved_link_degrades_to_text() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::Link(LinkTarget::file("x").with_scope("nowhere")))
                .word("label")
                .close()
                .word("after"),
        );
        assert_eq!(html, "labelafter");
    }

    #[test]
    fn test_ref_without_link_text_uses_title() {
        let html = render(TreeBuilder::new().open(NodeKind::Ref {
            target: LinkTarget::file("page").with_anchor("sec"),
            title: "A <Section>".to_owned(),
        }));
        assert_eq!(
            html,
            r#"<a class="el" href="page.html#sec">A &lt;Section&gt;</a> "#
        );
    }

    #[test]
    fn test_ref_with_link_text() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::Ref {
                    target: LinkTarget::file("page"),
                    title: "ignored".to_owned(),
                })
                .word("custom")
                .close(),
        );
        assert_eq!(html, r#"<a class="el" href="page.html">custom</a> "#);
    }

    #[test]
    fn test_internal_ref() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::InternalRef {
                    file: "impl".to_owned(),
                    anchor: "detail".to_owned(),
                })
                .word("impl")
                .close(),
        );
        assert_eq!(html, r#"<a class="el" href="impl.html#detail">impl</a> "#);
    }

    #[test]
    fn test_sec_ref_list() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::SecRefList)
                .open(NodeKind::SecRefItem {
                    file: "page".to_owned(),
                    anchor: "s1".to_owned(),
                })
                .word("One")
                .close()
                .open(NodeKind::SecRefItem {
                    file: "other.html".to_owned(),
                    anchor: "s2".to_owned(),
                })
                .word("Two")
                .close()
                .close(),
        );
        assert_eq!(
            html,
            "<multicol cols=3>\n<ul>\n\
             <li><a href=\"page.html#s1\">One</a> \
             <li><a href=\"other.html#s2\">Two</a> \
             </ul>\n</multicol>\n"
        );
    }

    #[test]
    fn test_xref_item() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::XRefItem {
                    file: "todo".to_owned(),
                    anchor: "_todo000001".to_owned(),
                    title: "Todo".to_owned(),
                })
                .word("fix")
                .close(),
        );
        assert_eq!(
            html,
            "<dl compact><dt><b><a class=\"el\" href=\"todo.html#_todo000001\">Todo:</a></b></dt>\
             <dd>fix</dd></dl>\n"
        );
    }

    #[test]
    fn test_param_section() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::ParamSect(ParamSectKind::Param))
                .open(NodeKind::ParamList(vec!["x".to_owned()]))
                .open(NodeKind::Para)
                .word("first")
                .close()
                .open(NodeKind::Para)
                .word("more")
                .close()
                .close()
                .close(),
        );
        assert_eq!(
            html,
            "<dl compact><dt><b>Parameters:</b></dt><dd>\n\
             \x20 <table border=\"0\" cellspacing=\"2\" cellpadding=\"0\">\n\
             \x20   <tr><td valign=top><em>x</em>&nbsp;</td><td>firstmore</td></tr>\n\
             \x20 </table>\n</dl>\n"
        );
    }

    #[test]
    fn test_unknown_param_section_is_fatal() {
        let err = render_err(TreeBuilder::new().open(NodeKind::ParamSect(ParamSectKind::Unknown)));
        assert!(matches!(err, RenderError::UnknownParamSection));
    }

    #[test]
    fn test_language_and_copy_are_transparent() {
        let html = render(
            TreeBuilder::new()
                .open(NodeKind::Language("de".to_owned()))
                .word("Hallo")
                .close()
                .open(NodeKind::Copy)
                .word("copied")
                .close(),
        );
        assert_eq!(html, "Hallocopied");
    }

    #[test]
    fn test_index_entry_suppressed() {
        let html = render(
            TreeBuilder::new()
                .word("before")
                .open(NodeKind::IndexEntry)
                .word("hidden")
                .leaf(NodeKind::LineBreak)
                .close()
                .word("after"),
        );
        assert_eq!(html, "beforeafter");
    }

    #[test]
    fn test_renderer_is_reusable() {
        let tree = TreeBuilder::new()
            .open(NodeKind::HtmlPre)
            .leaf(NodeKind::WhiteSpace("  ".to_owned()))
            .close()
            .finish()
            .unwrap();
        let mut renderer = HtmlDocRenderer::new();
        let first = renderer.render(&tree).unwrap();
        let second = renderer.render(&tree).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_into_appends() {
        let tree = TreeBuilder::new().word("x").finish().unwrap();
        let mut out = String::from("<body>");
        HtmlDocRenderer::new().render_into(&tree, &mut out).unwrap();
        assert_eq!(out, "<body>x");
    }
}

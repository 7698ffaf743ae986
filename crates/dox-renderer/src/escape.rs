//! Escaping and symbol table for HTML output.

use std::borrow::Cow;

use dox_tree::SymbolKind;

use crate::error::RenderError;

/// Escape the characters that are structurally significant in HTML.
///
/// Replaces `&`, `<`, `>` and `"`. Borrows the input when nothing needs escaping.
/// Must be applied exactly once, at the point of emission.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Map a symbol code to its HTML literal.
///
/// Accent marks are entity templates around `letter` (`&auml;`, `&Ccedil;`).
/// Unknown codes, and accents without an ASCII letter, are contract violations.
///
/// # Example
///
/// ```
/// use dox_renderer::render_symbol;
/// use dox_tree::SymbolKind;
///
/// assert_eq!(render_symbol(&SymbolKind::Copy, None).unwrap(), "&copy;");
/// assert_eq!(render_symbol(&SymbolKind::Uml, Some('o')).unwrap(), "&ouml;");
/// ```
pub fn render_symbol(
    kind: &SymbolKind,
    letter: Option<char>,
) -> Result<Cow<'static, str>, RenderError> {
    let fixed = match kind {
        SymbolKind::BSlash => "\\",
        SymbolKind::At => "@",
        SymbolKind::Less => "&lt;",
        SymbolKind::Greater => "&gt;",
        SymbolKind::Amp => "&amp;",
        SymbolKind::Dollar => "$",
        SymbolKind::Hash => "#",
        SymbolKind::Percent => "%",
        SymbolKind::Copy => "&copy;",
        SymbolKind::Apos => "'",
        SymbolKind::Quot => "\"",
        SymbolKind::Szlig => "&szlig;",
        SymbolKind::Nbsp => "&nbsp;",
        SymbolKind::Uml => return accent(letter, "uml"),
        SymbolKind::Acute => return accent(letter, "acute"),
        SymbolKind::Grave => return accent(letter, "grave"),
        SymbolKind::Circ => return accent(letter, "circ"),
        SymbolKind::Tilde => return accent(letter, "tilde"),
        SymbolKind::Cedil => return accent(letter, "cedil"),
        SymbolKind::Ring => return accent(letter, "ring"),
        SymbolKind::Unknown(code) => return Err(RenderError::UnknownSymbol(code.clone())),
    };
    Ok(Cow::Borrowed(fixed))
}

fn accent(letter: Option<char>, mark: &'static str) -> Result<Cow<'static, str>, RenderError> {
    let letter = letter.ok_or(RenderError::MissingAccentLetter(mark))?;
    if !letter.is_ascii_alphabetic() {
        return Err(RenderError::InvalidAccentLetter(letter));
    }
    Ok(Cow::Owned(format!("&{letter}{mark};")))
}

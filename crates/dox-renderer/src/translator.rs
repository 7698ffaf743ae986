//! English heading labels.

use crate::delegate::{Label, Translator};

/// [`Translator`] producing English headings.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishTranslator;

impl Translator for EnglishTranslator {
    fn label(&self, label: Label) -> String {
        let text = match label {
            Label::SeeAlso => "See also",
            Label::Returns => "Returns",
            Label::Author => "Author",
            Label::Authors => "Authors",
            Label::Version => "Version",
            Label::Since => "Since",
            Label::Date => "Date",
            Label::Note => "Note",
            Label::Warning => "Warning",
            Label::Precondition => "Precondition",
            Label::Postcondition => "Postcondition",
            Label::Invariant => "Invariant",
            Label::Remarks => "Remarks",
            Label::Attention => "Attention",
            Label::Parameters => "Parameters",
            Label::ReturnValues => "Return values",
            Label::Exceptions => "Exceptions",
            Label::InternalUseOnly => "For internal use only.",
        };
        text.to_owned()
    }
}

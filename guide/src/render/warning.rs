use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

use crate::inline::Construct;

/// What went wrong in a document. Conversion carries on either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// A body line ended inside a link or emphasis span.
    Unterminated(Construct),
    /// A second document mapped to an existing node name.
    DuplicateNode(String),
}

impl WarningKind {
    /// What the converter did about it.
    pub fn note(&self) -> String {
        match self {
            WarningKind::Unterminated(Construct::Link) => {
                "the partial link markup is kept as written".to_string()
            }
            WarningKind::Unterminated(construct) => {
                format!("the {} span is closed at the end of the line", construct)
            }
            WarningKind::DuplicateNode(_) => {
                "the title is replaced and the body is appended to the existing node".to_string()
            }
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::Unterminated(construct) => write!(f, "unterminated {}", construct),
            WarningKind::DuplicateNode(name) => {
                write!(f, "node {} is defined by more than one document", name)
            }
        }
    }
}

/// A [`WarningKind`] located in a source document.
///
/// `span` is a byte range into the text of document `file_id`: the offending
/// body line, or the title for a duplicate node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderWarning {
    pub kind: WarningKind,
    pub span: Range<usize>,
    pub file_id: usize,
}

impl RenderWarning {
    pub fn new(kind: WarningKind, span: Range<usize>, file_id: usize) -> Self {
        RenderWarning { kind, span, file_id }
    }

    /// Label the span with the kind and attach the recovery as a note.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::new(Severity::Warning)
            .with_message(self.kind.to_string())
            .with_labels(vec![Label::primary(self.file_id, self.span.clone())])
            .with_notes(vec![self.kind.note()])
    }
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

pub mod lines;
pub mod warning;

pub use lines::{SplitDocument, lines, split_document};
pub use warning::{RenderWarning, WarningKind};

use crate::database::node::Node;
use crate::database::paragraph::StyledSpan;
use crate::database::style::HeadingLevel;
use crate::inline::transform_line;
use crate::sanitize::sanitize;

/// How a single sanitized body line is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Heading(HeadingLevel, &'a str),
    /// Indented by two spaces directly after a blank line.
    Code,
    Text,
}

/// Classify a sanitized line. Headings win over code, code over text.
pub fn classify(line: &str, previous_blank: bool) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if let Some((level, rest)) = HeadingLevel::classify(line) {
        return LineKind::Heading(level, rest.trim());
    }
    if previous_blank && line.starts_with("  ") {
        return LineKind::Code;
    }
    LineKind::Text
}

/// Renders one source document into a node.
pub struct Renderer<'a> {
    source: &'a str,
    file_id: usize,
}

// ---------------------------------------------------------------------------
// Render state
// ---------------------------------------------------------------------------

struct RenderState {
    /// The current paragraph has received something.
    has_content: bool,
    in_code: bool,
    /// Starts true so a code line may open the body.
    previous_blank: bool,
}

impl<'a> Renderer<'a> {
    pub fn new(source: &'a str, file_id: usize) -> Self {
        Renderer { source, file_id }
    }

    /// The title line of the document.
    pub fn title(&self) -> &'a str {
        split_document(self.source).title
    }

    /// Byte span of the title line, for diagnostics about the whole document.
    pub fn title_span(&self) -> std::ops::Range<usize> {
        let doc = split_document(self.source);
        doc.title_offset..doc.title_offset + doc.title.len()
    }

    /// Set the node's title and append the body as paragraphs.
    ///
    /// Rendering into a node that already has content appends after it.
    pub fn render(&self, node: &mut Node) -> Vec<RenderWarning> {
        let doc = split_document(self.source);
        let mut warnings = Vec::new();

        node.title = doc.title.to_string();
        node.paragraph();

        let mut state = RenderState {
            has_content: false,
            in_code: false,
            previous_blank: true,
        };

        for (offset, raw) in lines(doc.body) {
            let line = sanitize(raw);
            let start = doc.body_offset + offset;
            let span = start..start + raw.len();

            match classify(&line, state.previous_blank) {
                LineKind::Blank => {
                    node.current().emit("\n");
                    state.has_content = true;
                    state.previous_blank = true;
                }
                LineKind::Heading(level, text) => {
                    if state.has_content {
                        node.paragraph();
                    }
                    node.current().span(StyledSpan::heading(text, level));
                    node.paragraph();
                    state.has_content = false;
                    state.previous_blank = false;
                }
                LineKind::Code => {
                    if state.has_content {
                        node.paragraph();
                    }
                    node.current().span(StyledSpan::code(line.as_str()));
                    state.has_content = true;
                    state.in_code = true;
                    // previous_blank stays set: every following indented
                    // line is a code line in a paragraph of its own.
                }
                LineKind::Text => {
                    if state.in_code {
                        node.paragraph();
                        state.in_code = false;
                    }

                    let (text, open) = transform_line(&line);
                    for construct in open {
                        warnings.push(RenderWarning::new(
                            WarningKind::Unterminated(construct),
                            span.clone(),
                            self.file_id,
                        ));
                    }

                    let paragraph = node.current();
                    paragraph.emit(text);
                    paragraph.emit("\n");
                    state.has_content = true;
                    state.previous_blank = false;
                }
            }
        }

        warnings
    }
}

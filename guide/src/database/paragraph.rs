use crate::database::style::{CODE_COLOUR, Colour, HeadingLevel, Presentation};

/// A run of text drawn with its own pens and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub foreground: Option<Colour>,
    pub background: Option<Colour>,
    pub presentation: Presentation,
}

impl StyledSpan {
    pub fn heading(text: impl Into<String>, level: HeadingLevel) -> Self {
        StyledSpan {
            text: text.into(),
            foreground: None,
            background: None,
            presentation: level.presentation(),
        }
    }

    pub fn code(text: impl Into<String>) -> Self {
        StyledSpan {
            text: text.into(),
            foreground: Some(CODE_COLOUR),
            background: None,
            presentation: Presentation::PLAIN,
        }
    }

    /// The heading level this span was built for, if any.
    pub fn heading_level(&self) -> Option<HeadingLevel> {
        if self.foreground.is_some() || self.background.is_some() {
            return None;
        }
        HeadingLevel::ALL
            .into_iter()
            .find(|level| level.presentation() == self.presentation)
    }

    pub fn is_code(&self) -> bool {
        self.foreground == Some(CODE_COLOUR) && self.presentation.is_plain()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Already-escaped guide text, copied to the output as is.
    Text(String),
    Span(StyledSpan),
}

impl Fragment {
    /// The visible text of the fragment, without any styling.
    pub fn text(&self) -> &str {
        match self {
            Fragment::Text(text) => text,
            Fragment::Span(span) => &span.text,
        }
    }
}

/// One layout unit of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub fragments: Vec<Fragment>,
}

impl Paragraph {
    pub fn new() -> Self {
        Paragraph::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn emit(&mut self, text: impl Into<String>) {
        self.fragments.push(Fragment::Text(text.into()));
    }

    pub fn span(&mut self, span: StyledSpan) {
        self.fragments.push(Fragment::Span(span));
    }

    /// Concatenated visible text of every fragment.
    pub fn plain_text(&self) -> String {
        self.fragments.iter().map(Fragment::text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_roles() {
        let code = StyledSpan::code("  let x = 1;");
        assert!(code.is_code());
        assert_eq!(code.heading_level(), None);

        for level in HeadingLevel::ALL {
            let heading = StyledSpan::heading("Title", level);
            assert_eq!(heading.heading_level(), Some(level));
            assert!(!heading.is_code());
        }
    }

    #[test]
    fn plain_text_concatenates() {
        let mut p = Paragraph::new();
        assert!(p.is_empty());
        p.emit("one ");
        p.span(StyledSpan::code("two"));
        p.emit("\n");
        assert_eq!(p.plain_text(), "one two\n");
    }
}

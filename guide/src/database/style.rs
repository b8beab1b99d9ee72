use std::fmt;

/// The named pens a guide viewer knows how to draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Text,
    Shine,
    Shadow,
    Fill,
    FillText,
    Background,
    Highlight,
}

impl Colour {
    pub fn keyword(self) -> &'static str {
        match self {
            Colour::Text => "text",
            Colour::Shine => "shine",
            Colour::Shadow => "shadow",
            Colour::Fill => "fill",
            Colour::FillText => "filltext",
            Colour::Background => "background",
            Colour::Highlight => "highlighttext",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Foreground pen used for verbatim code lines.
pub const CODE_COLOUR: Colour = Colour::Fill;

/// The three independent text attributes of a styled span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Presentation {
    pub const PLAIN: Presentation = Presentation {
        bold: false,
        italic: false,
        underline: false,
    };

    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }
}

/// Heading levels, `#` through `####`. Level 1 is the most prominent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 4] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
    ];

    /// The line prefix that introduces this heading, trailing space included.
    pub fn marker(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "# ",
            HeadingLevel::H2 => "## ",
            HeadingLevel::H3 => "### ",
            HeadingLevel::H4 => "#### ",
        }
    }

    pub fn presentation(self) -> Presentation {
        let (bold, italic, underline) = match self {
            HeadingLevel::H1 => (true, true, true),
            HeadingLevel::H2 => (true, false, true),
            HeadingLevel::H3 => (false, false, true),
            HeadingLevel::H4 => (false, true, false),
        };
        Presentation {
            bold,
            italic,
            underline,
        }
    }

    /// Match a sanitized line against the heading markers.
    pub fn classify(line: &str) -> Option<(HeadingLevel, &str)> {
        Self::ALL
            .into_iter()
            .find_map(|level| line.strip_prefix(level.marker()).map(|rest| (level, rest)))
    }
}

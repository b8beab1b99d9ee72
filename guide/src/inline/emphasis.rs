use crate::inline::{Construct, ESCAPE_MARKER, Transformed};

/// A single-character emphasis convention and the markup it turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emphasis {
    pub construct: Construct,
    pub delimiter: char,
    pub start: &'static str,
    pub end: &'static str,
}

/// `_text_` becomes underlined.
pub const UNDERLINE: Emphasis = Emphasis {
    construct: Construct::Underline,
    delimiter: '_',
    start: "@{u}",
    end: "@{uu}",
};

/// `*text*` becomes bold.
pub const STRONG: Emphasis = Emphasis {
    construct: Construct::Strong,
    delimiter: '*',
    start: "@{b}",
    end: "@{ub}",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanState {
    Closed,
    Open,
}

impl Emphasis {
    /// Rewrite every delimited span on the line into start/end markup.
    ///
    /// A span only opens on a delimiter at the start of the line or right
    /// after a space; any delimiter closes an open span. A span still open at
    /// the end of the line is closed there.
    pub fn apply(&self, line: &str) -> Transformed {
        let mut text = String::with_capacity(line.len() + 8);
        let mut state = SpanState::Closed;
        let mut after_space = true;
        let mut escape_next = false;

        for ch in line.chars() {
            if ch == ESCAPE_MARKER {
                escape_next = true;
                continue;
            }

            if escape_next {
                if ch != self.delimiter {
                    text.push(ESCAPE_MARKER);
                }
                text.push(ch);
                escape_next = false;
                continue;
            }

            if ch == self.delimiter {
                match state {
                    SpanState::Closed if after_space => {
                        text.push_str(self.start);
                        state = SpanState::Open;
                    }
                    SpanState::Open => {
                        text.push_str(self.end);
                        state = SpanState::Closed;
                    }
                    SpanState::Closed => text.push(ch),
                }
                after_space = false;
                continue;
            }

            text.push(ch);
            after_space = ch == ' ';
        }

        let unterminated = state == SpanState::Open;
        if unterminated {
            text.push_str(self.end);
        }

        Transformed { text, unterminated }
    }
}

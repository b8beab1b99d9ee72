use std::fmt;

pub mod emphasis;
pub mod link;

pub use emphasis::{Emphasis, STRONG, UNDERLINE};
pub use link::link;

/// Character that suppresses the special meaning of the one after it.
pub const ESCAPE_MARKER: char = '^';

/// An inline construct that can be left open at the end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Link,
    Underline,
    Strong,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Construct::Link => "link",
            Construct::Underline => "underline",
            Construct::Strong => "strong",
        })
    }
}

/// Output of a single inline pass over one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub text: String,
    /// The line ended while a construct was still open.
    pub unterminated: bool,
}

/// Run the inline passes over a sanitized body line in their fixed order:
/// links, then underline, then strong.
///
/// Returns the rewritten line and the constructs that were left open at the
/// end of the line.
pub fn transform_line(line: &str) -> (String, Vec<Construct>) {
    let mut open = Vec::new();

    let linked = link(line);
    if linked.unterminated {
        open.push(Construct::Link);
    }

    let mut text = linked.text;
    for emphasis in [UNDERLINE, STRONG] {
        let pass = emphasis.apply(&text);
        if pass.unterminated {
            open.push(emphasis.construct);
        }
        text = pass.text;
    }

    (text, open)
}

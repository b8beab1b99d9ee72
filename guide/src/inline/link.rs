use crate::inline::{ESCAPE_MARKER, Transformed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    Outside,
    Label,
    Target,
}

/// Rewrite `[label](target)` into a guide cross-reference,
/// `@{"label" LINK target}`.
///
/// A link only opens on a `[` at the start of the line or after a space.
/// Partial links are not repaired: whatever was emitted before the end of the
/// line stays as it is.
pub fn link(line: &str) -> Transformed {
    let mut text = String::with_capacity(line.len() + 16);
    let mut state = LinkState::Outside;
    let mut after_space = true;
    let mut escape_next = false;

    for ch in line.chars() {
        if ch == ESCAPE_MARKER {
            escape_next = true;
            continue;
        }

        if escape_next {
            if ch != '[' {
                text.push(ESCAPE_MARKER);
            }
            text.push(ch);
            escape_next = false;
            continue;
        }

        match (state, ch) {
            (LinkState::Outside, '[') if after_space => {
                text.push_str("@{\"");
                state = LinkState::Label;
                after_space = true;
            }
            (LinkState::Label, ']') => {
                text.push_str("\" LINK ");
                state = LinkState::Target;
            }
            (LinkState::Target, '(') => {}
            (LinkState::Target, ')') => {
                text.push('}');
                state = LinkState::Outside;
            }
            _ => {
                text.push(ch);
                after_space = ch == ' ';
            }
        }
    }

    Transformed {
        text,
        unterminated: state != LinkState::Outside,
    }
}

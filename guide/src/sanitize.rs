/// Escape a single line of raw text for the guide format.
///
/// `@` and `\` are escaped with a backslash. Control characters and anything
/// outside 7-bit ASCII are dropped; the guide format has no way to carry them.
pub fn sanitize(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '@' => out.push_str("\\@"),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => {}
            c if !c.is_ascii() => {}
            c => out.push(c),
        }
    }
    out
}

/// Clean a node title for use inside the quoted `@node` header.
///
/// Titles live in a command line, not in body text, so `@` and `\` are left
/// alone. Double quotes would terminate the title and become single quotes.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii() && !c.is_control())
        .map(|c| if c == '"' { '\'' } else { c })
        .collect()
}

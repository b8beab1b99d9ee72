/// A document split into its title line and its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    pub title: &'a str,
    /// Byte span of the title line in the source.
    pub title_offset: usize,
    pub body: &'a str,
    /// Byte offset of `body` in the source.
    pub body_offset: usize,
}

/// Split a document at its first line break. Both halves are trimmed.
///
/// Text without a line break is all title and has an empty body.
pub fn split_document(source: &str) -> SplitDocument<'_> {
    let (head, rest, rest_offset) = match source.find('\n') {
        Some(nl) => (&source[..nl], &source[nl + 1..], nl + 1),
        None => (source, "", source.len()),
    };

    let title = head.trim();
    let title_offset = head.len() - head.trim_start().len();

    let body = rest.trim();
    let body_offset = if body.is_empty() {
        rest_offset
    } else {
        rest_offset + (rest.len() - rest.trim_start().len())
    };

    SplitDocument {
        title,
        title_offset,
        body,
        body_offset,
    }
}

/// Split text into lines at `\n`, `\r\n` or a lone `\r`, yielding each line
/// with its byte offset. A final terminator does not produce an empty line,
/// and empty text has no lines at all.
pub fn lines(text: &str) -> Vec<(usize, &str)> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                out.push((start, &text[start..i]));
                i += 1;
                start = i;
            }
            b'\r' => {
                out.push((start, &text[start..i]));
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }

    if start < bytes.len() {
        out.push((start, &text[start..]));
    }
    out
}

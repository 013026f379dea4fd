// # Document Implementations
//
// Implementations of the Document trait: a markdown file on disk and an
// in-memory buffer. Both share the line-editing rules below.

pub mod file;
pub mod memory;

pub use file::FileDocument;
pub use memory::MemoryDocument;

use crate::Error;

/// Rewrite `text` to use the line ending of `content`
///
/// Returns the converted text and whether `content` uses CRLF.
fn match_line_ending(content: &str, text: &str) -> (String, bool) {
    let crlf = content.contains("\r\n");
    let text = text.replace("\r\n", "\n");
    if crlf {
        (text.replace('\n', "\r\n"), true)
    } else {
        (text, false)
    }
}

/// Insert `text` so it becomes line `line` of `content`
///
/// Lines are split on '\n'; `line` may equal the line count to append.
/// `text` may span several lines. New lines take the ending `content` uses.
pub(crate) fn insert_line(content: &str, line: usize, text: &str) -> Result<String, Error> {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    if line > lines.len() {
        return Err(Error::document(format!(
            "Cannot insert at line {}: document has {} line(s)",
            line,
            lines.len()
        )));
    }

    let (mut text, crlf) = match_line_ending(content, text);
    if crlf {
        if line < lines.len() {
            text.push('\r');
        } else if let Some(last) = lines.last_mut()
            && !last.ends_with('\r')
        {
            // Appending: the old last line now needs an ending
            last.push('\r');
        }
    }

    lines.insert(line, text);
    Ok(lines.join("\n"))
}

/// Overwrite line `line` of `content` with `text`
///
/// The replaced line keeps its `\r` if it had one.
pub(crate) fn replace_line(content: &str, line: usize, text: &str) -> Result<String, Error> {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    let slot = lines.get_mut(line).ok_or_else(|| {
        Error::document(format!("Cannot replace line {}: document is shorter", line))
    })?;

    let (mut text, _) = match_line_ending(content, text);
    if slot.ends_with('\r') {
        text.push('\r');
    }
    *slot = text;
    Ok(lines.join("\n"))
}

//! Response-to-document update
//!
//! After a successful publish the server may answer with `{"path": "..."}`.
//! That value is written into the document's leading metadata block as a
//! `path: <value>` line:
//!
//! - block present with a `path:` key: that line is overwritten
//! - block present without one: the line is inserted as the second line
//! - no block: a new `---` / `path: ...` / `---` block is put at the top
//!
//! Overwriting an existing key keeps repeated publishes from piling up
//! duplicate `path:` lines.

use tracing::debug;

use crate::dispatch::PublishResponse;
use crate::error::{Error, Result};
use crate::traits::Document;

/// Marker line opening and closing the metadata block
const BLOCK_MARKER: &str = "---";

/// Metadata key written back from the server response
const PATH_KEY: &str = "path:";

/// Line edit needed to record a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathEdit {
    /// The block already contains exactly this line
    Unchanged,
    /// Overwrite the existing `path:` line at this index
    Replace { line: usize },
    /// Insert a new line at this index
    Insert { line: usize },
    /// The document has no metadata block; create one at the top
    InsertBlock,
}

/// What happened to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The response carried no path; the document was left alone
    NoPath,
    /// The path was already recorded
    Unchanged,
    /// An existing `path:` line was overwritten
    Replaced,
    /// A `path:` line was added to the existing block
    Inserted,
    /// A metadata block holding the path was created
    BlockCreated,
}

/// Format the metadata line for `path`
pub fn path_line(path: &str) -> String {
    format!("{} {}", PATH_KEY, path)
}

/// Index of the closing marker, if `text` opens with a metadata block
fn block_end(lines: &[&str]) -> Option<usize> {
    if lines.first().map(|l| l.trim_end()) != Some(BLOCK_MARKER) {
        return None;
    }
    lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, l)| l.trim_end() == BLOCK_MARKER)
        .map(|(i, _)| i)
}

/// Decide which edit records `path` in `text`
pub fn plan_path_update(text: &str, path: &str) -> PathEdit {
    let lines: Vec<&str> = text.split('\n').collect();

    let Some(end) = block_end(&lines) else {
        return PathEdit::InsertBlock;
    };

    let wanted = path_line(path);
    match (1..end).find(|&i| lines[i].starts_with(PATH_KEY)) {
        Some(i) if lines[i].trim_end() == wanted => PathEdit::Unchanged,
        Some(i) => PathEdit::Replace { line: i },
        None => PathEdit::Insert { line: 1 },
    }
}

/// Write the server-supplied path into `document`
///
/// Any failure reading or editing the document is reported as
/// `Error::Update`; the request itself has already gone through by then.
pub async fn apply_response(
    document: &dyn Document,
    response: &PublishResponse,
) -> Result<UpdateOutcome> {
    let Some(path) = response.path.as_deref() else {
        debug!("Response for {} carried no path", document.id());
        return Ok(UpdateOutcome::NoPath);
    };

    apply_path(document, path)
        .await
        .map_err(|e| Error::update(format!("{}: {}", document.id(), e)))
}

async fn apply_path(document: &dyn Document, path: &str) -> Result<UpdateOutcome> {
    let text = document.read().await?;
    let line = path_line(path);

    let outcome = match plan_path_update(&text, path) {
        PathEdit::Unchanged => UpdateOutcome::Unchanged,
        PathEdit::Replace { line: index } => {
            document.replace_line(index, &line).await?;
            UpdateOutcome::Replaced
        }
        PathEdit::Insert { line: index } => {
            document.insert_line(index, &line).await?;
            UpdateOutcome::Inserted
        }
        PathEdit::InsertBlock => {
            // One edit, so a failed write never leaves a lone opening marker
            let block = format!("{}\n{}\n{}", BLOCK_MARKER, line, BLOCK_MARKER);
            document.insert_line(0, &block).await?;
            UpdateOutcome::BlockCreated
        }
    };

    debug!("Recorded path {} in {}: {:?}", path, document.id(), outcome);
    Ok(outcome)
}

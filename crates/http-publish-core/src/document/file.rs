// # File Document
//
// A markdown file on disk. Every edit re-reads the file, applies one line
// change and writes it back through a temp file + rename, so a crash never
// leaves a half-written note.
//
// The path is resolved once on open: edits through a symlink land in the
// target file and the link stays in place. The temp file takes the
// original's permissions before the rename.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::Error;
use crate::traits::Document;

/// Markdown file document
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
    id: String,
}

impl FileDocument {
    /// Open the document at `path`
    ///
    /// Fails if the path does not point at an existing file. The id keeps
    /// the path as given; edits go to the resolved file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let given = path.as_ref();
        if !given.is_file() {
            return Err(Error::document(format!(
                "No such document: {}",
                given.display()
            )));
        }
        let path = std::fs::canonicalize(given).map_err(|e| {
            Error::document(format!("Failed to resolve {}: {}", given.display(), e))
        })?;
        let id = given.display().to_string();
        Ok(Self { path, id })
    }

    /// Resolved path of the file being edited
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn rewrite(&self, edit: impl FnOnce(&str) -> Result<String, Error>) -> Result<(), Error> {
        let content = self.read().await?;
        let updated = edit(&content)?;

        let permissions = fs::metadata(&self.path)
            .await
            .map_err(|e| {
                Error::document(format!("Failed to stat {}: {}", self.path.display(), e))
            })?
            .permissions();

        let mut temp = self.path.clone();
        temp.set_extension("publish.tmp");

        fs::write(&temp, updated.as_bytes()).await.map_err(|e| {
            Error::document(format!("Failed to write {}: {}", temp.display(), e))
        })?;

        if let Err(e) = fs::set_permissions(&temp, permissions).await {
            let _ = fs::remove_file(&temp).await;
            return Err(Error::document(format!(
                "Failed to set permissions on {}: {}",
                temp.display(),
                e
            )));
        }

        fs::rename(&temp, &self.path).await.map_err(|e| {
            Error::document(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!("Rewrote document: {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl Document for FileDocument {
    fn id(&self) -> &str {
        &self.id
    }

    async fn read(&self) -> Result<String, Error> {
        fs::read_to_string(&self.path).await.map_err(|e| {
            Error::document(format!("Failed to read {}: {}", self.path.display(), e))
        })
    }

    async fn insert_line(&self, line: usize, text: &str) -> Result<(), Error> {
        self.rewrite(|content| super::insert_line(content, line, text))
            .await
    }

    async fn replace_line(&self, line: usize, text: &str) -> Result<(), Error> {
        self.rewrite(|content| super::replace_line(content, line, text))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_document_edits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "---\ntitle: t\n---\nbody\n").await.unwrap();

        let doc = FileDocument::open(&path).unwrap();
        doc.insert_line(1, "path: a.md").await.unwrap();
        doc.replace_line(1, "path: b.md").await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "---\npath: b.md\ntitle: t\n---\nbody\n");
        assert!(!dir.path().join("note.publish.tmp").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_edits_follow_symlink() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real.md");
        let link = dir.path().join("link.md");
        fs::write(&real, "---\ntitle: t\n---\nbody").await.unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let doc = FileDocument::open(&link).unwrap();
        assert_eq!(doc.id(), link.display().to_string());
        doc.insert_line(1, "path: a.md").await.unwrap();

        let link_meta = fs::symlink_metadata(&link).await.unwrap();
        assert!(link_meta.file_type().is_symlink());
        assert_eq!(
            fs::read_to_string(&real).await.unwrap(),
            "---\npath: a.md\ntitle: t\n---\nbody"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_edits_keep_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "body").await.unwrap();
        fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
            .await
            .unwrap();

        let doc = FileDocument::open(&path).unwrap();
        doc.insert_line(0, "---\npath: a.md\n---").await.unwrap();

        let mode = fs::metadata(&path).await.unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(
            fs::read_to_string(&path).await.unwrap(),
            "---\npath: a.md\n---\nbody"
        );
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let err = FileDocument::open(dir.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, Error::Document(_)));
    }
}

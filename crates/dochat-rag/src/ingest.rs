//! Filesystem document ingestor

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::warn;

use dochat_core::{Document, Error, Ingestor, Result};

/// Loads every file under a root directory matching a glob pattern.
///
/// Unreadable files (permissions, non-UTF-8 content) are skipped with a
/// warning rather than aborting the load; partial ingestion is treated as
/// degraded-but-available.
pub struct FsIngestor {
    root: PathBuf,
    pattern: String,
}

impl FsIngestor {
    pub const DEFAULT_PATTERN: &'static str = "**/*";

    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            pattern: pattern.into(),
        }
    }

    /// Ingestor over all files under `root`, recursively.
    pub fn all_files(root: impl Into<PathBuf>) -> Self {
        Self::new(root, Self::DEFAULT_PATTERN)
    }
}

#[async_trait]
impl Ingestor for FsIngestor {
    async fn load(&self) -> Result<Vec<Document>> {
        let pattern = self.root.join(&self.pattern);
        let pattern = pattern
            .to_str()
            .ok_or_else(|| Error::Configuration("root path is not valid UTF-8".to_string()))?;

        let paths = glob::glob(pattern)
            .map_err(|e| Error::Configuration(format!("invalid glob pattern: {}", e)))?;

        let mut documents = Vec::new();

        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable path");
                    continue;
                }
            };

            if !path.is_file() {
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(content) => documents.push(Document::new(content, path)),
                Err(e) => {
                    let err = Error::Ingestion(format!("{}: {}", path.display(), e));
                    warn!(error = %err, "skipping unreadable file");
                }
            }
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &std::path::Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[tokio::test]
    async fn loads_all_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", "The sky is blue.");
        fs::create_dir(dir.path().join("nested")).unwrap();
        write(&dir.path().join("nested"), "b.txt", "Grass is green.");

        let ingestor = FsIngestor::all_files(dir.path());
        let mut docs = ingestor.load().await.unwrap();
        docs.sort_by(|a, b| a.source.cmp(&b.source));

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].content, "The sky is blue.");
        assert_eq!(docs[1].content, "Grass is green.");
    }

    #[tokio::test]
    async fn glob_pattern_filters_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "keep.md", "kept");
        write(dir.path(), "skip.txt", "skipped");

        let ingestor = FsIngestor::new(dir.path(), "**/*.md");
        let docs = ingestor.load().await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "kept");
    }

    #[tokio::test]
    async fn non_utf8_files_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.txt", "readable");
        fs::write(dir.path().join("bad.bin"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();

        let ingestor = FsIngestor::all_files(dir.path());
        let docs = ingestor.load().await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "readable");
    }

    #[tokio::test]
    async fn missing_directory_yields_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let ingestor = FsIngestor::all_files(dir.path().join("does-not-exist"));
        let docs = ingestor.load().await.unwrap();
        assert!(docs.is_empty());
    }
}

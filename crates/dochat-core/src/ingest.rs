//! Document ingestor trait

use async_trait::async_trait;

use crate::{Document, Result};

/// Trait for document ingestors.
///
/// An ingestor produces the raw documents fed into the indexing pipeline.
/// The filesystem ingestor is the primary implementation; test doubles can
/// serve documents from memory.
#[async_trait]
pub trait Ingestor: Send + Sync {
    /// Load all available documents.
    ///
    /// Per-document load failures should be skipped with a logged warning
    /// rather than aborting the whole load; only a failure to enumerate the
    /// source at all is an error.
    async fn load(&self) -> Result<Vec<Document>>;
}

use crate::model::TemplateRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write output file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait]
pub trait CatalogWriter: Send + Sync {
    /// Short description of where the catalog goes (e.g., a file path).
    fn destination(&self) -> String;

    /// Persists the full catalog, replacing whatever was there before.
    async fn write(&self, templates: &[TemplateRecord]) -> Result<(), WriteError>;
}

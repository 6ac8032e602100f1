use crate::model::TemplateRecord;
use crate::traits::{CatalogWriter, WriteError};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Writes the catalog as a JSON array to a file.
#[derive(Debug, Clone)]
pub struct JsonFileWriter {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: false,
        }
    }

    /// Two-space indented output instead of compact.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn render(&self, templates: &[TemplateRecord]) -> Result<Vec<u8>, WriteError> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(templates)?
        } else {
            serde_json::to_vec(templates)?
        };
        Ok(bytes)
    }
}

#[async_trait]
impl CatalogWriter for JsonFileWriter {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self, templates), fields(path = %self.path.display()))]
    async fn write(&self, templates: &[TemplateRecord]) -> Result<(), WriteError> {
        let bytes = self.render(templates)?;
        tokio::fs::write(&self.path, &bytes)
            .await
            .map_err(|source| WriteError::Io {
                path: self.path.clone(),
                source,
            })?;

        info!(templates = templates.len(), bytes = bytes.len(), "Catalog written");
        Ok(())
    }
}

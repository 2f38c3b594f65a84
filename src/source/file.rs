use crate::model::SourceError;
use crate::source::traits::DataSource;
use std::path::PathBuf;
use tracing::info;

/// Reads a listing CSV written by the crawler/preprocessor.
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[async_trait::async_trait]
impl DataSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        info!("Reading {} from {}", self.name, self.path.display());
        let bytes = tokio::fs::read(&self.path).await?;
        // The preprocessor writes utf-8 with a BOM.
        let text = String::from_utf8_lossy(&bytes);
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

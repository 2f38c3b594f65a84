use crate::model::SourceError;

/// Where a listing blob comes from. Every read returns the whole blob at once.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch(&self) -> Result<String, SourceError>;
}

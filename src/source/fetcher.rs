use crate::model::SourceError;
use crate::source::traits::DataSource;

use reqwest::Client;
use tracing::info;

/// Downloads a listing CSV, e.g. from the crawler's static `/data` endpoint.
pub struct HttpSource {
    name: String,
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, client: Client) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            client,
        }
    }

    pub fn build_client(timeout_secs: u64) -> Result<Client, SourceError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) RentLens/0.1")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(client)
    }
}

#[async_trait::async_trait]
impl DataSource for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        info!("Fetching {} from {}", self.name, self.url);
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::InvalidResponse(response.status().as_u16()));
        }

        let body = response.text().await?;
        Ok(body.trim_start_matches('\u{feff}').to_string())
    }
}

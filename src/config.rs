use crate::model::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// District scope such as `"天河区"`; city scope when absent.
    #[serde(default)]
    pub district: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub sources: Vec<SourceConfig>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_top_communities")]
    pub top_communities: usize,
    #[serde(default = "default_top_tags")]
    pub top_tags: usize,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Per-district sub-area lists replacing the built-in catalogue.
    #[serde(default)]
    pub subareas: HashMap<String, Vec<String>>,
}

fn default_output_dir() -> String {
    "reports".to_string()
}

fn default_top_communities() -> usize {
    10
}

fn default_top_tags() -> usize {
    20
}

fn default_http_timeout() -> u64 {
    10
}

impl AppConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(content)?;
        for source in &config.sources {
            if source.path.is_some() == source.url.is_some() {
                return Err(ConfigError::InvalidSource(source.name.clone()));
            }
        }
        Ok(config)
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    AppConfig::from_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_settings() {
        let config = AppConfig::from_json(r#"{"sources":[{"name":"all","path":"data/houses.csv"}]}"#).unwrap();
        assert_eq!(config.output_dir, "reports");
        assert_eq!(config.top_communities, 10);
        assert_eq!(config.top_tags, 20);
        assert_eq!(config.http_timeout_seconds, 10);
        assert!(config.sources[0].district.is_none());
        assert!(config.subareas.is_empty());
    }

    #[test]
    fn source_needs_exactly_one_location() {
        let both = r#"{"sources":[{"name":"x","path":"a.csv","url":"http://h/a.csv"}]}"#;
        assert!(matches!(AppConfig::from_json(both), Err(ConfigError::InvalidSource(name)) if name == "x"));
        let neither = r#"{"sources":[{"name":"y"}]}"#;
        assert!(matches!(AppConfig::from_json(neither), Err(ConfigError::InvalidSource(_))));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(AppConfig::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(load_config("/nope/config.json"), Err(ConfigError::Io { .. })));
    }
}

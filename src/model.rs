// Core structs: RawRow, CanonicalRecord, summary values and edge errors
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One record of the listing table, positionally aligned to the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line the record starts on, after blank lines were dropped and
    /// indented continuations merged.
    pub line: usize,
    pub fields: Vec<String>,
}

/// Header row plus the data rows that followed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// A listing after the localized columns were mapped onto the canonical schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    pub title: String,
    pub district: String,
    pub subdistrict: String,
    pub community: String,
    pub area: f64,
    pub orientation: String,
    pub layout: String,
    pub floor: String,
    pub price: f64,
    pub tags: String,
    pub url: String,
    pub update_time: String,
}

impl CanonicalRecord {
    /// Validity predicate for the cleaned dataset.
    pub fn is_clean(&self) -> bool {
        !self.title.is_empty()
            && !self.district.is_empty()
            && !self.layout.is_empty()
            && self.price > 0.0
            && self.price <= crate::normalizer::MAX_PRICE
            && self.area > 0.0
            && self.area <= crate::normalizer::MAX_AREA
    }

    /// Tags are stored `|`-joined by the crawler.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.split('|').map(str::trim).filter(|t| !t.is_empty())
    }
}

/// `{name, value}` pair used for every categorical series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameValue {
    pub name: String,
    pub value: usize,
}

impl NameValue {
    pub fn new(name: impl Into<String>, value: usize) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub avg_price: f64,
    pub avg_area: f64,
    pub price_range: ValueRange,
    pub area_range: ValueRange,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct QualityMetrics {
    pub freshness: f64,
    pub accuracy: f64,
    pub completeness: f64,
    pub total: f64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("source `{0}` needs exactly one of `path` or `url`")]
    InvalidSource(String),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    InvalidResponse(u16),
}

use crate::analyzer::aggregates::{
    self, BoxPlot, CommunityRank, DistrictPriceStat, LayoutPriceMatrix, LayoutStat, OrientationStat,
    ScatterPoint, StatisticsSummary, TagCount, TrendPoint,
};
use crate::analyzer::quality;
use crate::model::{CanonicalRecord, NameValue, QualityMetrics, Summary};
use crate::normalizer::{HeaderMapping, NormalizeStats, normalize_all};
use crate::parser::{ListingCsvParser, Parser};
use serde::Serialize;
use tracing::{info, warn};

/// Quality metrics together with the number of records they were computed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    #[serde(flatten)]
    pub metrics: QualityMetrics,
    pub sample_size: usize,
}

/// Holds one immutable dataset and exposes every base view over its cleaned subset.
///
/// Both datasets are built once here and never change afterwards; each
/// accessor recomputes its value from scratch.
#[derive(Debug, Clone, Default)]
pub struct ListingAnalyzer {
    dataset: Vec<CanonicalRecord>,
    cleaned: Vec<CanonicalRecord>,
    normalize_stats: NormalizeStats,
}

impl ListingAnalyzer {
    /// Parses and normalizes a raw listing blob.
    pub fn from_text(text: &str) -> Self {
        Self::from_text_with(text, &ListingCsvParser::new(), &HeaderMapping::V1)
    }

    pub fn from_text_with<P: Parser>(text: &str, parser: &P, mapping: &HeaderMapping) -> Self {
        let table = parser.parse(text);
        let (dataset, normalize_stats) = normalize_all(&table, mapping);
        let mut analyzer = Self::from_records(dataset);
        analyzer.normalize_stats = normalize_stats;
        analyzer
    }

    /// Takes already-structured records as the dataset; only the cleaning predicate applies.
    pub fn from_records(dataset: Vec<CanonicalRecord>) -> Self {
        let cleaned: Vec<CanonicalRecord> = dataset.iter().filter(|r| r.is_clean()).cloned().collect();
        if cleaned.is_empty() {
            warn!("No listing survived cleaning ({} records in dataset)", dataset.len());
        } else {
            info!("Cleaned dataset: {} of {} records", cleaned.len(), dataset.len());
        }
        Self {
            dataset,
            cleaned,
            normalize_stats: NormalizeStats::default(),
        }
    }

    pub fn dataset(&self) -> &[CanonicalRecord] {
        &self.dataset
    }

    pub fn cleaned(&self) -> &[CanonicalRecord] {
        &self.cleaned
    }

    /// Row counters from normalization; zeroed for analyzers built from records.
    pub fn normalize_stats(&self) -> &NormalizeStats {
        &self.normalize_stats
    }

    pub fn summary(&self) -> Summary {
        aggregates::summary(&self.cleaned)
    }

    pub fn total_count(&self) -> usize {
        self.cleaned.len()
    }

    pub fn average_price(&self) -> f64 {
        self.summary().avg_price
    }

    pub fn price_distribution(&self) -> Vec<NameValue> {
        aggregates::price_distribution(&self.cleaned)
    }

    pub fn area_distribution(&self) -> Vec<NameValue> {
        aggregates::area_distribution(&self.cleaned)
    }

    pub fn district_distribution(&self) -> Vec<NameValue> {
        aggregates::district_distribution(&self.cleaned)
    }

    pub fn layout_distribution(&self) -> Vec<NameValue> {
        aggregates::layout_distribution(&self.cleaned)
    }

    pub fn orientation_distribution(&self) -> Vec<NameValue> {
        aggregates::orientation_distribution(&self.cleaned)
    }

    pub fn community_distribution(&self) -> Vec<NameValue> {
        aggregates::community_distribution(&self.cleaned)
    }

    pub fn price_area_scatter(&self) -> Vec<ScatterPoint> {
        aggregates::price_area_scatter(&self.cleaned)
    }

    pub fn price_area_heatmap(&self) -> Vec<[usize; 3]> {
        aggregates::price_area_heatmap(&self.cleaned)
    }

    pub fn district_price_analysis(&self) -> Vec<DistrictPriceStat> {
        aggregates::district_price_analysis(&self.cleaned)
    }

    pub fn layout_analysis(&self) -> Vec<LayoutStat> {
        aggregates::layout_analysis(&self.cleaned)
    }

    pub fn orientation_analysis(&self) -> Vec<OrientationStat> {
        aggregates::orientation_analysis(&self.cleaned)
    }

    pub fn price_area_correlation(&self) -> Vec<(f64, f64)> {
        aggregates::price_area_correlation(&self.cleaned)
    }

    pub fn price_area_coefficient(&self) -> Option<f64> {
        aggregates::price_area_coefficient(&self.cleaned)
    }

    pub fn popular_communities(&self, top: usize) -> Vec<CommunityRank> {
        aggregates::popular_communities(&self.cleaned, top)
    }

    pub fn floor_analysis(&self) -> Vec<NameValue> {
        aggregates::floor_analysis(&self.cleaned)
    }

    pub fn tag_analysis(&self, top: usize) -> Vec<TagCount> {
        aggregates::tag_analysis(&self.cleaned, top)
    }

    pub fn price_box_plot(&self) -> Vec<BoxPlot> {
        aggregates::price_box_plot(&self.cleaned)
    }

    pub fn layout_price_matrix(&self) -> LayoutPriceMatrix {
        aggregates::layout_price_matrix(&self.cleaned)
    }

    pub fn statistics_summary(&self) -> StatisticsSummary {
        aggregates::statistics_summary(&self.cleaned)
    }

    pub fn price_trend(&self) -> Vec<TrendPoint> {
        aggregates::price_trend(&self.cleaned)
    }

    pub fn quality_metrics(&self) -> QualityMetrics {
        quality::quality_metrics(&self.cleaned)
    }

    pub fn data_quality(&self) -> DataQuality {
        DataQuality {
            metrics: self.quality_metrics(),
            sample_size: self.cleaned.len(),
        }
    }
}

// Report assembly: gathers every view of an analyzer into one serializable value
use crate::analyzer::aggregates::{
    BoxPlot, CommunityRank, DistrictPriceStat, LayoutPriceMatrix, LayoutStat, OrientationStat, ScatterPoint,
    StatisticsSummary, TagCount, TrendPoint,
};
use crate::analyzer::city::{DistrictHeatmap, DistrictLayoutComparison, DistrictOverview, DistrictPriceRanges, FlowGraph};
use crate::analyzer::district::{
    CommunityPoint, CommunityStat, LayoutPriceStat, OrientationCount, RangeCount, SubDistrictStat,
};
use crate::analyzer::listing_analyzer::DataQuality;
use crate::analyzer::{CityAnalyzer, DistrictAnalyzer, ListingAnalyzer};
use crate::model::{NameValue, Summary};
use crate::normalizer::{HeaderMapping, NormalizeStats};
use crate::synthetic::{self, MonthlyPoint};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

/// Sizes of the ranked views.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub top_communities: usize,
    pub top_tags: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_communities: 10,
            top_tags: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseViews {
    pub summary: Summary,
    pub statistics: StatisticsSummary,
    pub quality: DataQuality,
    pub price_distribution: Vec<NameValue>,
    pub area_distribution: Vec<NameValue>,
    pub district_distribution: Vec<NameValue>,
    pub layout_distribution: Vec<NameValue>,
    pub orientation_distribution: Vec<NameValue>,
    pub community_distribution: Vec<NameValue>,
    pub price_area_scatter: Vec<ScatterPoint>,
    pub price_area_heatmap: Vec<[usize; 3]>,
    pub price_area_coefficient: Option<f64>,
    pub district_prices: Vec<DistrictPriceStat>,
    pub layouts: Vec<LayoutStat>,
    pub orientations: Vec<OrientationStat>,
    pub popular_communities: Vec<CommunityRank>,
    pub floors: Vec<NameValue>,
    pub tags: Vec<TagCount>,
    pub price_box_plot: Vec<BoxPlot>,
    pub layout_price_matrix: LayoutPriceMatrix,
    pub price_trend: Vec<TrendPoint>,
}

impl BaseViews {
    pub fn collect(analyzer: &ListingAnalyzer, options: &ReportOptions) -> Self {
        Self {
            summary: analyzer.summary(),
            statistics: analyzer.statistics_summary(),
            quality: analyzer.data_quality(),
            price_distribution: analyzer.price_distribution(),
            area_distribution: analyzer.area_distribution(),
            district_distribution: analyzer.district_distribution(),
            layout_distribution: analyzer.layout_distribution(),
            orientation_distribution: analyzer.orientation_distribution(),
            community_distribution: analyzer.community_distribution(),
            price_area_scatter: analyzer.price_area_scatter(),
            price_area_heatmap: analyzer.price_area_heatmap(),
            price_area_coefficient: analyzer.price_area_coefficient(),
            district_prices: analyzer.district_price_analysis(),
            layouts: analyzer.layout_analysis(),
            orientations: analyzer.orientation_analysis(),
            popular_communities: analyzer.popular_communities(options.top_communities),
            floors: analyzer.floor_analysis(),
            tags: analyzer.tag_analysis(options.top_tags),
            price_box_plot: analyzer.price_box_plot(),
            layout_price_matrix: analyzer.layout_price_matrix(),
            price_trend: analyzer.price_trend(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityViews {
    pub district_overview: Vec<DistrictOverview>,
    pub district_heatmap: DistrictHeatmap,
    pub district_price_ranges: DistrictPriceRanges,
    pub district_layouts: DistrictLayoutComparison,
    pub district_flow: FlowGraph,
}

impl CityViews {
    pub fn collect(analyzer: &CityAnalyzer) -> Self {
        Self {
            district_overview: analyzer.district_overview(),
            district_heatmap: analyzer.district_heatmap(),
            district_price_ranges: analyzer.district_price_ranges(),
            district_layouts: analyzer.district_layout_comparison(),
            district_flow: analyzer.district_flow(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictViews {
    pub scope: String,
    pub district: String,
    pub record_count: usize,
    pub communities: Vec<CommunityStat>,
    pub sub_districts: Vec<SubDistrictStat>,
    pub detailed_price_distribution: Vec<RangeCount>,
    pub area_distribution: Vec<RangeCount>,
    pub price_area_correlation: Vec<CommunityPoint>,
    pub layout_prices: Vec<LayoutPriceStat>,
    pub tags: Vec<TagCount>,
    pub orientations: Vec<OrientationCount>,
}

impl DistrictViews {
    pub fn collect(analyzer: &DistrictAnalyzer) -> Self {
        Self {
            scope: analyzer.scope().label().to_string(),
            district: analyzer.scope().key().to_string(),
            record_count: analyzer.records().len(),
            communities: analyzer.community_analysis(),
            sub_districts: analyzer.sub_district_analysis(),
            detailed_price_distribution: analyzer.detailed_price_distribution(),
            area_distribution: analyzer.area_distribution(),
            price_area_correlation: analyzer.price_area_correlation(),
            layout_prices: analyzer.layout_price_analysis(),
            tags: analyzer.tag_analysis(),
            orientations: analyzer.orientation_analysis(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ScopeViews {
    City(CityViews),
    District(DistrictViews),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub header_version: u32,
    pub ingest: NormalizeStats,
    pub base: BaseViews,
    pub scope: ScopeViews,
    /// Randomized filler for the monthly trend chart.
    pub mock_monthly_trend: Vec<MonthlyPoint>,
}

fn assemble<R: Rng + ?Sized>(
    source: &str,
    base: &ListingAnalyzer,
    scope: ScopeViews,
    options: &ReportOptions,
    rng: &mut R,
) -> Report {
    let base_views = BaseViews::collect(base, options);
    let mock_monthly_trend = synthetic::monthly_trend(base_views.summary.avg_price, base_views.summary.total, rng);
    Report {
        source: source.to_string(),
        generated_at: Utc::now(),
        header_version: HeaderMapping::V1.version(),
        ingest: base.normalize_stats().clone(),
        base: base_views,
        scope,
        mock_monthly_trend,
    }
}

pub fn city_report<R: Rng + ?Sized>(source: &str, analyzer: &CityAnalyzer, options: &ReportOptions, rng: &mut R) -> Report {
    assemble(source, analyzer.base(), ScopeViews::City(CityViews::collect(analyzer)), options, rng)
}

pub fn district_report<R: Rng + ?Sized>(
    source: &str,
    analyzer: &DistrictAnalyzer,
    options: &ReportOptions,
    rng: &mut R,
) -> Report {
    assemble(source, analyzer.base(), ScopeViews::District(DistrictViews::collect(analyzer)), options, rng)
}

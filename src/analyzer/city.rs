// City-wide rollups: per-district overview, price ranges, layout mix and tier flow
use crate::analyzer::classify::{LayoutClass, categorize_layout};
use crate::analyzer::listing_analyzer::ListingAnalyzer;
use crate::analyzer::stats::{BucketSet, Edge, rounded_mean};
use crate::analyzer::tally::group_by;
use crate::model::CanonicalRecord;
use crate::utils::{category_key, is_present};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

pub const CITY_PRICE_RANGES: BucketSet = BucketSet::new(
    &["≤2000", "2001-3000", "3001-4000", "4001-5000", "5001-8000", ">8000"],
    &[2000.0, 3000.0, 4000.0, 5000.0, 8000.0],
    Edge::UpperClosed,
);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictOverview {
    pub district: String,
    pub count: usize,
    pub avg_price: f64,
    pub sub_district_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictHeatmap {
    pub districts: Vec<String>,
    pub counts: Vec<usize>,
    pub avg_prices: Vec<f64>,
    pub matrix: Vec<[usize; 3]>,
}

/// Counts per district, aligned with `ranges`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictPriceRanges {
    pub ranges: Vec<String>,
    pub districts: Vec<String>,
    pub data: IndexMap<String, Vec<usize>>,
}

/// Layout-class counts per district, aligned with `layouts`; unclassified
/// layouts are counted in `unknown`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictLayoutComparison {
    pub layouts: Vec<String>,
    pub districts: Vec<String>,
    pub data: IndexMap<String, Vec<usize>>,
    pub unknown: IndexMap<String, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTier {
    Low,
    Mid,
    High,
}

impl PriceTier {
    pub const ALL: [PriceTier; 3] = [PriceTier::Low, PriceTier::Mid, PriceTier::High];

    pub fn from_avg_price(avg_price: f64) -> Self {
        if avg_price <= 3000.0 {
            PriceTier::Low
        } else if avg_price <= 6000.0 {
            PriceTier::Mid
        } else {
            PriceTier::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::Low => "低价区间",
            PriceTier::Mid => "中价区间",
            PriceTier::High => "高价区间",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLink {
    pub source: String,
    pub target: String,
    pub value: usize,
}

/// District -> price tier graph; edge weight is the district's listing count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
}

fn district_groups(records: &[CanonicalRecord]) -> IndexMap<&str, Vec<&CanonicalRecord>> {
    group_by(records, |r| Some(category_key(&r.district)))
}

/// Listing count, mean price and distinct sub-area count per district, busiest first.
pub fn district_overview(records: &[CanonicalRecord]) -> Vec<DistrictOverview> {
    let mut overview: Vec<DistrictOverview> = district_groups(records)
        .into_iter()
        .map(|(district, group)| {
            let prices: Vec<f64> = group.iter().map(|r| r.price).collect();
            let subareas: HashSet<&str> = group
                .iter()
                .map(|r| r.subdistrict.as_str())
                .filter(|s| is_present(s))
                .collect();
            DistrictOverview {
                district: district.to_string(),
                count: group.len(),
                avg_price: rounded_mean(&prices),
                sub_district_count: subareas.len(),
            }
        })
        .collect();
    overview.sort_by(|a, b| b.count.cmp(&a.count));
    overview
}

pub fn district_heatmap(records: &[CanonicalRecord]) -> DistrictHeatmap {
    let overview = district_overview(records);
    DistrictHeatmap {
        districts: overview.iter().map(|o| o.district.clone()).collect(),
        counts: overview.iter().map(|o| o.count).collect(),
        avg_prices: overview.iter().map(|o| o.avg_price).collect(),
        matrix: overview.iter().enumerate().map(|(idx, o)| [idx, 0, o.count]).collect(),
    }
}

pub fn district_price_ranges(records: &[CanonicalRecord]) -> DistrictPriceRanges {
    let data: IndexMap<String, Vec<usize>> = district_groups(records)
        .into_iter()
        .map(|(district, group)| (district.to_string(), CITY_PRICE_RANGES.counts(group.iter().map(|r| r.price))))
        .collect();
    DistrictPriceRanges {
        ranges: CITY_PRICE_RANGES.labels.iter().map(|l| l.to_string()).collect(),
        districts: data.keys().cloned().collect(),
        data,
    }
}

pub fn district_layout_comparison(records: &[CanonicalRecord]) -> DistrictLayoutComparison {
    let mut data: IndexMap<String, Vec<usize>> = IndexMap::new();
    let mut unknown: IndexMap<String, usize> = IndexMap::new();

    for (district, group) in district_groups(records) {
        let mut counts = vec![0usize; LayoutClass::KNOWN.len()];
        let mut unclassified = 0;
        for r in group {
            let class = categorize_layout(&r.layout);
            match LayoutClass::KNOWN.iter().position(|c| *c == class) {
                Some(idx) => counts[idx] += 1,
                None => unclassified += 1,
            }
        }
        data.insert(district.to_string(), counts);
        unknown.insert(district.to_string(), unclassified);
    }

    DistrictLayoutComparison {
        layouts: LayoutClass::KNOWN.iter().map(|c| c.label().to_string()).collect(),
        districts: data.keys().cloned().collect(),
        data,
        unknown,
    }
}

pub fn district_flow(records: &[CanonicalRecord]) -> FlowGraph {
    let overview = district_overview(records);

    let mut nodes: Vec<FlowNode> = overview
        .iter()
        .map(|o| FlowNode { name: o.district.clone() })
        .collect();
    nodes.extend(PriceTier::ALL.iter().map(|tier| FlowNode {
        name: tier.label().to_string(),
    }));

    let links = overview
        .iter()
        .map(|o| FlowLink {
            source: o.district.clone(),
            target: PriceTier::from_avg_price(o.avg_price).label().to_string(),
            value: o.count,
        })
        .collect();

    FlowGraph { nodes, links }
}

/// City scope: the full cleaned dataset plus city-level rollups.
#[derive(Debug, Clone, Default)]
pub struct CityAnalyzer {
    base: ListingAnalyzer,
}

impl CityAnalyzer {
    pub fn new(base: ListingAnalyzer) -> Self {
        Self { base }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(ListingAnalyzer::from_text(text))
    }

    pub fn base(&self) -> &ListingAnalyzer {
        &self.base
    }

    pub fn district_overview(&self) -> Vec<DistrictOverview> {
        district_overview(self.base.cleaned())
    }

    pub fn district_heatmap(&self) -> DistrictHeatmap {
        district_heatmap(self.base.cleaned())
    }

    pub fn district_price_ranges(&self) -> DistrictPriceRanges {
        district_price_ranges(self.base.cleaned())
    }

    pub fn district_layout_comparison(&self) -> DistrictLayoutComparison {
        district_layout_comparison(self.base.cleaned())
    }

    pub fn district_flow(&self) -> FlowGraph {
        district_flow(self.base.cleaned())
    }
}

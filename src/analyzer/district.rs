// District scope: narrows the cleaned dataset to one district and adds detail views
use crate::analyzer::aggregates::{self, TagCount};
use crate::analyzer::classify::categorize_layout;
use crate::analyzer::listing_analyzer::ListingAnalyzer;
use crate::analyzer::stats::{BucketSet, Edge, mean, rounded_mean, value_range};
use crate::analyzer::subareas::{OTHER_SUBAREA, SubareaCatalog};
use crate::analyzer::tally::group_by;
use crate::model::CanonicalRecord;
use crate::utils::{category_key, is_present, strip_district_suffix};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

pub const DETAILED_PRICE_BUCKETS: BucketSet = BucketSet::new(
    &["≤1500", "1501-2000", "2001-2500", "2501-3000", "3001-4000", "4001-5000", "5001-8000", ">8000"],
    &[1500.0, 2000.0, 2500.0, 3000.0, 4000.0, 5000.0, 8000.0],
    Edge::UpperClosed,
);

pub const DISTRICT_AREA_BUCKETS: BucketSet = BucketSet::new(
    &["≤30㎡", "31-50㎡", "51-70㎡", "71-90㎡", "91-120㎡", ">120㎡"],
    &[30.0, 50.0, 70.0, 90.0, 120.0],
    Edge::UpperClosed,
);

pub const DISTRICT_TAG_TOP: usize = 20;

/// A district as the UI names it (`"天河区"`) and as the dataset stores it (`"天河"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictScope {
    label: String,
    key: String,
}

impl DistrictScope {
    pub fn new(scope: &str) -> Self {
        Self {
            label: scope.trim().to_string(),
            key: strip_district_suffix(scope).to_string(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn matches(&self, record: &CanonicalRecord) -> bool {
        record.district == self.key
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeCount {
    pub range: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityStat {
    pub community: String,
    pub count: usize,
    pub avg_price: f64,
    pub avg_area: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubDistrictStat {
    pub sub_district: String,
    pub count: usize,
    pub avg_price: f64,
    pub community_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPriceStat {
    pub layout: String,
    pub count: usize,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrientationCount {
    pub orientation: String,
    pub count: usize,
}

/// `[area, price, community]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityPoint(pub f64, pub f64, pub String);

fn range_counts(buckets: &BucketSet, values: impl Iterator<Item = f64>) -> Vec<RangeCount> {
    buckets
        .labels
        .iter()
        .zip(buckets.counts(values))
        .map(|(label, count)| RangeCount {
            range: label.to_string(),
            count,
        })
        .collect()
}

pub fn community_analysis(records: &[CanonicalRecord]) -> Vec<CommunityStat> {
    let mut stats: Vec<CommunityStat> = group_by(records, |r| Some(category_key(&r.community)))
        .into_iter()
        .map(|(community, group)| {
            let prices: Vec<f64> = group.iter().map(|r| r.price).collect();
            let areas: Vec<f64> = group.iter().map(|r| r.area).collect();
            CommunityStat {
                community: community.to_string(),
                count: group.len(),
                avg_price: rounded_mean(&prices),
                avg_area: rounded_mean(&areas),
            }
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Rollup over the catalogue's sub-areas for the district, everything else
/// under `其他`. Empty sub-areas are dropped; ties keep catalogue order.
pub fn sub_district_analysis(records: &[CanonicalRecord], subareas: &[String]) -> Vec<SubDistrictStat> {
    let mut groups: IndexMap<&str, Vec<&CanonicalRecord>> = subareas
        .iter()
        .map(|s| (s.as_str(), Vec::new()))
        .collect();
    groups.insert(OTHER_SUBAREA, Vec::new());

    for r in records {
        let key = if subareas.iter().any(|s| *s == r.subdistrict) {
            r.subdistrict.as_str()
        } else {
            OTHER_SUBAREA
        };
        groups.entry(key).or_default().push(r);
    }

    let mut stats: Vec<SubDistrictStat> = groups
        .into_iter()
        .filter(|(_, group)| !group.is_empty())
        .map(|(sub_district, group)| {
            let prices: Vec<f64> = group.iter().map(|r| r.price).collect();
            let communities: HashSet<&str> = group
                .iter()
                .map(|r| r.community.as_str())
                .filter(|c| is_present(c))
                .collect();
            SubDistrictStat {
                sub_district: sub_district.to_string(),
                count: group.len(),
                avg_price: rounded_mean(&prices),
                community_count: communities.len(),
            }
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

pub fn detailed_price_distribution(records: &[CanonicalRecord]) -> Vec<RangeCount> {
    range_counts(&DETAILED_PRICE_BUCKETS, records.iter().map(|r| r.price))
}

pub fn area_distribution(records: &[CanonicalRecord]) -> Vec<RangeCount> {
    range_counts(&DISTRICT_AREA_BUCKETS, records.iter().map(|r| r.area))
}

pub fn price_area_correlation(records: &[CanonicalRecord]) -> Vec<CommunityPoint> {
    records
        .iter()
        .map(|r| CommunityPoint(r.area, r.price, r.community.clone()))
        .collect()
}

/// Price statistics per layout class, classes in first-seen order.
pub fn layout_price_analysis(records: &[CanonicalRecord]) -> Vec<LayoutPriceStat> {
    group_by(records, |r| Some(categorize_layout(&r.layout).label()))
        .into_iter()
        .map(|(layout, group)| {
            let prices: Vec<f64> = group.iter().map(|r| r.price).collect();
            let range = value_range(&prices);
            LayoutPriceStat {
                layout: layout.to_string(),
                count: group.len(),
                avg_price: mean(&prices).round(),
                min_price: range.min,
                max_price: range.max,
            }
        })
        .collect()
}

pub fn orientation_analysis(records: &[CanonicalRecord]) -> Vec<OrientationCount> {
    aggregates::orientation_distribution(records)
        .into_iter()
        .map(|pair| OrientationCount {
            orientation: pair.name,
            count: pair.value,
        })
        .collect()
}

/// District scope over a base analyzer. Only records whose district equals the
/// scope key are visible to the district views.
#[derive(Debug, Clone)]
pub struct DistrictAnalyzer {
    scope: DistrictScope,
    base: ListingAnalyzer,
    records: Vec<CanonicalRecord>,
    subareas: Vec<String>,
}

impl DistrictAnalyzer {
    pub fn new(base: ListingAnalyzer, scope: &str, catalog: &SubareaCatalog) -> Self {
        let scope = DistrictScope::new(scope);
        let records: Vec<CanonicalRecord> = base
            .cleaned()
            .iter()
            .filter(|r| scope.matches(r))
            .cloned()
            .collect();
        info!(
            "District scope {} -> {}: {} records",
            scope.label(),
            scope.key(),
            records.len()
        );
        let subareas = catalog.subareas(scope.key()).to_vec();
        Self {
            scope,
            base,
            records,
            subareas,
        }
    }

    pub fn from_text(text: &str, scope: &str) -> Self {
        Self::new(ListingAnalyzer::from_text(text), scope, &SubareaCatalog::guangzhou())
    }

    pub fn scope(&self) -> &DistrictScope {
        &self.scope
    }

    pub fn base(&self) -> &ListingAnalyzer {
        &self.base
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn community_analysis(&self) -> Vec<CommunityStat> {
        community_analysis(&self.records)
    }

    pub fn sub_district_analysis(&self) -> Vec<SubDistrictStat> {
        sub_district_analysis(&self.records, &self.subareas)
    }

    pub fn detailed_price_distribution(&self) -> Vec<RangeCount> {
        detailed_price_distribution(&self.records)
    }

    pub fn area_distribution(&self) -> Vec<RangeCount> {
        area_distribution(&self.records)
    }

    pub fn price_area_correlation(&self) -> Vec<CommunityPoint> {
        price_area_correlation(&self.records)
    }

    pub fn layout_price_analysis(&self) -> Vec<LayoutPriceStat> {
        layout_price_analysis(&self.records)
    }

    pub fn tag_analysis(&self) -> Vec<TagCount> {
        aggregates::tag_analysis(&self.records, DISTRICT_TAG_TOP)
    }

    pub fn orientation_analysis(&self) -> Vec<OrientationCount> {
        orientation_analysis(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(district: &str, subdistrict: &str, community: &str, price: f64, area: f64) -> CanonicalRecord {
        CanonicalRecord {
            title: "t".into(),
            district: district.into(),
            subdistrict: subdistrict.into(),
            community: community.into(),
            layout: "2室1厅".into(),
            orientation: "南".into(),
            price,
            area,
            ..Default::default()
        }
    }

    fn sample() -> Vec<CanonicalRecord> {
        vec![
            listing("天河", "岗顶", "A", 1500.0, 30.0),
            listing("天河", "珠江新城", "B", 8000.0, 90.0),
            listing("海珠", "客村", "C", 3000.0, 50.0),
            listing("天河", "某新板块", "D", 2600.0, 51.0),
            listing("天河", "岗顶", "E", 4200.0, 121.0),
            listing("天河区", "岗顶", "F", 3000.0, 60.0),
        ]
    }

    fn analyzer() -> DistrictAnalyzer {
        DistrictAnalyzer::new(
            ListingAnalyzer::from_records(sample()),
            "天河区",
            &SubareaCatalog::guangzhou(),
        )
    }

    #[test]
    fn scope_strips_trailing_suffix() {
        let scope = DistrictScope::new("天河区");
        assert_eq!(scope.label(), "天河区");
        assert_eq!(scope.key(), "天河");
        assert_eq!(DistrictScope::new("天河").key(), "天河");
    }

    #[test]
    fn narrows_to_normalized_district() {
        let analyzer = analyzer();
        assert_eq!(analyzer.records().len(), 4);
        assert!(analyzer.records().iter().all(|r| r.district == "天河"));
        assert_eq!(analyzer.base().cleaned().len(), 6);
    }

    #[test]
    fn sub_districts_fall_back_to_other() {
        let stats = analyzer().sub_district_analysis();
        assert_eq!(stats[0].sub_district, "岗顶");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].avg_price, 2850.0);
        assert_eq!(stats[0].community_count, 2);
        assert_eq!(stats[1].sub_district, "珠江新城");
        assert_eq!(stats[2].sub_district, OTHER_SUBAREA);
        assert_eq!(stats.len(), 3);
    }

    #[test]
    fn district_histograms_are_upper_closed() {
        let analyzer = analyzer();
        let prices: Vec<usize> = analyzer.detailed_price_distribution().iter().map(|r| r.count).collect();
        assert_eq!(prices, vec![1, 0, 0, 1, 0, 1, 1, 0]);
        let areas: Vec<usize> = analyzer.area_distribution().iter().map(|r| r.count).collect();
        assert_eq!(areas, vec![1, 0, 1, 1, 0, 1]);
        assert_eq!(areas.iter().sum::<usize>(), analyzer.records().len());
    }

    #[test]
    fn community_and_orientation_views() {
        let analyzer = analyzer();
        let communities = analyzer.community_analysis();
        assert_eq!(communities.len(), 4);
        assert_eq!(communities[0].community, "A");
        let orientation = analyzer.orientation_analysis();
        assert_eq!(orientation, vec![OrientationCount { orientation: "南".into(), count: 4 }]);
    }

    #[test]
    fn layout_price_by_class() {
        let stats = analyzer().layout_price_analysis();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].layout, "二居室");
        assert_eq!(stats[0].min_price, 1500.0);
        assert_eq!(stats[0].max_price, 8000.0);
    }

    #[test]
    fn empty_scope_yields_zero_values() {
        let analyzer = DistrictAnalyzer::new(
            ListingAnalyzer::from_records(sample()),
            "南沙区",
            &SubareaCatalog::guangzhou(),
        );
        assert!(analyzer.records().is_empty());
        assert!(analyzer.sub_district_analysis().is_empty());
        assert!(analyzer.community_analysis().is_empty());
        assert!(analyzer.detailed_price_distribution().iter().all(|r| r.count == 0));
    }
}

//! Distribution, cross-tabulation, rollup and ranking views.
//!
//! Every function here is pure over a slice of records and returns a fresh
//! value; an empty slice always yields the zero value (`0`, an empty vector or
//! a `{min: 0, max: 0}` range).

use crate::analyzer::classify::{FloorLevel, TrendBucket, classify_floor, classify_freshness};
use crate::analyzer::stats::{
    BucketSet, Edge, mean, nearest_rank, pearson, rounded_mean, sorted_ascending, value_range,
};
use crate::analyzer::tally::{count_by, group_by, ranked, sort_desc_by};
use crate::model::{CanonicalRecord, NameValue, Summary};
use crate::utils::{UNKNOWN, category_key, is_present};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

pub const PRICE_BUCKETS: BucketSet = BucketSet::new(
    &["1000元以下", "1000-2000元", "2000-3000元", "3000-5000元", "5000-8000元", "8000元以上"],
    &[1000.0, 2000.0, 3000.0, 5000.0, 8000.0],
    Edge::HalfOpen,
);

pub const AREA_BUCKETS: BucketSet = BucketSet::new(
    &["30㎡以下", "30-50㎡", "50-80㎡", "80-120㎡", "120㎡以上"],
    &[30.0, 50.0, 80.0, 120.0],
    Edge::HalfOpen,
);

pub const LAYOUT_TOP: usize = 10;
pub const COMMUNITY_TOP: usize = 20;

/// `[area, price, title, layout]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint(pub f64, pub f64, pub String, pub String);

/// Average price per (layout, district); cells are `[layoutIdx, districtIdx, floor(avg)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutPriceMatrix {
    pub matrix: Vec<(usize, usize, f64)>,
    pub layouts: Vec<String>,
    pub districts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictPriceStat {
    pub name: String,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStat {
    pub name: String,
    pub avg_price: f64,
    pub avg_area: f64,
    pub count: usize,
    pub price_per_sqm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationStat {
    pub name: String,
    pub avg_price: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityRank {
    pub community: String,
    pub district: String,
    pub count: usize,
    pub avg_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Five-number summary of one district's prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlot {
    pub district: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total_count: usize,
    pub avg_price: f64,
    pub max_price: f64,
    pub min_price: f64,
    pub avg_area: f64,
    pub district_count: usize,
    pub community_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub time: String,
    pub avg_price: f64,
    pub count: usize,
}

fn prices(records: &[&CanonicalRecord]) -> Vec<f64> {
    records.iter().map(|r| r.price).collect()
}

fn areas(records: &[&CanonicalRecord]) -> Vec<f64> {
    records.iter().map(|r| r.area).collect()
}

pub fn summary(records: &[CanonicalRecord]) -> Summary {
    if records.is_empty() {
        return Summary::default();
    }
    let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
    let areas: Vec<f64> = records.iter().map(|r| r.area).collect();
    Summary {
        total: records.len(),
        avg_price: rounded_mean(&prices),
        avg_area: rounded_mean(&areas),
        price_range: value_range(&prices),
        area_range: value_range(&areas),
    }
}

pub fn price_distribution(records: &[CanonicalRecord]) -> Vec<NameValue> {
    if records.is_empty() {
        return Vec::new();
    }
    PRICE_BUCKETS.distribution(records.iter().map(|r| r.price))
}

pub fn area_distribution(records: &[CanonicalRecord]) -> Vec<NameValue> {
    if records.is_empty() {
        return Vec::new();
    }
    AREA_BUCKETS.distribution(records.iter().map(|r| r.area))
}

pub fn district_distribution(records: &[CanonicalRecord]) -> Vec<NameValue> {
    ranked(count_by(records, |r| Some(category_key(&r.district))))
}

pub fn layout_distribution(records: &[CanonicalRecord]) -> Vec<NameValue> {
    let mut layouts = ranked(count_by(records, |r| Some(category_key(&r.layout))));
    layouts.truncate(LAYOUT_TOP);
    layouts
}

pub fn orientation_distribution(records: &[CanonicalRecord]) -> Vec<NameValue> {
    ranked(count_by(records, |r| Some(category_key(&r.orientation))))
}

/// Top communities by listing count; unknown communities are left out.
pub fn community_distribution(records: &[CanonicalRecord]) -> Vec<NameValue> {
    let counts = count_by(records, |r| {
        let community = category_key(&r.community);
        (community != UNKNOWN).then_some(community)
    });
    let mut communities = ranked(counts);
    communities.truncate(COMMUNITY_TOP);
    communities
}

pub fn price_area_scatter(records: &[CanonicalRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .map(|r| ScatterPoint(r.area, r.price, r.title.clone(), r.layout.clone()))
        .collect()
}

/// `[areaIdx, priceIdx, count]` for every cell of the 5 x 6 bucket grid.
pub fn price_area_heatmap(records: &[CanonicalRecord]) -> Vec<[usize; 3]> {
    if records.is_empty() {
        return Vec::new();
    }
    let mut grid = vec![vec![0usize; PRICE_BUCKETS.len()]; AREA_BUCKETS.len()];
    for r in records {
        grid[AREA_BUCKETS.index_of(r.area)][PRICE_BUCKETS.index_of(r.price)] += 1;
    }
    grid.iter()
        .enumerate()
        .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, &count)| [i, j, count]))
        .collect()
}

/// Per-district price rollup, most expensive district first.
pub fn district_price_analysis(records: &[CanonicalRecord]) -> Vec<DistrictPriceStat> {
    let mut stats: Vec<DistrictPriceStat> = group_by(records, |r| Some(category_key(&r.district)))
        .into_iter()
        .map(|(name, group)| {
            let prices = prices(&group);
            let range = value_range(&prices);
            DistrictPriceStat {
                name: name.to_string(),
                avg_price: rounded_mean(&prices),
                min_price: range.min,
                max_price: range.max,
                count: group.len(),
            }
        })
        .collect();
    sort_desc_by(&mut stats, |s| s.avg_price);
    stats
}

/// Per-layout rollup. Price per square metre divides the layout's own mean
/// price by its mean area.
pub fn layout_analysis(records: &[CanonicalRecord]) -> Vec<LayoutStat> {
    let mut stats: Vec<LayoutStat> = group_by(records, |r| Some(category_key(&r.layout)))
        .into_iter()
        .map(|(name, group)| {
            let mean_price = mean(&prices(&group));
            let mean_area = mean(&areas(&group));
            LayoutStat {
                name: name.to_string(),
                avg_price: mean_price.round(),
                avg_area: mean_area.round(),
                count: group.len(),
                price_per_sqm: if mean_area > 0.0 { (mean_price / mean_area).round() } else { 0.0 },
            }
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

pub fn orientation_analysis(records: &[CanonicalRecord]) -> Vec<OrientationStat> {
    let mut stats: Vec<OrientationStat> = group_by(records, |r| Some(category_key(&r.orientation)))
        .into_iter()
        .map(|(name, group)| OrientationStat {
            name: name.to_string(),
            avg_price: rounded_mean(&prices(&group)),
            count: group.len(),
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// `[area, price]` pairs.
pub fn price_area_correlation(records: &[CanonicalRecord]) -> Vec<(f64, f64)> {
    records.iter().map(|r| (r.area, r.price)).collect()
}

/// Pearson coefficient between area and price, `None` below two distinct points.
pub fn price_area_coefficient(records: &[CanonicalRecord]) -> Option<f64> {
    let areas: Vec<f64> = records.iter().map(|r| r.area).collect();
    let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
    pearson(&areas, &prices)
}

/// Communities with the most listings. The district is the one of the first
/// listing seen for that community.
pub fn popular_communities(records: &[CanonicalRecord], top: usize) -> Vec<CommunityRank> {
    let mut ranks: Vec<CommunityRank> = group_by(records, |r| Some(category_key(&r.community)))
        .into_iter()
        .map(|(community, group)| CommunityRank {
            community: community.to_string(),
            district: group[0].district.clone(),
            count: group.len(),
            avg_price: rounded_mean(&prices(&group)),
        })
        .collect();
    ranks.sort_by(|a, b| b.count.cmp(&a.count));
    ranks.truncate(top);
    ranks
}

/// Low / middle / high / unknown floor split; empty classes are omitted.
pub fn floor_analysis(records: &[CanonicalRecord]) -> Vec<NameValue> {
    let mut counts = [0usize; FloorLevel::ALL.len()];
    for r in records {
        let level = classify_floor(&r.floor);
        if let Some(idx) = FloorLevel::ALL.iter().position(|l| *l == level) {
            counts[idx] += 1;
        }
    }
    FloorLevel::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(level, count)| NameValue::new(level.label(), count))
        .collect()
}

/// Most frequent `|`-separated tags.
pub fn tag_analysis(records: &[CanonicalRecord], top: usize) -> Vec<TagCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for tag in records.iter().flat_map(CanonicalRecord::tag_list) {
        *counts.entry(tag).or_default() += 1;
    }
    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count));
    tags.truncate(top);
    tags
}

/// Per-district five-number price summary, districts in first-seen order.
pub fn price_box_plot(records: &[CanonicalRecord]) -> Vec<BoxPlot> {
    group_by(records, |r| Some(r.district.as_str()))
        .into_iter()
        .map(|(district, group)| {
            let sorted = sorted_ascending(&prices(&group));
            BoxPlot {
                district: district.to_string(),
                min: sorted[0],
                q1: nearest_rank(&sorted, 0.25),
                median: nearest_rank(&sorted, 0.5),
                q3: nearest_rank(&sorted, 0.75),
                max: sorted[sorted.len() - 1],
            }
        })
        .collect()
}

pub fn layout_price_matrix(records: &[CanonicalRecord]) -> LayoutPriceMatrix {
    let layouts: Vec<&str> = group_by(records, |r| Some(r.layout.as_str())).into_keys().collect();
    let districts: Vec<&str> = group_by(records, |r| Some(r.district.as_str())).into_keys().collect();

    let mut cells: IndexMap<(&str, &str), Vec<f64>> = IndexMap::new();
    for r in records {
        cells
            .entry((r.district.as_str(), r.layout.as_str()))
            .or_default()
            .push(r.price);
    }

    let mut matrix = Vec::with_capacity(cells.len());
    for (i, district) in districts.iter().enumerate() {
        for (j, layout) in layouts.iter().enumerate() {
            if let Some(prices) = cells.get(&(*district, *layout)) {
                matrix.push((j, i, mean(prices).floor()));
            }
        }
    }

    LayoutPriceMatrix {
        matrix,
        layouts: layouts.into_iter().map(str::to_string).collect(),
        districts: districts.into_iter().map(str::to_string).collect(),
    }
}

pub fn statistics_summary(records: &[CanonicalRecord]) -> StatisticsSummary {
    if records.is_empty() {
        return StatisticsSummary::default();
    }
    let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
    let areas: Vec<f64> = records.iter().map(|r| r.area).collect();
    let range = value_range(&prices);
    StatisticsSummary {
        total_count: records.len(),
        avg_price: mean(&prices).floor(),
        max_price: range.max,
        min_price: range.min,
        avg_area: (mean(&areas) * 10.0).round() / 10.0,
        district_count: records.iter().map(|r| r.district.as_str()).collect::<HashSet<_>>().len(),
        community_count: records
            .iter()
            .map(|r| r.community.as_str())
            .filter(|c| is_present(c))
            .collect::<HashSet<_>>()
            .len(),
    }
}

/// Average price per freshness bucket, in bucket order (today first).
/// Records without freshness text are skipped.
pub fn price_trend(records: &[CanonicalRecord]) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<TrendBucket, Vec<f64>> = BTreeMap::new();
    for r in records {
        if let Some(bucket) = TrendBucket::from_freshness(classify_freshness(&r.update_time)) {
            buckets.entry(bucket).or_default().push(r.price);
        }
    }
    buckets
        .into_iter()
        .map(|(bucket, prices)| TrendPoint {
            time: bucket.label(),
            avg_price: rounded_mean(&prices),
            count: prices.len(),
        })
        .collect()
}

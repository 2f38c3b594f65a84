// Validation and normalization of raw listing rows into canonical records
use crate::model::{CanonicalRecord, ParsedTable, RawRow};
use crate::parser::MIN_COLUMNS;
use crate::utils::parse_number;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

pub const MAX_PRICE: f64 = 100_000.0;
pub const MAX_AREA: f64 = 2_000.0;

const WHOLE_BUILDING_MARKER: &str = "独栋";
const ROOMS_REMAINING_MARKER: &str = "仅剩";
const LEASE_COUNT_MARKER: &str = "间在租";
const AREA_UNIT: &str = "㎡";

/// Localized column names produced by the upstream crawler, one per canonical field.
///
/// This mapping is the only coupling to the data producers, so it carries an
/// explicit version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMapping {
    version: u32,
    pub title: &'static str,
    pub district: &'static str,
    pub subdistrict: &'static str,
    pub community: &'static str,
    pub area: &'static str,
    pub orientation: &'static str,
    pub layout: &'static str,
    pub floor: &'static str,
    pub price: &'static str,
    pub tags: &'static str,
    pub url: &'static str,
    pub update_time: &'static str,
}

impl HeaderMapping {
    pub const V1: HeaderMapping = HeaderMapping {
        version: 1,
        title: "标题",
        district: "区域",
        subdistrict: "地块",
        community: "小区",
        area: "面积",
        orientation: "朝向",
        layout: "户型",
        floor: "楼层信息",
        price: "价格",
        tags: "标签",
        url: "详情页链接",
        update_time: "维护时间",
    };

    pub fn version(&self) -> u32 {
        self.version
    }
}

impl Default for HeaderMapping {
    fn default() -> Self {
        Self::V1
    }
}

/// Why a row was left out of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Rejection {
    TooFewFields,
    WholeBuilding,
    RoomsRemaining,
    MalformedSubdistrict,
    PriceOutOfRange,
    AreaOutOfRange,
    MissingRequired,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::TooFewFields => "too few fields",
            Rejection::WholeBuilding => "whole-building listing",
            Rejection::RoomsRemaining => "rooms-remaining entry",
            Rejection::MalformedSubdistrict => "malformed sub-district",
            Rejection::PriceOutOfRange => "price out of range",
            Rejection::AreaOutOfRange => "area out of range",
            Rejection::MissingRequired => "missing title or district",
        };
        f.write_str(reason)
    }
}

/// Diagnostic counters; nothing downstream depends on them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub accepted: usize,
    pub rejected: BTreeMap<Rejection, usize>,
}

impl NormalizeStats {
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

/// Column positions of one header row resolved against a mapping.
struct ColumnIndex {
    title: Option<usize>,
    district: Option<usize>,
    subdistrict: Option<usize>,
    community: Option<usize>,
    area: Option<usize>,
    orientation: Option<usize>,
    layout: Option<usize>,
    floor: Option<usize>,
    price: Option<usize>,
    tags: Option<usize>,
    url: Option<usize>,
    update_time: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &[String], mapping: &HeaderMapping) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            title: find(mapping.title),
            district: find(mapping.district),
            subdistrict: find(mapping.subdistrict),
            community: find(mapping.community),
            area: find(mapping.area),
            orientation: find(mapping.orientation),
            layout: find(mapping.layout),
            floor: find(mapping.floor),
            price: find(mapping.price),
            tags: find(mapping.tags),
            url: find(mapping.url),
            update_time: find(mapping.update_time),
        }
    }
}

fn field(row: &RawRow, idx: Option<usize>) -> &str {
    idx.and_then(|i| row.fields.get(i)).map(String::as_str).unwrap_or("")
}

fn normalize_row(row: &RawRow, cols: &ColumnIndex) -> Result<CanonicalRecord, Rejection> {
    if row.fields.len() < MIN_COLUMNS {
        return Err(Rejection::TooFewFields);
    }

    let title = field(row, cols.title);
    let district = field(row, cols.district);
    let subdistrict = field(row, cols.subdistrict);

    if title.contains(WHOLE_BUILDING_MARKER) {
        return Err(Rejection::WholeBuilding);
    }
    if district.contains(ROOMS_REMAINING_MARKER) {
        return Err(Rejection::RoomsRemaining);
    }
    if subdistrict.contains(LEASE_COUNT_MARKER) || subdistrict.contains(AREA_UNIT) {
        return Err(Rejection::MalformedSubdistrict);
    }

    let price = parse_number(field(row, cols.price));
    let area = parse_number(field(row, cols.area));

    if price <= 0.0 || price > MAX_PRICE {
        return Err(Rejection::PriceOutOfRange);
    }
    if area <= 0.0 || area > MAX_AREA {
        return Err(Rejection::AreaOutOfRange);
    }
    if title.is_empty() || district.is_empty() {
        return Err(Rejection::MissingRequired);
    }

    Ok(CanonicalRecord {
        title: title.to_string(),
        district: district.to_string(),
        subdistrict: subdistrict.to_string(),
        community: field(row, cols.community).to_string(),
        area,
        orientation: field(row, cols.orientation).to_string(),
        layout: field(row, cols.layout).to_string(),
        floor: field(row, cols.floor).to_string(),
        price,
        tags: field(row, cols.tags).to_string(),
        url: field(row, cols.url).to_string(),
        update_time: field(row, cols.update_time).to_string(),
    })
}

/// Maps every row of the table to a canonical record, dropping rejected rows.
/// Source order is preserved.
pub fn normalize_all(table: &ParsedTable, mapping: &HeaderMapping) -> (Vec<CanonicalRecord>, NormalizeStats) {
    let cols = ColumnIndex::resolve(&table.headers, mapping);
    let mut stats = NormalizeStats::default();
    let mut records = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        match normalize_row(row, &cols) {
            Ok(record) => {
                stats.accepted += 1;
                records.push(record);
            }
            Err(reason) => {
                debug!("Row {} rejected: {}", row.line, reason);
                *stats.rejected.entry(reason).or_default() += 1;
            }
        }
    }

    info!(
        "Normalized {} rows: {} accepted, {} rejected (header mapping v{})",
        table.rows.len(),
        stats.accepted,
        stats.rejected_total(),
        mapping.version()
    );
    (records, stats)
}

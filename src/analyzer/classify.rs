// Text classifiers for freshness, floor level and layout class
use once_cell::sync::Lazy;
use regex::Regex;

static DAYS_AGO_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)\s*天前").expect("valid regex"));
static ROOM_COUNT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)室").expect("valid regex"));

/// Relative age parsed from the listing's maintenance text, e.g. `"3天前维护"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Empty or a literal `null`.
    Absent,
    Today,
    DaysAgo(u32),
    /// Present but not a format we know.
    Unrecognized,
}

pub fn classify_freshness(text: &str) -> Freshness {
    let text = text.trim();
    if text.is_empty() || text == "null" {
        return Freshness::Absent;
    }
    if text.contains("今天") || text.contains("刚刚") {
        return Freshness::Today;
    }
    if text.contains("昨天") {
        return Freshness::DaysAgo(1);
    }
    // Counts too large for u32 saturate; they are all far past a month.
    match DAYS_AGO_PATTERN
        .captures(text)
        .map(|caps| caps[1].parse::<u32>().unwrap_or(u32::MAX))
    {
        Some(0) => Freshness::Today,
        Some(days) => Freshness::DaysAgo(days),
        None => Freshness::Unrecognized,
    }
}

/// Recency score in [0, 100]; `None` for absent text.
pub fn freshness_score(freshness: Freshness) -> Option<f64> {
    let score = match freshness {
        Freshness::Absent => return None,
        Freshness::Today => 100.0,
        Freshness::DaysAgo(1) => 90.0,
        Freshness::DaysAgo(2) => 85.0,
        Freshness::DaysAgo(3) => 80.0,
        Freshness::DaysAgo(days @ 4..=7) => f64::max(60.0, 100.0 - 5.0 * days as f64),
        Freshness::DaysAgo(days @ 8..=30) => f64::max(30.0, 70.0 - 2.0 * days as f64),
        Freshness::DaysAgo(_) => 20.0,
        Freshness::Unrecognized => 50.0,
    };
    Some(score)
}

/// Buckets of the price trend, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrendBucket {
    Today,
    DaysAgo(u32),
    WeekAgo,
    Other,
}

impl TrendBucket {
    pub fn from_freshness(freshness: Freshness) -> Option<Self> {
        match freshness {
            Freshness::Absent => None,
            Freshness::Today => Some(TrendBucket::Today),
            Freshness::DaysAgo(days @ 1..=7) => Some(TrendBucket::DaysAgo(days)),
            Freshness::DaysAgo(_) => Some(TrendBucket::WeekAgo),
            Freshness::Unrecognized => Some(TrendBucket::Other),
        }
    }

    pub fn label(&self) -> String {
        match self {
            TrendBucket::Today => "今天".to_string(),
            TrendBucket::DaysAgo(days) => format!("{days}天前"),
            TrendBucket::WeekAgo => "一周前".to_string(),
            TrendBucket::Other => "其他".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorLevel {
    Low,
    Middle,
    High,
    Unknown,
}

impl FloorLevel {
    pub const ALL: [FloorLevel; 4] = [FloorLevel::Low, FloorLevel::Middle, FloorLevel::High, FloorLevel::Unknown];

    pub fn label(&self) -> &'static str {
        match self {
            FloorLevel::Low => "低楼层",
            FloorLevel::Middle => "中楼层",
            FloorLevel::High => "高楼层",
            FloorLevel::Unknown => "未知",
        }
    }
}

pub fn classify_floor(floor: &str) -> FloorLevel {
    if floor.contains("低楼层") {
        FloorLevel::Low
    } else if floor.contains("中楼层") {
        FloorLevel::Middle
    } else if floor.contains("高楼层") {
        FloorLevel::High
    } else {
        FloorLevel::Unknown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutClass {
    OneRoom,
    TwoRoom,
    ThreeRoom,
    FourPlus,
    Unknown,
}

impl LayoutClass {
    /// The classes shown in comparisons; `Unknown` is reported separately.
    pub const KNOWN: [LayoutClass; 4] = [
        LayoutClass::OneRoom,
        LayoutClass::TwoRoom,
        LayoutClass::ThreeRoom,
        LayoutClass::FourPlus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LayoutClass::OneRoom => "一居室",
            LayoutClass::TwoRoom => "二居室",
            LayoutClass::ThreeRoom => "三居室",
            LayoutClass::FourPlus => "四居室及以上",
            LayoutClass::Unknown => "未知",
        }
    }
}

/// `"2室1厅1卫"` -> two rooms. An open-plan `开间` counts as one room.
pub fn categorize_layout(layout: &str) -> LayoutClass {
    let layout = layout.trim();
    if layout.is_empty() || layout == crate::utils::UNKNOWN {
        return LayoutClass::Unknown;
    }
    if let Some(rooms) = ROOM_COUNT_PATTERN
        .captures(layout)
        .and_then(|caps| caps[1].parse::<u32>().ok())
    {
        return match rooms {
            1 => LayoutClass::OneRoom,
            2 => LayoutClass::TwoRoom,
            3 => LayoutClass::ThreeRoom,
            _ => LayoutClass::FourPlus,
        };
    }
    if layout.contains("开间") {
        return LayoutClass::OneRoom;
    }
    LayoutClass::Unknown
}

// Heuristic data-quality scoring over the cleaned dataset
use crate::analyzer::classify::{classify_freshness, freshness_score};
use crate::model::{CanonicalRecord, QualityMetrics};
use crate::utils::is_present;

/// Score given to freshness when no record carries maintenance text at all.
const DEFAULT_FRESHNESS: f64 = 50.0;
const ACCURATE_THRESHOLD: i32 = 60;
const COMPLETE_THRESHOLD: u32 = 80;

/// Average recency score over records that carry freshness text.
pub fn freshness(records: &[CanonicalRecord]) -> f64 {
    let scores: Vec<f64> = records
        .iter()
        .filter_map(|r| freshness_score(classify_freshness(&r.update_time)))
        .collect();
    if scores.is_empty() {
        return DEFAULT_FRESHNESS;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Plausibility score of a single record, starting from 100.
pub fn accuracy_score(record: &CanonicalRecord) -> i32 {
    let mut score = 100;

    if record.price < 500.0 {
        score -= 20;
    }
    if record.price > 50_000.0 {
        score -= 30;
    }
    if record.area < 10.0 {
        score -= 20;
    }
    if record.area > 500.0 {
        score -= 20;
    }

    let per_sqm = if record.area > 0.0 { record.price / record.area } else { 0.0 };
    if !(10.0..=1000.0).contains(&per_sqm) {
        score -= 15;
    }

    if !record.layout.is_empty() && !record.layout.contains('室') && !record.layout.contains('厅') {
        score -= 10;
    }

    score
}

/// Percentage of records whose plausibility score stays at or above 60.
pub fn accuracy(records: &[CanonicalRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let accurate = records
        .iter()
        .filter(|r| accuracy_score(r) >= ACCURATE_THRESHOLD)
        .count();
    accurate as f64 / records.len() as f64 * 100.0
}

/// Field coverage of a single record: 20 per required field, 5 per optional field.
pub fn completeness_score(record: &CanonicalRecord) -> u32 {
    let required = [
        is_present(&record.title),
        is_present(&record.district),
        record.price > 0.0,
        record.area > 0.0,
        is_present(&record.layout),
    ];
    let optional = [
        is_present(&record.community),
        is_present(&record.orientation),
        is_present(&record.floor),
        is_present(&record.tags),
    ];

    let required_points = required.iter().filter(|&&present| present).count() as u32 * 20;
    let optional_points = optional.iter().filter(|&&present| present).count() as u32 * 5;
    required_points + optional_points
}

/// Percentage of records scoring at least 80 on field coverage.
pub fn completeness(records: &[CanonicalRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let complete = records
        .iter()
        .filter(|r| completeness_score(r) >= COMPLETE_THRESHOLD)
        .count();
    complete as f64 / records.len() as f64 * 100.0
}

/// Combined quality. Each component is rounded before the unweighted mean.
pub fn quality_metrics(records: &[CanonicalRecord]) -> QualityMetrics {
    if records.is_empty() {
        return QualityMetrics::default();
    }

    let freshness = freshness(records).round();
    let accuracy = accuracy(records).round();
    let completeness = completeness(records).round();

    QualityMetrics {
        freshness,
        accuracy,
        completeness,
        total: ((freshness + accuracy + completeness) / 3.0).round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: f64, area: f64, layout: &str, update_time: &str) -> CanonicalRecord {
        CanonicalRecord {
            title: "整租·测试".into(),
            district: "天河".into(),
            layout: layout.into(),
            price,
            area,
            update_time: update_time.into(),
            ..Default::default()
        }
    }

    #[test]
    fn absent_freshness_is_excluded_from_average() {
        let records = vec![listing(3000.0, 50.0, "1室1厅", "3天前"), listing(3000.0, 50.0, "1室1厅", "null")];
        assert_eq!(freshness(&records), 80.0);
        let none = vec![listing(3000.0, 50.0, "1室1厅", "")];
        assert_eq!(freshness(&none), DEFAULT_FRESHNESS);
    }

    #[test]
    fn accuracy_penalties_accumulate() {
        assert_eq!(accuracy_score(&listing(3000.0, 50.0, "1室1厅", "")), 100);
        // cheap, tiny, ratio fine (300/5 = 60)
        assert_eq!(accuracy_score(&listing(300.0, 5.0, "1室", "")), 60);
        // expensive and huge: -30 -20, ratio 60000/600 = 100
        assert_eq!(accuracy_score(&listing(60000.0, 600.0, "5室", "")), 50);
        // ratio 3000/2 = 1500, small, no room marker
        assert_eq!(accuracy_score(&listing(3000.0, 2.0, "床位", "")), 55);
    }

    #[test]
    fn accuracy_percentage() {
        let records = vec![listing(3000.0, 50.0, "1室1厅", ""), listing(60000.0, 600.0, "5室", "")];
        assert_eq!(accuracy(&records), 50.0);
    }

    #[test]
    fn completeness_counts_required_and_optional_fields() {
        let bare = listing(3000.0, 50.0, "1室1厅", "");
        assert_eq!(completeness_score(&bare), 100);

        let mut unknown_layout = bare.clone();
        unknown_layout.layout = "未知".into();
        unknown_layout.title = "null".into();
        assert_eq!(completeness_score(&unknown_layout), 60);

        let mut full = unknown_layout.clone();
        full.community = "珠江花园".into();
        full.orientation = "南".into();
        full.floor = "中楼层".into();
        full.tags = "近地铁".into();
        assert_eq!(completeness_score(&full), 80);

        assert_eq!(completeness(&[bare, unknown_layout, full]).round(), 67.0);
    }

    #[test]
    fn total_uses_rounded_components() {
        let records = vec![listing(3000.0, 50.0, "1室1厅", "3天前")];
        let q = quality_metrics(&records);
        assert_eq!(q.freshness, 80.0);
        assert_eq!(q.accuracy, 100.0);
        assert_eq!(q.completeness, 100.0);
        assert_eq!(q.total, 93.0);
    }

    #[test]
    fn empty_dataset_scores_zero() {
        assert_eq!(quality_metrics(&[]), QualityMetrics::default());
    }
}

// Ordered accumulators: categories keep the order they were first seen in,
// so stable descending sorts break ties by first appearance.
use crate::model::{CanonicalRecord, NameValue};
use indexmap::IndexMap;

/// Groups records under a borrowed key. `None` keys are skipped.
pub fn group_by<'a, F>(records: &'a [CanonicalRecord], key: F) -> IndexMap<&'a str, Vec<&'a CanonicalRecord>>
where
    F: Fn(&'a CanonicalRecord) -> Option<&'a str>,
{
    let mut groups: IndexMap<&'a str, Vec<&'a CanonicalRecord>> = IndexMap::new();
    for record in records {
        if let Some(k) = key(record) {
            groups.entry(k).or_default().push(record);
        }
    }
    groups
}

/// Counts records per key. `None` keys are skipped.
pub fn count_by<'a, I, F>(items: I, key: F) -> IndexMap<&'a str, usize>
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
    F: Fn(&'a CanonicalRecord) -> Option<&'a str>,
{
    let mut counts: IndexMap<&'a str, usize> = IndexMap::new();
    for record in items {
        if let Some(k) = key(record) {
            *counts.entry(k).or_default() += 1;
        }
    }
    counts
}

/// Turns counts into `{name, value}` pairs sorted by count, descending.
pub fn ranked(counts: IndexMap<&str, usize>) -> Vec<NameValue> {
    let mut pairs: Vec<NameValue> = counts
        .into_iter()
        .map(|(name, value)| NameValue::new(name, value))
        .collect();
    pairs.sort_by(|a, b| b.value.cmp(&a.value));
    pairs
}

/// Stable descending sort on a numeric key.
pub fn sort_desc_by<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(district: &str) -> CanonicalRecord {
        CanonicalRecord {
            district: district.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let records = vec![record("b"), record("a"), record("c"), record("a"), record("b"), record("c")];
        let counts = count_by(&records, |r| Some(r.district.as_str()));
        let names: Vec<_> = ranked(counts).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn higher_counts_come_first() {
        let records = vec![record("x"), record("y"), record("y")];
        let ranked = ranked(count_by(&records, |r| Some(r.district.as_str())));
        assert_eq!(ranked[0], NameValue::new("y", 2));
        assert_eq!(ranked[1], NameValue::new("x", 1));
    }

    #[test]
    fn group_by_skips_none_keys() {
        let records = vec![record("x"), record(""), record("x")];
        let groups = group_by(&records, |r| (!r.district.is_empty()).then_some(r.district.as_str()));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["x"].len(), 2);
    }

    #[test]
    fn sort_desc_is_stable() {
        let mut items = vec![("a", 1.0), ("b", 2.0), ("c", 1.0)];
        sort_desc_by(&mut items, |i| i.1);
        assert_eq!(items, vec![("b", 2.0), ("a", 1.0), ("c", 1.0)]);
    }
}

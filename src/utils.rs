// Utility functions

/// Placeholder the crawler and preprocessor write for unknown values.
pub const UNKNOWN: &str = "未知";

/// Administrative suffix the preprocessor drops from district names.
pub const DISTRICT_SUFFIX: char = '区';

/// Coerces free text such as `"3500元/月"` or `"45.5㎡"` into a number.
///
/// Every character that is not an ASCII digit or `.` is removed, then the
/// longest leading decimal prefix is parsed. Anything unparsable becomes `0.0`.
pub fn parse_number(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    for (idx, c) in cleaned.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = idx + 1;
    }

    cleaned[..end].parse::<f64>().unwrap_or(0.0)
}

/// `"天河区"` -> `"天河"`. Only one trailing suffix is removed.
pub fn strip_district_suffix(name: &str) -> &str {
    let trimmed = name.trim();
    trimmed.strip_suffix(DISTRICT_SUFFIX).unwrap_or(trimmed)
}

/// True when a text field carries a real value rather than a sentinel.
pub fn is_present(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "null" && value != UNKNOWN
}

/// Empty category keys are reported under the unknown placeholder.
pub fn category_key(value: &str) -> &str {
    if value.is_empty() { UNKNOWN } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_strips_units() {
        assert_eq!(parse_number("3500元/月"), 3500.0);
        assert_eq!(parse_number("45.5㎡"), 45.5);
        assert_eq!(parse_number(" 1,200 "), 1200.0);
    }

    #[test]
    fn parse_number_keeps_leading_decimal_prefix() {
        assert_eq!(parse_number("12.5.3"), 12.5);
        assert_eq!(parse_number("."), 0.0);
        assert_eq!(parse_number("面议"), 0.0);
        assert_eq!(parse_number(""), 0.0);
    }

    #[test]
    fn strips_single_trailing_suffix() {
        assert_eq!(strip_district_suffix("天河区"), "天河");
        assert_eq!(strip_district_suffix("天河"), "天河");
        assert_eq!(strip_district_suffix(" 番禺区 "), "番禺");
    }

    #[test]
    fn sentinels_are_not_present() {
        assert!(!is_present(""));
        assert!(!is_present("null"));
        assert!(!is_present(UNKNOWN));
        assert!(is_present("南"));
    }
}

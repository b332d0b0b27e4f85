use chrono::Month;

/// All twelve months in calendar order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Zero-based calendar index (January = 0).
pub fn month_index(month: Month) -> u32 {
    month.number_from_month() - 1
}

/// Accepts full or three-letter month names, any case.
pub fn parse_month(name: &str) -> Option<Month> {
    name.trim().parse::<Month>().ok()
}

/// Whether `month` falls inside the closed range `start..=end`.
///
/// A range whose start comes after its end wraps the year boundary, so
/// November..February covers Nov, Dec, Jan and Feb.
pub fn is_month_in_range(month: Month, start: Month, end: Month) -> bool {
    let m = month_index(month);
    let s = month_index(start);
    let e = month_index(end);

    if s <= e {
        m >= s && m <= e
    } else {
        m >= s || m <= e
    }
}

/// String form of [`is_month_in_range`]; any unknown name yields `false`.
pub fn is_month_name_in_range(month: &str, start: &str, end: &str) -> bool {
    match (parse_month(month), parse_month(start), parse_month(end)) {
        (Some(m), Some(s), Some(e)) => is_month_in_range(m, s, e),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_range() {
        assert!(is_month_name_in_range("December", "November", "February"));
        assert!(is_month_name_in_range("January", "November", "February"));
        assert!(!is_month_name_in_range("March", "November", "February"));
    }

    #[test]
    fn test_plain_range_is_closed() {
        assert!(is_month_in_range(Month::March, Month::March, Month::April));
        assert!(is_month_in_range(Month::April, Month::March, Month::April));
        assert!(!is_month_name_in_range("June", "March", "April"));
    }

    #[test]
    fn test_single_month_range() {
        assert!(is_month_in_range(Month::May, Month::May, Month::May));
        assert!(!is_month_in_range(Month::June, Month::May, Month::May));
    }

    #[test]
    fn test_unknown_names() {
        assert!(!is_month_name_in_range("Smarch", "January", "December"));
        assert_eq!(parse_month("sep"), Some(Month::September));
        assert_eq!(parse_month(" july "), Some(Month::July));
    }

    #[test]
    fn test_month_table_order() {
        for (i, month) in MONTHS.iter().enumerate() {
            assert_eq!(month_index(*month) as usize, i);
        }
    }
}

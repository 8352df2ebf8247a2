use once_cell::sync::Lazy;
use regex::Regex;

/// `YYYY-MM-DD HH:MM:SS`, any single whitespace between date and time. Nothing else.
static DATE_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}\s[0-9]{2}:[0-9]{2}:[0-9]{2}$").unwrap()
});

pub fn is_date_string(s: &str) -> bool {
    DATE_TIME_REGEX.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_date_and_time() {
        assert!(is_date_string("2023-01-01 00:00:00"));
        assert!(is_date_string("1999-12-31\t23:59:59"));
    }

    #[test]
    fn rejects_partial_or_iso_forms() {
        assert!(!is_date_string("2023-01-01"));
        assert!(!is_date_string("2023-01-01T00:00:00"));
        assert!(!is_date_string("2023-01-01 00:00:00Z"));
        assert!(!is_date_string(" 2023-01-01 00:00:00"));
        assert!(!is_date_string("２０２３-01-01 00:00:00")); // full-width digits
    }
}

use chrono::{NaiveDate, NaiveTime};

/// `YYYY-MM-DD`
pub fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok()
}

/// `HH:MM` или `HH:MM:SS`
pub fn is_valid_time(value: &str) -> bool {
    let v = value.trim();
    NaiveTime::parse_from_str(v, "%H:%M").is_ok() || NaiveTime::parse_from_str(v, "%H:%M:%S").is_ok()
}

/// `2024-03-05` -> `05.03.2024`; некорректное значение возвращается как есть
pub fn format_date(value: &str) -> String {
    let head = value.get(..10).unwrap_or(value);
    match NaiveDate::parse_from_str(head, "%Y-%m-%d") {
        Ok(d) => d.format("%d.%m.%Y").to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_and_times() {
        assert!(is_valid_date("2024-02-29"));
        assert!(!is_valid_date("2023-02-29"));
        assert!(!is_valid_date("29/02/2024"));
        assert!(is_valid_time("09:30"));
        assert!(is_valid_time("23:59:59"));
        assert!(!is_valid_time("24:00"));
        assert_eq!(format_date("2024-03-05T10:00:00Z"), "05.03.2024");
        assert_eq!(format_date("—"), "—");
    }
}

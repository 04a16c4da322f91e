//! Formatting of the RFC 3339 timestamps the backend sends.

/// "2024-03-15T14:02:26.123Z" -> "2024-03-15 14:02"
pub fn format_timestamp(value: &str) -> String {
    let Some((date, time)) = value.split_once('T') else {
        return value.to_string();
    };
    let hh_mm: String = time.chars().take(5).collect();
    if hh_mm.len() == 5 && hh_mm.as_bytes()[2] == b':' {
        format!("{} {}", date, hh_mm)
    } else {
        date.to_string()
    }
}

/// Date part only: "2024-03-15T14:02:26Z" -> "2024-03-15". `None` renders as "-".
pub fn format_date_opt(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.split('T').next().unwrap_or(v).to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-03-15T14:02:26.123Z"), "2024-03-15 14:02");
        assert_eq!(format_timestamp("2024-12-31T23:59:59+03:00"), "2024-12-31 23:59");
        assert_eq!(format_timestamp("2024-12-31"), "2024-12-31");
        assert_eq!(format_timestamp("2024-12-31T"), "2024-12-31");
    }

    #[test]
    fn test_format_date_opt() {
        assert_eq!(format_date_opt(Some("2024-03-15T14:02:26Z")), "2024-03-15");
        assert_eq!(format_date_opt(Some("")), "-");
        assert_eq!(format_date_opt(None), "-");
    }
}

//! Text formatting for simulation output

use jiff::ToSpan;
use jiff::civil::Date;

/// Format a fraction as a percentage (0.0525 -> "5.25%")
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a portfolio value on the base-100 scale
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

/// Label for month `index` (0 = start), `YYYY-MM` when a start date is known
pub fn month_label(start: Option<Date>, index: usize) -> String {
    match start {
        Some(date) => date
            .saturating_add((index as i64).months())
            .strftime("%Y-%m")
            .to_string(),
        None => format!("M{index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0525), "5.25%");
        assert_eq!(format_percentage(-0.11037), "-11.04%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(100.0), "100.00");
        assert_eq!(format_value(103.633360933), "103.63");
    }

    #[test]
    fn test_month_label() {
        let start = jiff::civil::date(2024, 11, 1);
        assert_eq!(month_label(Some(start), 0), "2024-11");
        assert_eq!(month_label(Some(start), 2), "2025-01");
        assert_eq!(month_label(None, 7), "M7");
    }
}

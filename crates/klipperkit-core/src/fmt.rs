//! Numeric rendering shared by macro assembly and property lookup.

/// Render a float with up to four decimal places, stripping trailing zeros
/// and any dangling decimal point: `0.2000` becomes `0.2`, `0.0` becomes `0`.
pub fn format_float(value: f64) -> String {
    let rendered = format!("{:.4}", value);
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Render a temperature with exactly one decimal place: `200` becomes `200.0`.
pub fn format_temp(value: f64) -> String {
    format!("{:.1}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float_strips_trailing_zeros() {
        assert_eq!(format_float(0.2), "0.2");
        assert_eq!(format_float(0.20000), "0.2");
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(12.0), "12");
        assert_eq!(format_float(1.2345), "1.2345");
        assert_eq!(format_float(0.4), "0.4");
    }

    #[test]
    fn test_format_float_is_idempotent() {
        let once = format_float(0.20000);
        let twice = format_float(once.parse::<f64>().unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_format_temp_one_decimal() {
        assert_eq!(format_temp(200.0), "200.0");
        assert_eq!(format_temp(60.0), "60.0");
        assert_eq!(format_temp(210.5), "210.5");
    }
}

/// Formats a money value the way the tables show it, with the rupee prefix
/// and cents only when they matter.
pub fn format_money(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("₹{:.0}", value)
    } else {
        format!("₹{:.2}", value)
    }
}

/// Formats a count-like value, dropping a superfluous `.0`.
pub fn format_count(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts_have_no_cents() {
        assert_eq!(format_money(61999.0), "₹61999");
        assert_eq!(format_money(100.5), "₹100.50");
        assert_eq!(format_money(-250.0), "₹-250");
    }

    #[test]
    fn counts_drop_trailing_zero() {
        assert_eq!(format_count(3.0), "3");
        assert_eq!(format_count(2.5), "2.50");
    }
}

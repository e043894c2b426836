//! Presentation of results.
//!
//! Output never uses exponent notation, so a formatted non-negative result
//! can be typed back into an expression unchanged.

/// Fractional digits kept when displaying a result.
pub const MAX_FRACTION_DIGITS: usize = 10;

/// Format a result for the display: no trailing zeros, no dangling point.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let s = if value.is_sign_positive() { "Infinity" } else { "-Infinity" };
        return s.to_string();
    }

    let formatted = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        // -0, or a negative value that rounds away
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

/// Format a result so it can be spliced into an expression as one operand.
///
/// Unlike [`format_number`] this keeps every digit, so the operand parses
/// back to exactly `value`. There is no unary minus, so negative values are
/// written as `(0-x)`.
pub fn format_operand(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_sign_negative() {
        format!("(0-{})", -value)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_have_no_point() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn fractions_are_trimmed() {
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_number(2.0 / 3.0), "0.6666666667");
    }

    #[test]
    fn zero_has_no_sign() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-1e-12), "0");
    }

    #[test]
    fn non_finite() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn operands() {
        assert_eq!(format_operand(2.5), "2.5");
        assert_eq!(format_operand(-2.5), "(0-2.5)");
        assert_eq!(format_operand(-0.0), "0");
    }

    #[test]
    fn operands_keep_full_precision() {
        let third = 1.0 / 3.0;
        assert_eq!(format_operand(third).parse::<f64>(), Ok(third));
        assert_eq!(format_operand(-third), "(0-0.3333333333333333)");
        assert_eq!(format_operand(1e21), "1000000000000000000000");
        assert_eq!(format_operand(1e-7), "0.0000001");
    }
}

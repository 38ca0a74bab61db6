/// Magnitude below which an integral `f64` is printed without a fractional
/// part.
pub const INTEGER_DISPLAY_LIMIT: f64 = 1e15;

/// Returns `true` if `value` has no fractional part and is small enough to be
/// printed as an integer.
///
/// # Example
/// ```
/// use madola::util::num::is_display_integer;
///
/// assert!(is_display_integer(42.0));
/// assert!(!is_display_integer(0.5));
/// assert!(!is_display_integer(1e16));
/// ```
#[must_use]
pub fn is_display_integer(value: f64) -> bool {
    value.is_finite() && value.floor() == value && value.abs() < INTEGER_DISPLAY_LIMIT
}

/// Formats a number the way MADOLA prints scalars.
///
/// Integral values print without a decimal point. Everything else prints with
/// three decimals, dropping trailing zeros and a dangling `.`.
///
/// # Parameters
/// - `value`: The number to format.
///
/// # Returns
/// The printed form.
///
/// # Example
/// ```
/// use madola::util::num::format_number;
///
/// assert_eq!(format_number(5.0), "5");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(1.0 / 3.0), "0.333");
/// assert_eq!(format_number(0.0001), "0");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_number(value: f64) -> String {
    if is_display_integer(value) {
        return format!("{}", value as i64);
    }
    if !value.is_finite() {
        return non_finite(value);
    }
    trim_fraction(format!("{value:.3}"))
}

/// Formats a number like C's `%g` with six significant digits.
///
/// Used for array elements and complex parts that are not integral.
///
/// # Example
/// ```
/// use madola::util::num::format_general;
///
/// assert_eq!(format_general(0.5), "0.5");
/// assert_eq!(format_general(3.14159265), "3.14159");
/// assert_eq!(format_general(1234567.0), "1.23457e+06");
/// assert_eq!(format_general(0.00001), "1e-05");
/// ```
#[must_use]
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return non_finite(value);
    }

    // Rounding to six significant digits can bump the exponent, so take it from
    // the rounded scientific form.
    let scientific = format!("{value:.5e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}",
                       trim_fraction(mantissa.to_string()),
                       exponent.unsigned_abs());
    }

    let decimals = usize::try_from(5 - exponent).unwrap_or(0);
    trim_fraction(format!("{value:.decimals$}"))
}

/// Formats a number the way `std::to_string(double)` does: six decimals.
///
/// # Example
/// ```
/// use madola::util::num::format_fixed6;
///
/// assert_eq!(format_fixed6(4.0), "4.000000");
/// assert_eq!(format_fixed6(1.5), "1.500000");
/// ```
#[must_use]
pub fn format_fixed6(value: f64) -> String {
    format!("{value:.6}")
}

/// Formats an array element: integral values as integers, others as `%g`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_element(value: f64) -> String {
    if is_display_integer(value) {
        format!("{}", value as i64)
    } else {
        format_general(value)
    }
}

/// Converts an `f64` to `i32` only if it is integral and in range.
///
/// ## Parameters
/// - `value`: The number to convert.
/// - `fractional`: Error returned when `value` has a fractional part.
/// - `out_of_range`: Error returned when `value` does not fit in an `i32`.
///
/// ## Example
/// ```
/// use madola::util::num::f64_to_i32_checked;
///
/// assert_eq!(f64_to_i32_checked(3.0, "frac", "range"), Ok(3));
/// assert_eq!(f64_to_i32_checked(3.5, "frac", "range"), Err("frac"));
/// assert_eq!(f64_to_i32_checked(1e12, "frac", "range"), Err("range"));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i32_checked<E>(value: f64, fractional: E, out_of_range: E) -> Result<i32, E> {
    if !value.is_finite() || value.floor() != value {
        return Err(fractional);
    }
    if value > f64::from(i32::MAX) || value < f64::from(i32::MIN) {
        return Err(out_of_range);
    }
    Ok(value as i32)
}

/// Removes trailing zeros after the decimal point, then a trailing `.`.
fn trim_fraction(mut text: String) -> String {
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').len();
        text.truncate(trimmed);
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}

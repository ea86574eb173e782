use crate::interpreter::number::Number;

/// Smallest magnitude printed without an exponent.
const SMALLEST_PLAIN_MAGNITUDE: f64 = 1e-4;
/// Magnitude from which reals are printed with an exponent.
const LARGEST_PLAIN_MAGNITUDE: f64 = 1e16;
/// 2^63, the first real outside of the `i64` range.
const INTEGER_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Formats a result for display.
///
/// Reals without a fractional part are shown as integers, so `4 / 2` displays as `2`
/// rather than `2.0`.
///
/// # Examples
///
/// ```
/// use safe_calculator::interpreter::format::format_number;
/// use safe_calculator::interpreter::Number;
///
/// assert_eq!(format_number(Number::Real(2.0)), "2");
/// assert_eq!(format_number(Number::Real(2.5)), "2.5");
/// ```
pub fn format_number(value: Number) -> String {
    match value {
        Number::Integer(value) => value.to_string(),
        Number::Real(value) if value.is_finite() && value.fract() == 0.0 => {
            if (-INTEGER_LIMIT..INTEGER_LIMIT).contains(&value) {
                (value as i64).to_string()
            } else {
                format!("{:.0}", value)
            }
        }
        Number::Real(value) => format_real(value),
    }
}

/// Formats a real in its shortest round-trip form, always marking it as a real
/// (`3.0`, `0.1`, `1e-05`, `1e+16`).
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0
        && !(SMALLEST_PLAIN_MAGNITUDE..LARGEST_PLAIN_MAGNITUDE).contains(&magnitude)
    {
        return format_with_exponent(value);
    }

    let plain = format!("{}", value);
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

fn format_with_exponent(value: f64) -> String {
    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => scientific,
    }
}

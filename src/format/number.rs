//! Fixed-precision, sign-padded number formatting
//!
//! Output matches C's `printf("% .Nf")`: a leading space for non-negative
//! values, `-` for negative ones (negative zero included). Rust's float
//! formatting never consults the locale, so the decimal point is always `.`.
//!
//! Rounding works on the shortest decimal form of the value and goes half away
//! from zero, so `0.03125` at four decimals is `0.0313`.

use std::iter;

/// Separator between fields of one record
pub const FIELD_SEPARATOR: &str = "  ";

/// Append `value` with `precision` decimals to `out`
pub fn write_fixed(out: &mut String, value: f64, precision: usize) {
    if value.is_nan() {
        out.push_str("NaN");
        return;
    }
    out.push(if value.is_sign_negative() { '-' } else { ' ' });
    if value.is_infinite() {
        out.push_str("Infinity");
    } else {
        write_rounded(out, value.abs(), precision);
    }
}

/// Append a finite, non-negative `magnitude` rounded half up to `precision` decimals
fn write_rounded(out: &mut String, magnitude: f64, precision: usize) {
    // `Display` for f64 gives the shortest round-trip digits and never an exponent
    let shortest = magnitude.to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(iter::repeat(b'0')).take(precision))
        .collect();
    if frac_part.as_bytes().get(precision).is_some_and(|&d| d >= b'5') {
        carry_one(&mut digits);
    }

    let int_len = digits.len() - precision;
    for (i, &digit) in digits.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(digit));
    }
}

/// Add one unit in the last place to a string of ASCII digits
fn carry_one(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Format a single value
#[must_use]
pub fn fixed(value: f64, precision: usize) -> String {
    let mut out = String::new();
    write_fixed(&mut out, value, precision);
    out
}

/// Format several values separated by [`FIELD_SEPARATOR`]
#[must_use]
pub fn fixed_fields(values: &[f64], precision: usize) -> String {
    let mut out = String::new();
    for (i, &value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(FIELD_SEPARATOR);
        }
        write_fixed(&mut out, value, precision);
    }
    out
}

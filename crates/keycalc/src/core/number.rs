//! Display string <-> f64 conversion
//!
//! The display is string backed and every operation round-trips through
//! `f64`. Parsing follows the lenient prefix rules of ECMAScript
//! `parseFloat` and printing follows `Number::toString`, so that values like
//! `0.1 + 0.2` show as `0.30000000000000004` and `1e21` shows as `1e+21`.

/// Parses the longest numeric prefix of `input`.
///
/// Leading whitespace is skipped. Accepts an optional sign, `Infinity`, a
/// decimal literal with optional fraction and exponent. Returns `NaN` when no
/// numeric prefix exists.
#[must_use]
pub fn parse_display(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    if s[i..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        let frac_digits = j - frac_start;
        if mantissa_digits + frac_digits > 0 {
            mantissa_digits += frac_digits;
            i = j;
        }
    }

    if mantissa_digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    s[..i].parse::<f64>().unwrap_or(f64::NAN)
}

/// Formats a number the way the display shows it.
///
/// Uses the shortest digit string that round-trips, switching to exponent
/// notation outside `1e-7 <= |v| < 1e21`. Negative zero prints as `0`.
#[must_use]
pub fn format_display(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value < 0.0 {
        return format!("-{}", format_display(-value));
    }

    let (digits, exponent) = shortest_digits(value);
    let k = digits.len() as i32;
    // value = 0.d1d2..dk * 10^n
    let n = exponent + 1;

    if k <= n && n <= 21 {
        let mut out = digits;
        out.push_str(&"0".repeat((n - k) as usize));
        out
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let sign = if e >= 0 { '+' } else { '-' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{}", e.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", e.abs())
        }
    }
}

/// Shortest round-trip significant digits and decimal exponent of a finite,
/// positive value.
fn shortest_digits(value: f64) -> (String, i32) {
    let sci = format!("{value:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    (digits.to_string(), exponent.parse().unwrap_or(0))
}

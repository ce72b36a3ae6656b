//! Lexical number classification and canonical number text.

use rust_decimal::Decimal;

use crate::error::DecodeError;
use crate::value::Value;

/// Shape of a JSON number token, decided from its text alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberShape {
    Integral,
    Fractional,
    Scientific,
}

pub(crate) fn classify(literal: &str) -> NumberShape {
    let mut shape = NumberShape::Integral;
    for b in literal.bytes() {
        match b {
            b'e' | b'E' => return NumberShape::Scientific,
            b'.' => shape = NumberShape::Fractional,
            _ => {}
        }
    }
    shape
}

/// Turn a validated number token into an integer or decimal value.
///
/// Integral tokens that overflow `i64` fall back to the decimal range before failing.
pub(crate) fn infer(literal: &str, offset: usize) -> Result<Value, DecodeError> {
    let out_of_range = || DecodeError::NumberOutOfRange {
        offset,
        literal: literal.to_string(),
    };
    match classify(literal) {
        NumberShape::Integral => match literal.parse::<i64>() {
            Ok(i) => Ok(Value::Integer(i)),
            Err(_) => literal
                .parse::<Decimal>()
                .map(Value::Decimal)
                .map_err(|_| out_of_range()),
        },
        NumberShape::Fractional => literal
            .parse::<Decimal>()
            .map(Value::Decimal)
            .map_err(|_| out_of_range()),
        NumberShape::Scientific => scientific(literal)
            .map(Value::Decimal)
            .ok_or_else(out_of_range),
    }
}

/// Exponent notation as an exact decimal. Digits past the 28th fractional place are
/// rounded half away from zero; `None` when the magnitude exceeds the decimal range.
fn scientific(literal: &str) -> Option<Decimal> {
    let (mantissa, exponent) = literal.split_once(['e', 'E'])?;
    let mut value: Decimal = mantissa.parse().ok()?;
    if value.is_zero() {
        return Some(Decimal::ZERO);
    }
    let exponent = exponent.parse::<i64>().unwrap_or(if exponent.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    });
    let scale = u64::from(value.scale());
    if exponent >= 0 {
        let shift = scale.min(exponent.unsigned_abs());
        value.set_scale((scale - shift) as u32).ok()?;
        for _ in shift..exponent.unsigned_abs() {
            value = value.checked_mul(Decimal::TEN)?;
        }
        return Some(value);
    }
    let scale = scale.saturating_add(exponent.unsigned_abs());
    if scale <= u64::from(MAX_SCALE) {
        value.set_scale(scale as u32).ok()?;
        return Some(value);
    }
    let excess = scale - u64::from(MAX_SCALE);
    // 10^38 still fits an i128 and exceeds any 96-bit mantissa
    if excess > 38 {
        return Some(Decimal::ZERO);
    }
    let digits = value.mantissa();
    let divisor = 10i128.pow(excess as u32);
    let remainder = (digits % divisor).abs();
    let mut rounded = digits / divisor;
    if remainder >= divisor - remainder {
        rounded += digits.signum();
    }
    Decimal::try_from_i128_with_scale(rounded, MAX_SCALE).ok()
}

const MAX_SCALE: u32 = 28;

/// Shortest exact text for a decimal: no exponent, no trailing fractional zeros, `-0` as `0`.
pub(crate) fn format_decimal(value: &Decimal) -> String {
    value.normalize().to_string()
}

/// Format a finite float in canonical form.
/// Requirements:
/// - shortest representation that round-trips
/// - no exponent notation
/// - no trailing fractional zeros (strip decimal point if none remains)
/// - -0 normalized to 0
pub(crate) fn format_canonical_float<F: ryu::Float>(value: F) -> String {
    let mut buf = ryu::Buffer::new();
    let raw = buf.format_finite(value);
    let (negative, magnitude) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let body = if let Some(exp_index) = magnitude.find(['e', 'E']) {
        let mantissa = &magnitude[..exp_index];
        let exp: i32 = magnitude[exp_index + 1..].parse().unwrap_or(0);
        expand_exponent(mantissa, exp)
    } else {
        String::from(magnitude)
    };
    let trimmed = trim_fraction(body);
    if trimmed == "0" || !negative {
        return trimmed;
    }
    let mut out = String::with_capacity(trimmed.len() + 1);
    out.push('-');
    out.push_str(&trimmed);
    out
}

fn expand_exponent(mantissa: &str, exp: i32) -> String {
    let mut digits = Vec::with_capacity(mantissa.len());
    let mut point_index = None;
    for &b in mantissa.as_bytes() {
        if b == b'.' {
            point_index = Some(digits.len());
        } else {
            digits.push(b);
        }
    }
    let point_index = point_index.unwrap_or(digits.len());

    let mut result = String::with_capacity(digits.len() + exp.unsigned_abs() as usize + 2);
    if exp >= 0 {
        let target = point_index + exp as usize;
        if target >= digits.len() {
            result.extend(digits.iter().map(|&d| d as char));
            result.extend(core::iter::repeat_n('0', target - digits.len()));
        } else {
            push_with_point(&mut result, &digits, target);
        }
    } else {
        let shift = exp.unsigned_abs() as usize;
        if shift >= point_index {
            result.push_str("0.");
            result.extend(core::iter::repeat_n('0', shift - point_index));
            result.extend(digits.iter().map(|&d| d as char));
        } else {
            push_with_point(&mut result, &digits, point_index - shift);
        }
    }
    result
}

fn push_with_point(out: &mut String, digits: &[u8], split: usize) {
    for (idx, &d) in digits.iter().enumerate() {
        if idx == split {
            out.push('.');
        }
        out.push(d as char);
    }
}

fn trim_fraction(mut s: String) -> String {
    if let Some(dot_pos) = s.find('.') {
        let mut end = s.len();
        while end > dot_pos + 1 && s.as_bytes()[end - 1] == b'0' {
            end -= 1;
        }
        if end > dot_pos && s.as_bytes()[end - 1] == b'.' {
            end -= 1;
        }
        s.truncate(end);
    }
    s
}

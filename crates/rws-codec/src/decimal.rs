use std::borrow::Cow;

/// Exponents past this magnitude leave the `f64` range, so they are not
/// treated as numbers.
const MAX_EXPONENT: u32 = 400;

/// A decimal literal, held as its digit strings.
///
/// Save files store numbers as text, and the codecs need exact control over
/// individual fractional digits, so values never pass through `f64`. The
/// accepted form is an optional sign, a mantissa with at least one digit on
/// either side of an optional `.`, and an optional `e`/`E` exponent.
/// Surrounding ASCII whitespace is ignored. An exponent is folded into the
/// digit strings at parse time, so `"1.5E-05"` holds the same digits as
/// `"0.000015"`. `nan` and `inf` are rejected.
///
/// ```text
///   "-12.0375"
///    │ │  └──── fraction  "0375"
///    │ └─────── integer   "12"
///    └───────── negative  true
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecimalText<'a> {
    negative: bool,
    integer: Cow<'a, str>,
    fraction: Cow<'a, str>,
}

impl<'a> DecimalText<'a> {
    pub fn parse(text: &'a str) -> Option<Self> {
        let text = text.trim_matches(|c: char| c.is_ascii_whitespace());
        let (negative, unsigned) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(at) => (&unsigned[..at], Some(parse_exponent(&unsigned[at + 1..])?)),
            None => (unsigned, None),
        };

        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }
        if !all_digits(integer) || !all_digits(fraction) {
            return None;
        }

        let (integer, fraction) = match exponent {
            None | Some(0) => (Cow::Borrowed(integer), Cow::Borrowed(fraction)),
            Some(exponent) => {
                let (integer, fraction) = shift_point(integer, fraction, exponent)?;
                (Cow::Owned(integer), Cow::Owned(fraction))
            }
        };

        Some(Self {
            negative,
            integer,
            fraction,
        })
    }

    /// Number of digits after the decimal point, once any exponent is
    /// applied.
    pub fn fraction_digits(&self) -> usize {
        self.fraction.len()
    }

    /// Value multiplied by `10^places`, truncated toward zero.
    ///
    /// Returns `None` if the result does not fit in an `i128`.
    pub fn scaled_truncated(&self, places: usize) -> Option<i128> {
        let magnitude = self.scaled_magnitude(places)?;
        Some(if self.negative { -magnitude } else { magnitude })
    }

    /// Value multiplied by `10^places`, rounded half away from zero.
    ///
    /// Returns `None` if the result does not fit in an `i128`.
    pub fn scaled_rounded(&self, places: usize) -> Option<i128> {
        let mut magnitude = self.scaled_magnitude(places)?;
        if self.fraction.as_bytes().get(places).is_some_and(|&d| d >= b'5') {
            magnitude = magnitude.checked_add(1)?;
        }
        Some(if self.negative { -magnitude } else { magnitude })
    }

    /// Largest integer not greater than the value.
    pub fn floor(&self) -> Option<i128> {
        let integer = parse_digits(&self.integer)?;
        if !self.negative {
            return Some(integer);
        }
        let has_fraction = self.fraction.bytes().any(|d| d != b'0');
        Some(-integer - i128::from(has_fraction))
    }

    fn scaled_magnitude(&self, places: usize) -> Option<i128> {
        let scale = 10i128.checked_pow(u32::try_from(places).ok()?)?;
        let integer = parse_digits(&self.integer)?.checked_mul(scale)?;

        let kept = &self.fraction[..self.fraction.len().min(places)];
        let mut fraction = parse_digits(kept)?;
        for _ in kept.len()..places {
            fraction = fraction.checked_mul(10)?;
        }
        integer.checked_add(fraction)
    }
}

/// Signed exponent digits, bounded by [`MAX_EXPONENT`].
fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !all_digits(digits) {
        return None;
    }
    let digits = digits.trim_start_matches('0');
    if digits.len() > 3 {
        return None;
    }
    let magnitude: u32 = if digits.is_empty() { 0 } else { digits.parse().ok()? };
    if magnitude > MAX_EXPONENT {
        return None;
    }
    let magnitude = i64::from(magnitude);
    Some(if negative { -magnitude } else { magnitude })
}

/// Move the decimal point of `integer.fraction` by `exponent` places,
/// padding with zeros where the point leaves the digits behind.
fn shift_point(integer: &str, fraction: &str, exponent: i64) -> Option<(String, String)> {
    let digits = format!("{integer}{fraction}");
    let point = i64::try_from(integer.len()).ok()?.checked_add(exponent)?;
    if point <= 0 {
        let zeros = "0".repeat(usize::try_from(point.unsigned_abs()).ok()?);
        return Some((String::new(), zeros + &digits));
    }
    let point = usize::try_from(point).ok()?;
    if point >= digits.len() {
        let zeros = "0".repeat(point - digits.len());
        return Some((digits + &zeros, String::new()));
    }
    let (integer, fraction) = digits.split_at(point);
    Some((integer.to_string(), fraction.to_string()))
}

/// Render `value / 10^places` with exactly `places` fractional digits.
///
/// `format_fixed(-1745, 3)` is `"-1.745"`; `format_fixed(418_211, 8)` is
/// `"0.00418211"`.
pub fn format_fixed(value: i128, places: usize) -> String {
    let Some(scale) = u32::try_from(places)
        .ok()
        .and_then(|p| 10u128.checked_pow(p))
    else {
        return value.to_string();
    };
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    if places == 0 {
        return format!("{sign}{magnitude}");
    }
    let integer = magnitude / scale;
    let fraction = magnitude % scale;
    format!("{sign}{integer}.{fraction:0places$}")
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_digits(digits: &str) -> Option<i128> {
    digits.bytes().try_fold(0i128, |acc, d| {
        acc.checked_mul(10)?.checked_add(i128::from(d - b'0'))
    })
}

//! Display formatting for the panel's equity, ROI, and activity figures.
//!
//! All functions are pure. Absent or non-finite input degrades to an
//! empty string (money, percent) or the `-` placeholder (activity).

pub const CURRENCY_PREFIX: &str = "$";
pub const PLACEHOLDER: &str = "-";

/// Fractional digits shown for the activity index.
pub const ACTIVITY_DECIMALS: usize = 3;

fn finite(v: Option<f64>) -> Option<f64> {
    // `+ 0.0` folds negative zero into zero so it never prints as "-0.00".
    v.filter(|x| x.is_finite()).map(|x| x + 0.0)
}

/// `1234.5` -> `"$1,234.50"`. Negative values read `"$-1,234.50"`.
pub fn format_currency(v: Option<f64>) -> String {
    match finite(v) {
        Some(x) => format!("{CURRENCY_PREFIX}{}", group_thousands(&format!("{x:.2}"))),
        None => String::new(),
    }
}

/// `-0.19` -> `"-0.19%"`, `3.0` -> `"+3.00%"`.
pub fn format_percent(v: Option<f64>) -> String {
    match finite(v) {
        Some(x) => {
            let sign = if x >= 0.0 { "+" } else { "" };
            format!("{sign}{x:.2}%")
        }
        None => String::new(),
    }
}

/// `12500.0` -> `"12500.000"`.
pub fn format_activity(v: Option<f64>) -> String {
    match finite(v) {
        Some(x) => format!("{x:.prec$}", prec = ACTIVITY_DECIMALS),
        None => PLACEHOLDER.to_string(),
    }
}

/// Insert `,` every three digits of the integer part of a plain decimal
/// string such as `"-1234567.50"`.
fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

// ---------------------------------------------------------------------------
// Number formatting for metric widgets and the raw data table
// ---------------------------------------------------------------------------

/// Shown in place of a number that cannot be displayed.
pub const NOT_AVAILABLE: &str = "N/A";

/// `1234.5` → `"$1,234.50"`, `-10.0` → `"-$10.00"`.
pub fn currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let formatted = add_thousands_separator(&format!("{:.2}", value.abs()));
    // No sign when the value rounds to zero.
    let is_zero = formatted.bytes().all(|b| matches!(b, b'0' | b'.' | b','));
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{sign}${formatted}")
}

/// Margin with one decimal, or `"N/A"` when undefined.
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}%"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Insert `,` every three digits of the integer part of an unsigned decimal.
fn add_thousands_separator(s: &str) -> String {
    let (integer, decimal) = match s.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (s, None),
    };

    let len = integer.len();
    let mut result = String::with_capacity(len + len / 3 + 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    if let Some(d) = decimal {
        result.push('.');
        result.push_str(d);
    }
    result
}

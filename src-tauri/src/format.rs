/// Compact human-readable rendering of a count: `999`, `1.5K`, `2.3M`, `4.0B`.
///
/// Negative, NaN and infinite input render as `"0"`.
pub fn format_large_number(num: f64) -> String {
    if !num.is_finite() || num <= 0.0 {
        return "0".to_string();
    }
    if num < 1_000.0 {
        format!("{}", num.round() as u64)
    } else if num < 1_000_000.0 {
        format!("{}K", to_fixed_1(num / 1_000.0))
    } else if num < 1_000_000_000.0 {
        format!("{}M", to_fixed_1(num / 1_000_000.0))
    } else {
        format!("{}B", to_fixed_1(num / 1_000_000_000.0))
    }
}

/// Percentage slot text, e.g. `"50%"`.
pub fn format_ratio(percent: u32) -> String {
    format!("{percent}%")
}

/// One decimal place with halves rounded up (`1.25` -> `"1.3"`), which
/// `{:.1}` alone does not guarantee.
fn to_fixed_1(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

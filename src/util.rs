// Formatting helpers for overlay labels

/// `mm:ss`; minutes keep growing past an hour rather than rolling into hours.
pub fn format_clock(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 { secs.floor() as u64 } else { 0 };
    let m = total / 60;
    let s = total % 60;
    format!("{:02}:{:02}", m, s)
}

pub fn format_signed_seconds(delta: f64) -> String {
    let sign = if delta < 0.0 { '-' } else { '+' };
    let magnitude = if delta.is_finite() { delta.abs().round() as u64 } else { 0 };
    format!("{}{}s", sign, magnitude)
}

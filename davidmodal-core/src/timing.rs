//! Reading transition timing back out of computed style

use std::time::Duration;

/// Convert a computed `animation-duration` value into a wait.
///
/// Accepts `s` and `ms` units. A comma-separated list (one entry per animation) waits
/// for the longest one. Entries that don't parse, and negative values, count as zero, so
/// a container without an animation is finalized on the next timer tick. Values too
/// large for a `Duration` saturate to `Duration::MAX`.
pub fn parse_css_time(value: &str) -> Duration {
    value
        .split(',')
        .filter_map(parse_single)
        .max()
        .unwrap_or(Duration::ZERO)
}

fn parse_single(entry: &str) -> Option<Duration> {
    let entry = entry.trim().to_ascii_lowercase();
    let (number, scale) = if let Some(ms) = entry.strip_suffix("ms") {
        (ms, 1.0)
    } else if let Some(s) = entry.strip_suffix('s') {
        (s, 1000.0)
    } else {
        return None;
    };
    let millis = number.trim().parse::<f64>().ok()? * scale;
    if !millis.is_finite() || millis <= 0.0 {
        return Some(Duration::ZERO);
    }
    Some(Duration::try_from_secs_f64(millis / 1000.0).unwrap_or(Duration::MAX))
}

//! Duration rendering shared by the summary file and the event log.

/// Placeholder rendered when a value has not been observed yet.
pub const PLACEHOLDER: &str = "\u{2014}";

/// Render a lap duration as `m:ss.mmm`, or the placeholder when unset.
pub fn format_lap_ms(ms: Option<u64>) -> String {
    let Some(ms) = ms else {
        return PLACEHOLDER.to_string();
    };
    let (secs, millis) = (ms / 1000, ms % 1000);
    let (mins, secs) = (secs / 60, secs % 60);
    format!("{mins}:{secs:02}.{millis:03}")
}

/// Render a best-lap duration as seconds with exactly the digits needed,
/// suffixed `s`: trailing zero fractional digits are trimmed, then a bare
/// trailing decimal point.
pub fn format_best_secs(ms: Option<u64>) -> String {
    let Some(ms) = ms else {
        return PLACEHOLDER.to_string();
    };
    let text = format!("{:.3}", ms as f64 / 1000.0);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}s")
}

//! Small string helpers shared by the client and the pipeline logs.

/// Truncate a string for logging or error messages.
///
/// Strings longer than `max` bytes are cut at the nearest char boundary at or
/// below `max` and get `"…(+N bytes)"` appended.
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Render at most `n` scores as `[5.0, 2.5, ...]` for the debug log.
pub fn score_sample(scores: impl IntoIterator<Item = f64>, n: usize) -> String {
    let parts: Vec<String> = scores.into_iter().take(n).map(|s| format!("{s:.1}")).collect();
    format!("[{}]", parts.join(", "))
}

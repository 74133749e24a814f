
/// Keeps the first `max_chars` characters; never splits a multi-byte character.
#[inline]
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}


#[inline]
pub fn safe_truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", safe_truncate(s, max_chars))
    } else {
        s.to_string()
    }
}

/// Distance for display, one decimal place.
pub fn format_km(distance: f64) -> String {
    format!("{distance:.1} km")
}

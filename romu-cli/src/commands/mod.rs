pub(crate) mod browse;
pub(crate) mod config;
pub(crate) mod dat;
pub(crate) mod enrich;
pub(crate) mod gamelist;
pub(crate) mod scan;
pub(crate) mod show;
pub(crate) mod stats;

/// Truncate a string to at most `max` characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max).collect()
    }
}

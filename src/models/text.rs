//! Free-text normalization for names and descriptions

/// Collapse runs of whitespace to single spaces, trim, and cut to `max_len` characters
pub fn sanitize_text(s: &str, max_len: usize) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(sanitize_text("  weekly \t\n shop ", 120), "weekly shop");
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        assert_eq!(sanitize_text("café au lait", 4), "café");
        assert_eq!(sanitize_text("", 10), "");
    }
}

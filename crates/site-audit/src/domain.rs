//! Normalize user-supplied domain input.

/// Reduce raw input to a bare, lowercased host (with port, if given).
///
/// Strips surrounding whitespace, any `scheme://` prefix, and everything from
/// the first `/`, `?` or `#` onward. Returns an empty string when nothing is
/// left.
pub fn normalize_domain(raw: &str) -> String {
    let mut rest = raw.trim();

    if let Some(idx) = rest.find("://") {
        rest = &rest[idx + 3..];
    }

    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    rest[..end].trim().to_lowercase()
}

/// HTTPS origin for a normalized domain.
pub fn https_origin(domain: &str) -> String {
    format!("https://{domain}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_scheme_and_path() {
        assert_eq!(normalize_domain("https://Example.com/blog/post"), "example.com");
        assert_eq!(normalize_domain("http://example.com/"), "example.com");
        assert_eq!(normalize_domain("example.com/"), "example.com");
        assert_eq!(normalize_domain("  WWW.Example.COM  "), "www.example.com");
    }

    #[test]
    fn test_strips_query_and_fragment() {
        assert_eq!(normalize_domain("example.com?utm=1"), "example.com");
        assert_eq!(normalize_domain("example.com#top"), "example.com");
    }

    #[test]
    fn test_keeps_port() {
        assert_eq!(normalize_domain("https://localhost:8443/x"), "localhost:8443");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_domain(""), "");
        assert_eq!(normalize_domain("   "), "");
        assert_eq!(normalize_domain("https://"), "");
        assert_eq!(normalize_domain("https:///path"), "");
    }

    #[test]
    fn test_origin() {
        assert_eq!(https_origin("example.com"), "https://example.com");
    }
}

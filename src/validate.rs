use url::Url;

use crate::error::SeoError;

/// Longest URL accepted, matching what browsers historically allowed.
pub const MAX_URL_LEN: usize = 2083;

/// Accept only absolute http(s) URLs with a host.
pub fn validate_url(raw: &str) -> Result<Url, SeoError> {
    let candidate = raw.trim();
    if candidate.is_empty() {
        return Err(SeoError::invalid_url(raw, "URL is empty"));
    }
    if candidate.chars().count() > MAX_URL_LEN {
        return Err(SeoError::invalid_url(
            raw,
            format!("URL is longer than {} characters", MAX_URL_LEN),
        ));
    }

    let parsed = Url::parse(candidate).map_err(|e| SeoError::invalid_url(raw, e.to_string()))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(SeoError::invalid_url(raw, "URL must use HTTP or HTTPS protocol"));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(SeoError::invalid_url(raw, "URL has no host"));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_and_normalizes() {
        let url = validate_url("https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");

        let url = validate_url("  http://Example.com/a?b=c  ").unwrap();
        assert_eq!(url.as_str(), "http://example.com/a?b=c");
    }

    #[test]
    fn test_rejects_bad_input() {
        for raw in [
            "",
            "   ",
            "example.com",
            "/relative/path",
            "ftp://example.com/file",
            "mailto:someone@example.com",
            "http://",
            "https://exa mple.com",
        ] {
            let err = validate_url(raw).unwrap_err();
            assert!(matches!(err, SeoError::InvalidUrl { .. }), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_rejects_overlong() {
        let raw = format!("https://example.com/{}", "a".repeat(MAX_URL_LEN));
        assert!(validate_url(&raw).is_err());
    }
}

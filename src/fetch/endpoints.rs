//! Provider URL construction.

use crate::error_handling::InitializationError;

/// Builds forward and reverse lookup URLs for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Validates `base_url` and keeps it without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::BaseUrlError` if the URL cannot be parsed
    /// or does not use the http(s) scheme.
    pub fn new(base_url: &str) -> Result<Self, InitializationError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = url::Url::parse(trimmed).map_err(|e| InitializationError::BaseUrlError {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(InitializationError::BaseUrlError {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Endpoints {
            base: trimmed.to_string(),
        })
    }

    /// URL of the forward lookup for `domain`.
    pub fn forward(&self, domain: &str) -> String {
        format!("{}/forward/{}", self.base, domain)
    }

    /// URL of the reverse lookup for `address`.
    pub fn reverse(&self, address: &str) -> String {
        format!("{}/reverse/{}", self.base, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_urls() {
        let endpoints = Endpoints::new("https://freeapi.robtex.com/pdns").unwrap();
        assert_eq!(
            endpoints.forward("example.com"),
            "https://freeapi.robtex.com/pdns/forward/example.com"
        );
        assert_eq!(
            endpoints.reverse("1.2.3.4"),
            "https://freeapi.robtex.com/pdns/reverse/1.2.3.4"
        );
    }

    #[test]
    fn test_endpoints_trailing_slash() {
        let endpoints = Endpoints::new("http://localhost:8080/pdns/").unwrap();
        assert_eq!(
            endpoints.forward("example.com"),
            "http://localhost:8080/pdns/forward/example.com"
        );
    }

    #[test]
    fn test_endpoints_rejects_bad_urls() {
        assert!(Endpoints::new("not a url").is_err());
        assert!(Endpoints::new("ftp://example.com/pdns").is_err());
    }
}

//! Upstream endpoint templates.
//!
//! A template is a URL string that may contain the literal `{id}` token.
//! Resolution is a pure string transform: the identifier is inserted as-is,
//! without escaping, and must be treated by callers as an opaque path segment.

/// Placeholder token replaced by a resource identifier.
pub const PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplate(String);

impl EndpointTemplate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn has_placeholder(&self) -> bool {
        self.0.contains(PLACEHOLDER)
    }

    /// Replace the first `{id}` with `id`.
    pub fn resolve(&self, id: &str) -> String {
        self.0.replacen(PLACEHOLDER, id, 1)
    }

    /// URL of the collection: the first `{id}` and the `/` right before it
    /// are removed. Templates without a placeholder are returned unchanged.
    pub fn collection(&self) -> String {
        let Some(pos) = self.0.find(PLACEHOLDER) else {
            return self.0.clone();
        };
        let start = if self.0[..pos].ends_with('/') { pos - 1 } else { pos };

        let mut url = String::with_capacity(self.0.len());
        url.push_str(&self.0[..start]);
        url.push_str(&self.0[pos + PLACEHOLDER.len()..]);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_replaces_placeholder_only() {
        let t = EndpointTemplate::new("https://api.example.com/payments/{id}");
        assert_eq!(t.resolve("42"), "https://api.example.com/payments/42");

        let t = EndpointTemplate::new("https://api.example.com/payments/{id}/status?v=2");
        assert_eq!(t.resolve("abc"), "https://api.example.com/payments/abc/status?v=2");
    }

    #[test]
    fn test_resolve_first_occurrence_only() {
        let t = EndpointTemplate::new("https://h/{id}/copy/{id}");
        assert_eq!(t.resolve("7"), "https://h/7/copy/{id}");
    }

    #[test]
    fn test_resolve_does_not_escape() {
        let t = EndpointTemplate::new("https://h/payments/{id}");
        assert_eq!(t.resolve("a/b?c"), "https://h/payments/a/b?c");
    }

    #[test]
    fn test_resolve_without_placeholder() {
        let t = EndpointTemplate::new("https://h/payments");
        assert!(!t.has_placeholder());
        assert_eq!(t.resolve("9"), "https://h/payments");
    }

    #[test]
    fn test_collection_strips_placeholder_and_separator() {
        let t = EndpointTemplate::new("https://api.example.com/v1/payments/{id}");
        assert_eq!(t.collection(), "https://api.example.com/v1/payments");

        let t = EndpointTemplate::new("/v1/payments/{id}");
        assert_eq!(t.collection(), "/v1/payments");
    }

    #[test]
    fn test_collection_keeps_suffix() {
        let t = EndpointTemplate::new("https://h/payments/{id}?expand=true");
        assert_eq!(t.collection(), "https://h/payments?expand=true");
    }

    #[test]
    fn test_collection_without_separator() {
        let t = EndpointTemplate::new("https://h/payment-{id}");
        assert_eq!(t.collection(), "https://h/payment-");
    }

    #[test]
    fn test_collection_without_placeholder_is_verbatim() {
        let t = EndpointTemplate::new("https://h/payments");
        assert_eq!(t.collection(), "https://h/payments");
    }
}

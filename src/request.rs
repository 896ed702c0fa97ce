//! The request attribute bag consumed by triggers.
//!
//! Triggers never see the middleware's real request type; they consume this
//! narrow view of it. Middleware glue implements [`Request`] for whatever
//! HTTP model it carries, or copies the relevant attributes into
//! [`RequestParts`].

/// Read-only view of an inbound request.
pub trait Request: Send + Sync {
    /// The HTTP method, e.g. `"GET"`.
    fn method(&self) -> &str;

    /// The path component of the request target.
    fn path(&self) -> &str;

    /// All values of the named query parameter, in order of appearance.
    /// Empty when the parameter is absent.
    fn query_values(&self, name: &str) -> Vec<&str>;

    /// All values of the named header; name comparison is ASCII
    /// case-insensitive. Empty when the header is absent.
    fn header_values(&self, name: &str) -> Vec<&str>;

    /// The body rendered as text. Empty when there is no body.
    fn body(&self) -> &str;
}

/// Owned request attributes with chainable constructors.
#[derive(Debug, Clone, Default)]
pub struct RequestParts {
    method: String,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: String,
}

impl RequestParts {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self { method: method.into(), path: path.into(), ..Self::default() }
    }

    /// Append a query parameter value. Repeat for multi-valued parameters.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append a header value. Repeat for multi-valued headers.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

impl Request for RequestParts {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn query_values(&self, name: &str) -> Vec<&str> {
        self.query.iter().filter(|(n, _)| n == name).map(|(_, v)| v.as_str()).collect()
    }

    fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_all_values_of_a_query_parameter() {
        let req = RequestParts::new("GET", "/search")
            .with_query("tag", "alpha")
            .with_query("page", "2")
            .with_query("tag", "beta");

        assert_eq!(req.query_values("tag"), vec!["alpha", "beta"]);
        assert_eq!(req.query_values("page"), vec!["2"]);
        assert!(req.query_values("missing").is_empty());
    }

    #[test]
    fn header_lookup_ignores_ascii_case() {
        let req = RequestParts::new("GET", "/").with_header("X-Chaos", "on");

        assert_eq!(req.header_values("x-chaos"), vec!["on"]);
        assert_eq!(req.header_values("X-CHAOS"), vec!["on"]);
        assert!(req.header_values("x-other").is_empty());
    }

    #[test]
    fn query_lookup_is_case_sensitive() {
        let req = RequestParts::new("GET", "/").with_query("Tag", "x");
        assert!(req.query_values("tag").is_empty());
        assert_eq!(req.query_values("Tag"), vec!["x"]);
    }

    #[test]
    fn body_defaults_to_empty() {
        let req = RequestParts::new("POST", "/orders");
        assert_eq!(req.body(), "");
        assert_eq!(req.with_body("{}").body(), "{}");
    }
}

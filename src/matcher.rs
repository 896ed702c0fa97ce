//! Compound request matching.

use crate::request::Request;
use crate::trigger::Trigger;
use regex::Regex;

/// Trigger matching requests against independently optional attribute
/// predicates, all combined with logical AND.
///
/// An empty matcher matches every request and describes itself as
/// `"anything"`. Pattern fields compile their regex up front, so a bad
/// pattern surfaces at build time rather than on the request path.
///
/// Multi-valued attributes (query parameters, headers) match if **any**
/// value satisfies the pattern. A named parameter or header with no values
/// leaves nothing to satisfy the pattern, so that clause is false — never
/// an error.
#[derive(Debug, Clone, Default)]
pub struct RequestMatcher {
    method: Option<String>,
    path: Option<Regex>,
    queries: Vec<(String, Regex)>,
    headers: Vec<(String, Regex)>,
    body: Option<Regex>,
}

impl RequestMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an exact method, compared ASCII case-insensitively.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Require the request path to match `pattern`.
    pub fn path(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.path = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Require some value of query parameter `name` to match `pattern`.
    pub fn query(mut self, name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        self.queries.push((name.into(), Regex::new(pattern)?));
        Ok(self)
    }

    /// Require some value of header `name` to match `pattern`.
    pub fn header(mut self, name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        self.headers.push((name.into(), Regex::new(pattern)?));
        Ok(self)
    }

    /// Require the body text to match `pattern`.
    pub fn body(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.body = Some(Regex::new(pattern)?);
        Ok(self)
    }
}

impl Trigger for RequestMatcher {
    fn evaluate(&self, request: &dyn Request) -> bool {
        if let Some(method) = &self.method {
            if !request.method().eq_ignore_ascii_case(method) {
                return false;
            }
        }
        if let Some(path) = &self.path {
            if !path.is_match(request.path()) {
                return false;
            }
        }
        for (name, pattern) in &self.queries {
            if !request.query_values(name).iter().any(|value| pattern.is_match(value)) {
                return false;
            }
        }
        for (name, pattern) in &self.headers {
            if !request.header_values(name).iter().any(|value| pattern.is_match(value)) {
                return false;
            }
        }
        if let Some(body) = &self.body {
            if !body.is_match(request.body()) {
                return false;
            }
        }
        true
    }

    fn description(&self) -> String {
        let mut clauses = Vec::new();
        if let Some(method) = &self.method {
            clauses.push(format!("method '{method}'"));
        }
        if let Some(path) = &self.path {
            clauses.push(format!("path matches '{path}'"));
        }
        for (name, pattern) in &self.queries {
            clauses.push(format!("query '{name}' matches '{pattern}'"));
        }
        for (name, pattern) in &self.headers {
            clauses.push(format!("header '{name}' matches '{pattern}'"));
        }
        if let Some(body) = &self.body {
            clauses.push(format!("body matches '{body}'"));
        }
        if clauses.is_empty() {
            "anything".to_string()
        } else {
            clauses.join(" AND ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestParts;

    #[test]
    fn empty_matcher_matches_anything() {
        let matcher = RequestMatcher::new();
        assert!(matcher.evaluate(&RequestParts::new("GET", "/")));
        assert!(matcher.evaluate(&RequestParts::new("DELETE", "/else").with_body("x")));
        assert_eq!(matcher.description(), "anything");
    }

    #[test]
    fn method_and_path_must_both_match() {
        let matcher = RequestMatcher::new().method("GET").path("^/foo").unwrap();

        assert!(matcher.evaluate(&RequestParts::new("GET", "/foo/bar")));
        assert!(!matcher.evaluate(&RequestParts::new("POST", "/foo/bar")));
        assert!(!matcher.evaluate(&RequestParts::new("GET", "/bar")));
    }

    #[test]
    fn method_comparison_ignores_ascii_case() {
        let matcher = RequestMatcher::new().method("get");
        assert!(matcher.evaluate(&RequestParts::new("GET", "/")));
    }

    #[test]
    fn any_value_of_a_query_parameter_may_satisfy_the_pattern() {
        let matcher = RequestMatcher::new().query("tag", "^beta$").unwrap();

        let multi =
            RequestParts::new("GET", "/").with_query("tag", "alpha").with_query("tag", "beta");
        assert!(matcher.evaluate(&multi));

        let miss = RequestParts::new("GET", "/").with_query("tag", "alpha");
        assert!(!matcher.evaluate(&miss));
    }

    #[test]
    fn an_absent_attribute_fails_the_clause_without_error() {
        let headers = RequestMatcher::new().header("X-Chaos", ".*").unwrap();
        assert!(!headers.evaluate(&RequestParts::new("GET", "/")));

        let queries = RequestMatcher::new().query("q", ".*").unwrap();
        assert!(!queries.evaluate(&RequestParts::new("GET", "/")));
    }

    #[test]
    fn header_matching_is_name_case_insensitive() {
        let matcher = RequestMatcher::new().header("x-chaos", "^on$").unwrap();
        let req = RequestParts::new("GET", "/").with_header("X-Chaos", "on");
        assert!(matcher.evaluate(&req));
    }

    #[test]
    fn body_pattern_matches_the_full_text() {
        let matcher = RequestMatcher::new().body("\"sku\":\\s*\"ghost\"").unwrap();

        assert!(matcher
            .evaluate(&RequestParts::new("POST", "/orders").with_body(r#"{"sku": "ghost"}"#)));
        assert!(!matcher.evaluate(&RequestParts::new("POST", "/orders").with_body("{}")));
    }

    #[test]
    fn clauses_join_with_and() {
        let matcher = RequestMatcher::new()
            .method("GET")
            .path("^/foo")
            .unwrap()
            .query("tag", "beta")
            .unwrap()
            .header("X-Chaos", "on")
            .unwrap()
            .body("ghost")
            .unwrap();

        assert_eq!(
            matcher.description(),
            "method 'GET' AND path matches '^/foo' AND query 'tag' matches 'beta' \
             AND header 'X-Chaos' matches 'on' AND body matches 'ghost'"
        );
    }

    #[test]
    fn invalid_patterns_are_rejected_at_build_time() {
        assert!(RequestMatcher::new().path("(").is_err());
        assert!(RequestMatcher::new().query("q", "[").is_err());
        assert!(RequestMatcher::new().header("h", "(").is_err());
        assert!(RequestMatcher::new().body("[").is_err());
    }
}

//! URL helpers shared by the resource clients.

/// Percent-escape a value for use as a single path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Query parameters that leave server defaults alone.
///
/// Empty strings and zero numbers are skipped, so omitting a parameter and
/// passing its default produce the same URL.
#[derive(Debug, Default)]
pub(crate) struct Query {
    params: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &'static str, value: &str) -> Self {
        if !value.is_empty() {
            self.params.push((name, value.to_string()));
        }
        self
    }

    pub fn number(mut self, name: &'static str, value: u32) -> Self {
        if value > 0 {
            self.params.push((name, value.to_string()));
        }
        self
    }

    /// Join the parameters onto `base`.
    pub fn apply(&self, base: &str) -> String {
        if self.params.is_empty() {
            return base.to_string();
        }

        let encoded: Vec<String> = self
            .params
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect();
        format!("{}?{}", base, encoded.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_omitted() {
        let url = Query::new()
            .text("projectKeyOrId", "")
            .number("startAt", 0)
            .number("maxResults", 0)
            .apply("https://x.atlassian.net/rest/agile/1.0/board");
        assert_eq!(url, "https://x.atlassian.net/rest/agile/1.0/board");
    }

    #[test]
    fn test_values_are_encoded_in_order() {
        let url = Query::new()
            .text("jql", "project = PROJ AND status = \"In Progress\"")
            .number("startAt", 100)
            .text("fields", "summary,status")
            .apply("/search");
        assert_eq!(
            url,
            "/search?jql=project%20%3D%20PROJ%20AND%20status%20%3D%20%22In%20Progress%22&startAt=100&fields=summary%2Cstatus"
        );
    }

    #[test]
    fn test_segment_escapes_reserved_characters() {
        assert_eq!(segment("PROJ-123"), "PROJ-123");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}

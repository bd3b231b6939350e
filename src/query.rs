//! Turns the raw text of the search field into the query sent to the search API.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped, as for a URI component.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode `value` for use as one query parameter value
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Rejection of the search field contents
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("search term is empty")]
    Empty,
}

/// A validated search: the user's trimmed text plus the domain exclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    original: String,
    final_query: String,
}

impl SearchQuery {
    /// The trimmed text the user typed
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The text actually searched for, including the `-site:` clause
    pub fn final_query(&self) -> &str {
        &self.final_query
    }

    /// `final_query` percent-encoded as a single URL parameter value
    pub fn encoded(&self) -> String {
        encode_component(&self.final_query)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.final_query)
    }
}

/// Builds [`SearchQuery`] values that exclude one domain.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    excluded_domain: String,
}

impl QueryBuilder {
    pub fn new(excluded_domain: impl Into<String>) -> Self {
        Self {
            excluded_domain: excluded_domain.into(),
        }
    }

    pub fn excluded_domain(&self) -> &str {
        &self.excluded_domain
    }

    pub fn build(&self, raw: &str) -> Result<SearchQuery, QueryError> {
        let original = raw.trim();
        if original.is_empty() {
            return Err(QueryError::Empty);
        }

        Ok(SearchQuery {
            original: original.to_string(),
            final_query: format!("{} -site:{}", original, self.excluded_domain),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_rejected() {
        let builder = QueryBuilder::new("amazon.com");
        assert_eq!(builder.build(""), Err(QueryError::Empty));
        assert_eq!(builder.build("   \t\n "), Err(QueryError::Empty));
    }

    #[test]
    fn test_trims_and_appends_exclusion() {
        let builder = QueryBuilder::new("amazon.com");
        let query = builder.build("  rust books \n").unwrap();
        assert_eq!(query.original(), "rust books");
        assert_eq!(query.final_query(), "rust books -site:amazon.com");
    }

    #[test]
    fn test_encoded_is_a_single_parameter() {
        let builder = QueryBuilder::new("amazon.com");
        let query = builder.build("c++ & rust?").unwrap();
        assert_eq!(
            query.encoded(),
            "c%2B%2B%20%26%20rust%3F%20-site%3Aamazon.com"
        );
    }

    #[test]
    fn test_encoded_keeps_unreserved_marks() {
        let builder = QueryBuilder::new("amazon.com");
        let query = builder.build("what's (new)!* ~x_y.z").unwrap();
        assert_eq!(
            query.encoded(),
            "what's%20(new)!*%20~x_y.z%20-site%3Aamazon.com"
        );
    }

    #[test]
    fn test_non_ascii_is_utf8_escaped() {
        assert_eq!(encode_component("café"), "caf%C3%A9");
    }

    #[test]
    fn test_inner_text_is_not_altered() {
        let builder = QueryBuilder::new("example.org");
        let query = builder.build("\"exact phrase\"  two  spaces").unwrap();
        assert_eq!(
            query.final_query(),
            "\"exact phrase\"  two  spaces -site:example.org"
        );
    }
}

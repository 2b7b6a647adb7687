//! Request-string parsing.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Default page number seeded into every request.
const DEFAULT_PAGE: &str = "1";

/// Default page size seeded into every request.
const DEFAULT_PER_PAGE: &str = "10";

/// A parsed catalog request.
///
/// Built once per call from an informal request string of the form
/// `"<operation>/<resource>/<pattern>?<query>"` and immutable afterwards.
/// Parsing performs no validation; unresolvable operation/resource
/// combinations are only rejected at endpoint resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Operation type segment (`search`, `detail`, `get`).
    pub operation: String,
    /// Resource class segment, scoped to the operation (`movie`, `all`, ...).
    pub resource: String,
    /// Free-form pattern segment: search term or entity identifier.
    /// Empty when the request carries none.
    pub pattern: String,
    /// Query parameters, seeded with `page`/`per_page` defaults and
    /// overridden by any key present in the trailing query string.
    pub params: BTreeMap<String, String>,
}

impl RequestDescriptor {
    /// Parses a request string into a descriptor.
    ///
    /// The first two `/`-delimited segments are operation and resource;
    /// the remainder keeps its inner `/` characters (titles may contain
    /// them) and is split once on the first `?` into pattern and query
    /// string. The query string uses standard `key=value&...` encoding;
    /// explicit values always win over the seeded defaults.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut segments = input.splitn(3, '/');
        let operation = String::from(segments.next().unwrap_or(""));
        let resource = String::from(segments.next().unwrap_or(""));
        let rest = segments.next().unwrap_or("");

        let (pattern, query) = match rest.split_once('?') {
            Some((pattern, query)) => (pattern, Some(query)),
            None => (rest, None),
        };

        let mut params = BTreeMap::from([
            (String::from("page"), String::from(DEFAULT_PAGE)),
            (String::from("per_page"), String::from(DEFAULT_PER_PAGE)),
        ]);
        if let Some(query) = query {
            for (key, value) in form_urlencoded::parse(query.as_bytes()) {
                params.insert(key.into_owned(), value.into_owned());
            }
        }

        Self {
            operation,
            resource,
            pattern: String::from(pattern),
            params,
        }
    }
}

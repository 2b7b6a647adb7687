//! Upstream endpoint resolution.

use std::str::FromStr;

use super::error::CatalogError;
use super::request::RequestDescriptor;

/// Closed set of catalog operation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Client-side filtered search over a collection endpoint.
    Search,
    /// Single-entity lookup by identifier.
    Detail,
    /// Unfiltered collection fetch.
    Get,
}

impl FromStr for OperationType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(Self::Search),
            "detail" => Ok(Self::Detail),
            "get" => Ok(Self::Get),
            other => Err(CatalogError::InvalidRequestType(String::from(other))),
        }
    }
}

/// Resolves a descriptor to a relative upstream path.
///
/// The operation/resource pair must map to exactly one registered path;
/// unregistered pairs are a hard error, never a silent fallback. The
/// `detail` path interpolates the pattern verbatim, so identifiers must
/// be path-safe.
///
/// # Errors
///
/// - [`CatalogError::InvalidRequestType`] when the operation is outside
///   the closed set.
/// - [`CatalogError::InvalidRequest`] when no endpoint is registered for
///   the pair.
pub fn resolve_endpoint(request: &RequestDescriptor) -> Result<String, CatalogError> {
    let operation: OperationType = request.operation.parse()?;

    let path = match (operation, request.resource.as_str()) {
        (OperationType::Search, "movie") => String::from("Movies"),
        (OperationType::Search, "name") => String::from("Names"),
        (OperationType::Detail, "movie") => format!("Movies/{}", request.pattern),
        (OperationType::Get, "all") => String::from("Movies"),
        (OperationType::Get, "top50") => String::from("Top50Movies"),
        (OperationType::Get, "mostpopular") => String::from("MostPopularMovies"),
        (OperationType::Get, "reviews") => String::from("Reviews"),
        (_, resource) => {
            return Err(CatalogError::InvalidRequest(format!(
                "{}/{resource} has no registered endpoint",
                request.operation
            )));
        }
    };

    Ok(path)
}

//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::Result;
use super::types::ResultPage;

/// Catalog query trait.
///
/// Abstracts the request pipeline for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Runs a request string through the full pipeline: parse, resolve,
    /// fetch, shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the request string is unresolvable, the HTTP
    /// request fails, or the response body cannot be shaped.
    async fn execute(&self, request: &str) -> Result<ResultPage>;
}

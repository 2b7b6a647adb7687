//! Movie catalog API client module.
//!
//! Turns informal request strings (`type/class/pattern?query`) into
//! upstream HTTP requests and shapes the JSON they return into
//! paginated result pages.

mod api;
mod client;
mod endpoint;
mod error;
mod request;
mod shape;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CatalogClient, CatalogClientBuilder};
pub use endpoint::{OperationType, resolve_endpoint};
#[allow(clippy::module_name_repetitions)]
pub use error::{CatalogError, Result};
pub use request::RequestDescriptor;
pub use shape::shape_results;
pub use types::{
    BoxOffice, CastMember, CreditedName, GenreTag, Movie, Ratings, ResultPage, Review,
    ReviewThread,
};

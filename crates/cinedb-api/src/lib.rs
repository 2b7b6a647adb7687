//! Movie catalog API client library for cinedb.
//!
//! Provides the request pipeline for the upstream movie database API
//! and the browsing queries composed on top of it.

/// Catalog request pipeline: parsing, endpoint resolution, HTTP, shaping.
pub mod catalog;

/// Browsing queries composed from catalog requests.
pub mod provider;

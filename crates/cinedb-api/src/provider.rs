//! Movie browsing queries composed from catalog requests.
//!
//! Each query chains the request pipeline once or twice and applies
//! plain filter/sort/dedupe steps on the decoded entities. Nothing is
//! cached between calls; independent queries share no mutable state.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::instrument;

use crate::catalog::{
    CatalogError, CreditedName, LocalCatalogApi, Movie, Result, Review, ReviewThread,
};

/// Number of featured movies kept after the gross sort.
const FEATURED_COUNT: usize = 5;

/// Full-catalog request used by the featured and actor-search queries.
const ALL_MOVIES_REQUEST: &str = "get/all/?per_page=300&page=1";

/// Most-popular section request.
const POPULAR_REQUEST: &str = "get/mostpopular/?per_page=30&page=1";

/// Top-rated section request.
const TOP_RATED_REQUEST: &str = "get/top50/?per_page=30&page=1";

/// Review collection request.
const REVIEWS_REQUEST: &str = "get/reviews";

/// Currency formatting stripped from gross amounts (`"$2,923,706,026"`).
#[allow(clippy::expect_used)]
static GROSS_FORMAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$,]").expect("failed to compile gross format regex"));

/// Parses a movie's worldwide gross into a sortable amount.
///
/// Returns `None` when the movie carries no gross or the amount does
/// not reduce to an integer after stripping currency formatting.
fn parse_gross(movie: &Movie) -> Option<u64> {
    let gross = movie
        .box_office
        .as_ref()?
        .cumulative_worldwide_gross
        .as_deref()?;
    GROSS_FORMAT_RE.replace_all(gross, "").parse().ok()
}

/// Home screen sections loaded in one concurrent batch.
#[derive(Debug, Clone)]
pub struct HomeSections {
    /// Top-grossing movies, highest first.
    pub featured: Vec<Movie>,
    /// Most popular movies.
    pub popular: Vec<Movie>,
    /// Top rated movies.
    pub top_rated: Vec<Movie>,
}

/// Movie browsing queries over a catalog API.
#[derive(Debug)]
pub struct MovieProvider<A> {
    /// Catalog API the queries run against.
    api: A,
}

impl<A: LocalCatalogApi + Sync> MovieProvider<A> {
    /// Creates a provider over the given API.
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Fetches a request and decodes every page item.
    async fn fetch_decoded<T: serde::de::DeserializeOwned>(&self, request: &str) -> Result<Vec<T>> {
        let page = self.api.execute(request).await?;
        page.items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|err| {
                    CatalogError::UpstreamData(format!("failed to decode catalog entity: {err}"))
                })
            })
            .collect()
    }

    /// Loads the three home sections concurrently.
    ///
    /// The batch is all-or-nothing: if any section fails, the whole
    /// load fails and no partial result is kept.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any section query.
    #[instrument(skip_all)]
    pub async fn home_sections(&self) -> Result<HomeSections> {
        let (featured, popular, top_rated) = tokio::try_join!(
            self.featured_movies(),
            self.popular_movies(),
            self.top_rated_movies(),
        )?;

        Ok(HomeSections {
            featured,
            popular,
            top_rated,
        })
    }

    /// Top-grossing movies: the full catalog sorted by worldwide gross,
    /// highest first, truncated to five. Movies without a parseable
    /// gross are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fetch or entity decoding fails.
    #[instrument(skip_all)]
    pub async fn featured_movies(&self) -> Result<Vec<Movie>> {
        let movies: Vec<Movie> = self.fetch_decoded(ALL_MOVIES_REQUEST).await?;

        let mut grossing: Vec<(u64, Movie)> = movies
            .into_iter()
            .filter_map(|movie| parse_gross(&movie).map(|gross| (gross, movie)))
            .collect();
        grossing.sort_by(|a, b| b.0.cmp(&a.0));
        grossing.truncate(FEATURED_COUNT);

        Ok(grossing.into_iter().map(|(_, movie)| movie).collect())
    }

    /// Most popular movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fetch or entity decoding fails.
    #[instrument(skip_all)]
    pub async fn popular_movies(&self) -> Result<Vec<Movie>> {
        self.fetch_decoded(POPULAR_REQUEST).await
    }

    /// Top rated movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fetch or entity decoding fails.
    #[instrument(skip_all)]
    pub async fn top_rated_movies(&self) -> Result<Vec<Movie>> {
        self.fetch_decoded(TOP_RATED_REQUEST).await
    }

    /// Movies whose title matches the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fetch or entity decoding fails.
    #[instrument(skip_all)]
    pub async fn search_movies(&self, query: &str) -> Result<Vec<Movie>> {
        self.fetch_decoded(&format!("search/movie/{query}?per_page=300&page=1"))
            .await
    }

    /// Movies featuring a credited name matching the query.
    ///
    /// Two strictly sequenced fetches: the matching names first, then
    /// the full movie list filtered in-process against them. The second
    /// fetch is never issued before the first resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if either catalog fetch or entity decoding
    /// fails.
    #[instrument(skip_all)]
    pub async fn search_by_actor(&self, query: &str) -> Result<Vec<Movie>> {
        let names: Vec<CreditedName> = self
            .fetch_decoded(&format!("search/name/{query}?per_page=300&page=1"))
            .await?;
        let movies: Vec<Movie> = self.fetch_decoded(ALL_MOVIES_REQUEST).await?;

        let lowered: Vec<String> = names
            .iter()
            .map(|name| name.as_name().to_lowercase())
            .collect();

        Ok(movies
            .into_iter()
            .filter(|movie| {
                movie.actor_list.iter().any(|actor| {
                    let actor_name = actor.name.to_lowercase();
                    lowered.iter().any(|name| actor_name.contains(name.as_str()))
                })
            })
            .collect())
    }

    /// Combined actor and title search, deduplicated by movie id.
    ///
    /// Actor matches come first; the first occurrence of an id wins.
    ///
    /// # Errors
    ///
    /// Returns an error if either underlying search fails.
    #[instrument(skip_all)]
    pub async fn search_combined(&self, query: &str) -> Result<Vec<Movie>> {
        let by_actor = self.search_by_actor(query).await?;
        let by_title = self.search_movies(query).await?;

        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut combined = Vec::with_capacity(by_actor.len().saturating_add(by_title.len()));
        for movie in by_actor.into_iter().chain(by_title) {
            if seen_ids.insert(movie.id.clone()) {
                combined.push(movie);
            }
        }

        Ok(combined)
    }

    /// Full details for a single movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fetch fails or the detail page
    /// carries no decodable entity.
    #[instrument(skip_all)]
    pub async fn movie_details(&self, movie_id: &str) -> Result<Movie> {
        let page = self.api.execute(&format!("detail/movie/{movie_id}")).await?;
        let entity: Value = page.items.into_iter().next().ok_or_else(|| {
            CatalogError::UpstreamData(String::from("detail page contained no entity"))
        })?;

        serde_json::from_value(entity).map_err(|err| {
            CatalogError::UpstreamData(format!("failed to decode movie details: {err}"))
        })
    }

    /// Reviews recorded for a movie, or an empty list when none are.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fetch or thread decoding fails.
    #[instrument(skip_all)]
    pub async fn movie_reviews(&self, movie_id: &str) -> Result<Vec<Review>> {
        let threads: Vec<ReviewThread> = self.fetch_decoded(REVIEWS_REQUEST).await?;

        Ok(threads
            .into_iter()
            .find(|thread| thread.movie_id == movie_id)
            .map(|thread| thread.items)
            .unwrap_or_default())
    }
}

//! Result shaping: operation-specific filtering and pagination.

use serde_json::Value;

use super::endpoint::OperationType;
use super::error::{CatalogError, Result};
use super::request::RequestDescriptor;
use super::types::{CreditedName, ResultPage};

/// Reads an integer pagination parameter.
///
/// Missing keys fail like non-integers; the parser always seeds
/// defaults, so that only happens for hand-built descriptors.
fn integer_param(request: &RequestDescriptor, key: &str) -> Result<usize> {
    let raw = request.params.get(key).map_or("", String::as_str);
    raw.parse().map_err(|_| {
        CatalogError::InvalidRequest(format!(
            "parameter {key} must be a non-negative integer, got {raw:?}"
        ))
    })
}

/// Case-insensitive substring test on the entity's `title` field.
/// Entities without a string title never match.
fn title_matches(entry: &Value, lowered_pattern: &str) -> bool {
    entry
        .get("title")
        .and_then(Value::as_str)
        .is_some_and(|title| title.to_lowercase().contains(lowered_pattern))
}

/// Credited-name test covering both upstream representations: a bare
/// string, or an object carrying a `name` field. Entities matching
/// neither representation never match.
fn name_matches(entry: &Value, lowered_pattern: &str) -> bool {
    serde_json::from_value::<CreditedName>(entry.clone())
        .is_ok_and(|name| name.matches(lowered_pattern))
}

/// Applies the operation-specific branch: detail wrapping, search
/// filtering, or collection passthrough.
fn collect_items(
    data: Value,
    request: &RequestDescriptor,
    operation: OperationType,
) -> Result<Vec<Value>> {
    match operation {
        OperationType::Detail => match data {
            Value::Array(mut entries) => {
                if entries.is_empty() {
                    return Err(CatalogError::UpstreamData(String::from(
                        "detail response was an empty array",
                    )));
                }
                Ok(vec![entries.swap_remove(0)])
            }
            entity => Ok(vec![entity]),
        },
        OperationType::Search => {
            let Value::Array(entries) = data else {
                return Err(CatalogError::UpstreamData(format!(
                    "search response for {}/{} was not an array",
                    request.operation, request.resource
                )));
            };
            let lowered = request.pattern.to_lowercase();
            let filtered = if request.resource == "movie" {
                entries
                    .into_iter()
                    .filter(|entry| title_matches(entry, &lowered))
                    .collect()
            } else {
                entries
                    .into_iter()
                    .filter(|entry| name_matches(entry, &lowered))
                    .collect()
            };
            Ok(filtered)
        }
        OperationType::Get => match data {
            Value::Array(entries) => Ok(entries),
            entity => Ok(vec![entity]),
        },
    }
}

/// Shapes a raw upstream response into a paginated [`ResultPage`].
///
/// `detail` requests always yield `total == 1`; `search` requests
/// filter the collection case-insensitively before counting; `get`
/// requests pass the collection through. Pagination is identical across
/// branches: `page` is clamped to >= 1, `per_page` must be at least 1,
/// and an out-of-range offset yields an empty slice rather than an
/// error.
///
/// # Errors
///
/// - [`CatalogError::InvalidRequestType`] when the operation is outside
///   the closed set.
/// - [`CatalogError::InvalidRequest`] when `page`/`per_page` are not
///   integers or `per_page` is zero.
/// - [`CatalogError::UpstreamData`] when the response shape violates
///   the branch's array/object assumption.
pub fn shape_results(data: Value, request: &RequestDescriptor) -> Result<ResultPage> {
    let operation: OperationType = request.operation.parse()?;
    let items = collect_items(data, request, operation)?;

    let total = items.len();
    let page = integer_param(request, "page")?.max(1);
    let per_page = integer_param(request, "per_page")?;
    if per_page == 0 {
        return Err(CatalogError::InvalidRequest(String::from(
            "parameter per_page must be at least 1",
        )));
    }

    let offset = page.saturating_sub(1).saturating_mul(per_page);
    let page_items: Vec<Value> = items.into_iter().skip(offset).take(per_page).collect();

    Ok(ResultPage {
        search: request.pattern.clone(),
        page,
        per_page,
        total,
        total_pages: total.div_ceil(per_page),
        items: page_items,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use serde_json::json;

    use super::*;

    fn request(input: &str) -> RequestDescriptor {
        RequestDescriptor::parse(input)
    }

    #[test]
    fn test_detail_wraps_bare_object() {
        // Arrange
        let data = json!({"id": "tt1375666", "title": "Inception"});

        // Act
        let page = shape_results(data, &request("detail/movie/tt1375666")).unwrap();

        // Assert
        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0]["title"], "Inception");
    }

    #[test]
    fn test_detail_takes_first_array_element() {
        // Arrange
        let data = json!([{"title": "Inception"}, {"title": "Tenet"}]);

        // Act
        let page = shape_results(data, &request("detail/movie/tt1375666")).unwrap();

        // Assert: total is 1 regardless of the upstream shape
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0]["title"], "Inception");
    }

    #[test]
    fn test_detail_empty_array_is_data_error() {
        // Arrange & Act
        let result = shape_results(json!([]), &request("detail/movie/tt1375666"));

        // Assert
        assert!(matches!(result, Err(CatalogError::UpstreamData(_))));
    }

    #[test]
    fn test_search_movie_filters_title_substring() {
        // Arrange
        let data = json!([
            {"title": "Alpha"},
            {"title": "Beta"},
            {"title": "Gamma"},
            {"title": "Delta"},
        ]);

        // Act
        let page = shape_results(data, &request("search/movie/ta?per_page=2&page=1")).unwrap();

        // Assert: "ta" matches Beta and Delta only
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items[0]["title"], "Beta");
        assert_eq!(page.items[1]["title"], "Delta");
    }

    #[test]
    fn test_search_movie_is_case_insensitive() {
        // Arrange
        let data = json!([{"title": "The Dark Knight"}, {"title": "Inception"}]);

        // Act
        let page = shape_results(data, &request("search/movie/DARK?page=1")).unwrap();

        // Assert
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0]["title"], "The Dark Knight");
    }

    #[test]
    fn test_search_movie_skips_entries_without_title() {
        // Arrange
        let data = json!([{"title": "Alpha"}, {"id": "tt0000001"}, {"title": 7}]);

        // Act
        let page = shape_results(data, &request("search/movie/a?page=1")).unwrap();

        // Assert
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_search_name_matches_both_representations() {
        // Arrange
        let data = json!([
            "Tom Hanks",
            {"name": "Tom Hardy"},
            {"name": "Emma Stone"},
            {"id": "nm0000001"},
        ]);

        // Act
        let page = shape_results(data, &request("search/name/tom?page=1")).unwrap();

        // Assert: bare string and `{name}` object both match, the
        // nameless object never does
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_search_name_case_insensitive_substring() {
        // Arrange
        let data = json!([{"name": "Tom Hanks"}]);

        // Act
        let page = shape_results(data, &request("search/name/hanks?page=1")).unwrap();

        // Assert
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_search_non_array_is_data_error() {
        // Arrange & Act
        let result = shape_results(json!({"title": "Alpha"}), &request("search/movie/a"));

        // Assert
        assert!(matches!(result, Err(CatalogError::UpstreamData(_))));
    }

    #[test]
    fn test_get_passes_collection_through() {
        // Arrange
        let data = json!([{"id": "a"}, {"id": "b"}, {"id": "c"}]);

        // Act
        let page = shape_results(data, &request("get/all/?per_page=10&page=1")).unwrap();

        // Assert
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn test_get_wraps_bare_object() {
        // Arrange & Act
        let page = shape_results(json!({"id": "a"}), &request("get/all/")).unwrap();

        // Assert
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_unknown_operation_fails_with_request_type() {
        // Arrange & Act
        let result = shape_results(json!([]), &request("bogus/all/"));

        // Assert
        assert!(matches!(result, Err(CatalogError::InvalidRequestType(_))));
    }

    #[test]
    fn test_pagination_slices_requested_page() {
        // Arrange
        let data = json!([
            {"id": "a"}, {"id": "b"}, {"id": "c"}, {"id": "d"}, {"id": "e"},
        ]);

        // Act
        let page = shape_results(data, &request("get/all/?per_page=2&page=2")).unwrap();

        // Assert
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0]["id"], "c");
        assert_eq!(page.items[1]["id"], "d");
    }

    #[test]
    fn test_pagination_is_idempotent_under_reslicing() {
        // Arrange
        let data = json!([{"id": "a"}, {"id": "b"}, {"id": "c"}]);

        // Act
        let first = shape_results(data.clone(), &request("get/all/?per_page=2&page=2")).unwrap();
        let second = shape_results(data, &request("get/all/?per_page=2&page=2")).unwrap();

        // Assert
        assert_eq!(first, second);
    }

    #[test]
    fn test_total_pages_exact_multiple_has_no_empty_page() {
        // Arrange
        let data = json!([{"id": "a"}, {"id": "b"}, {"id": "c"}, {"id": "d"}]);

        // Act
        let page = shape_results(data, &request("get/all/?per_page=2&page=1")).unwrap();

        // Assert
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_total_pages_zero_for_empty_collection() {
        // Arrange & Act
        let page = shape_results(json!([]), &request("get/all/?per_page=10&page=1")).unwrap();

        // Assert
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_out_of_range_page_yields_empty_slice() {
        // Arrange
        let data = json!([{"id": "a"}, {"id": "b"}]);

        // Act
        let page = shape_results(data, &request("get/all/?per_page=10&page=9")).unwrap();

        // Assert: empty, not an error
        assert_eq!(page.total, 2);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_page_zero_is_clamped_to_one() {
        // Arrange
        let data = json!([{"id": "a"}, {"id": "b"}]);

        // Act
        let page = shape_results(data, &request("get/all/?per_page=1&page=0")).unwrap();

        // Assert
        assert_eq!(page.page, 1);
        assert_eq!(page.items[0]["id"], "a");
    }

    #[test]
    fn test_negative_page_fails_fast() {
        // Arrange & Act
        let result = shape_results(json!([]), &request("get/all/?per_page=10&page=-1"));

        // Assert
        assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));
    }

    #[test]
    fn test_non_numeric_per_page_fails_fast() {
        // Arrange & Act
        let result = shape_results(json!([]), &request("get/all/?per_page=lots"));

        // Assert
        assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));
    }

    #[test]
    fn test_per_page_zero_fails_fast() {
        // Arrange & Act
        let result = shape_results(json!([{"id": "a"}]), &request("get/all/?per_page=0"));

        // Assert: no division by zero, an explicit error instead
        assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));
    }

    #[test]
    fn test_search_echoes_pattern() {
        // Arrange & Act
        let page = shape_results(json!([]), &request("search/movie/batman?page=1")).unwrap();

        // Assert
        assert_eq!(page.search, "batman");
    }
}

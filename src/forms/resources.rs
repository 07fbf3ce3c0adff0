//! Query string of the generic resource list.

use std::collections::HashMap;

use crate::domain::resource::Resource;
use crate::domain::types::SortOrder;
use crate::forms::FormError;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::RecordQuery;

/// Keys that control paging and ordering rather than filtering.
const RESERVED_KEYS: [&str; 4] = ["page", "per_page", "sort", "order"];

fn parse_number(params: &HashMap<String, String>, key: &str) -> Result<Option<usize>, FormError> {
    params
        .get(key)
        .map(|value| value.trim().parse().map_err(|_| FormError::InvalidPage))
        .transpose()
}

/// Builds the query for `resource` from raw query string pairs.
///
/// Every non-reserved key is an equality filter; filters and sort columns the
/// resource does not expose are ignored.
pub fn record_query(
    resource: Resource,
    params: &HashMap<String, String>,
) -> Result<RecordQuery, FormError> {
    let page = parse_number(params, "page")?.unwrap_or(1);
    let per_page = parse_number(params, "per_page")?.unwrap_or(DEFAULT_ITEMS_PER_PAGE);

    let mut query = RecordQuery::new(resource).paginate(page, per_page);

    if let Some(sort) = params.get("sort") {
        let order = params
            .get("order")
            .and_then(|order| SortOrder::parse_lenient(order))
            .unwrap_or(SortOrder::Desc);
        query = query.sort(sort.trim(), order);
    }

    let mut filters: Vec<_> = params
        .iter()
        .filter(|(key, value)| !RESERVED_KEYS.contains(&key.as_str()) && !value.trim().is_empty())
        .collect();
    filters.sort();
    for (column, value) in filters {
        query = query.eq(column, value.trim());
    }

    Ok(query)
}

//! Generic list of the browsable resources.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::domain::resource::Resource;
use crate::dto::resources::ResourceRecord;
use crate::forms::resources::record_query;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::ListResult;
use crate::repository::{RecordQuery, RecordReader, StaffReader};
use crate::services::{ServiceError, ServiceResult, ensure_staff};

/// Runs `query` and decodes every row as `T`.
pub async fn fetch_records<T, R>(repo: &R, query: &RecordQuery) -> ServiceResult<ListResult<T>>
where
    T: DeserializeOwned,
    R: RecordReader + ?Sized,
{
    let (total, rows) = repo.list_records(query).await.map_err(|err| {
        log::error!("Failed to list {}: {err}", query.resource);
        err
    })?;

    let data = rows
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<T>, _>>()
        .map_err(|err| {
            log::error!("Unexpected {} row: {err}", query.resource);
            ServiceError::Internal(format!("unexpected {} row", query.resource))
        })?;

    Ok(ListResult::new(data, total))
}

/// Lists one page of `resource_name` filtered by the query string.
pub async fn list_resource<R>(
    user: &AuthenticatedUser,
    resource_name: &str,
    params: &HashMap<String, String>,
    repo: &R,
) -> ServiceResult<ListResult<ResourceRecord>>
where
    R: RecordReader + StaffReader + ?Sized,
{
    ensure_staff(user, repo).await?;

    let resource: Resource = resource_name
        .parse()
        .map_err(|_| ServiceError::NotFound(format!("resource {resource_name}")))?;
    let query = record_query(resource, params)?;

    let (total, rows) = repo.list_records(&query).await.map_err(|err| {
        log::error!("Failed to list {resource}: {err}");
        err
    })?;

    let data = rows
        .into_iter()
        .map(|row| ResourceRecord::decode(resource, row))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            log::error!("Unexpected {resource} row: {err}");
            ServiceError::Internal(format!("unexpected {resource} row"))
        })?;

    Ok(ListResult::new(data, total))
}

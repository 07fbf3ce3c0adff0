use async_trait::async_trait;

use crate::repository::backend::{QueryParams, eq_param, order_param, page_params, select_param};
use crate::repository::errors::RepositoryResult;
use crate::repository::{RecordQuery, RecordReader, SupabaseRepository};

fn record_params(query: &RecordQuery) -> QueryParams {
    let mut params = vec![select_param("*")];
    params.extend(
        query
            .filters
            .iter()
            .map(|(column, value)| eq_param(column, value)),
    );
    let (column, order) = query.effective_sort();
    params.push(order_param(&column, order));
    if let Some(pagination) = &query.pagination {
        params.extend(page_params(pagination));
    }
    params
}

#[async_trait]
impl RecordReader for SupabaseRepository {
    async fn list_records(
        &self,
        query: &RecordQuery,
    ) -> RepositoryResult<(usize, Vec<serde_json::Value>)> {
        let (total, rows) = self
            .client()
            .select::<serde_json::Value>(
                query.resource.table(),
                &record_params(query),
                true,
                self.token(),
            )
            .await?;

        let offset = query.pagination.map(|p| p.offset()).unwrap_or(0);
        Ok((total.unwrap_or(offset.saturating_add(rows.len())), rows))
    }
}

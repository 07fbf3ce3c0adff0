//! HTTP client for the Supabase services (PostgREST, auth, storage and edge
//! functions) plus helpers that build PostgREST query parameters.

use std::fmt::Display;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, header};
use serde::{Serialize, de::DeserializeOwned};

use crate::domain::types::SortOrder;
use crate::models::backend::{BackendErrorBody, SignObjectRequest, SignedObject};
use crate::models::config::ServerConfig;
use crate::pagination::Pagination;
use crate::repository::errors::{RepositoryError, RepositoryResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Query string pairs sent to PostgREST.
pub type QueryParams = Vec<(String, String)>;

#[derive(Clone, Debug)]
pub struct SupabaseClientOptions {
    pub base_url: String,
    pub api_key: String,
    pub storage_bucket: String,
    pub signed_url_ttl_secs: u64,
}

impl From<&ServerConfig> for SupabaseClientOptions {
    fn from(config: &ServerConfig) -> Self {
        Self {
            base_url: config.supabase_url.clone(),
            api_key: config.supabase_api_key.clone(),
            storage_bucket: config.storage_bucket.clone(),
            signed_url_ttl_secs: config.signed_url_ttl_secs,
        }
    }
}

/// Shared connection to one Supabase project. Built once at startup.
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    storage_bucket: String,
    signed_url_ttl_secs: u64,
}

impl SupabaseClient {
    pub fn new(options: SupabaseClientOptions) -> RepositoryResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            api_key: options.api_key,
            storage_bucket: options.storage_bucket,
            signed_url_ttl_secs: options.signed_url_ttl_secs,
        })
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(token.unwrap_or(&self.api_key))
    }

    /// Reads rows from a table or view. With `count` set, the total number of
    /// matching rows is read from the `Content-Range` header.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &QueryParams,
        count: bool,
        token: Option<&str>,
    ) -> RepositoryResult<(Option<usize>, Vec<T>)> {
        let mut request = self
            .request(Method::GET, &format!("/rest/v1/{table}"), token)
            .query(params);
        if count {
            request = request.header("Prefer", "count=exact");
        }

        let response = ensure_success(request.send().await?).await?;
        let total = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range);
        let rows = response.json::<Vec<T>>().await?;

        Ok((total, rows))
    }

    /// Calls a stored procedure through `POST /rest/v1/rpc/{function}`.
    pub async fn rpc<A, T>(&self, function: &str, args: &A, token: Option<&str>) -> RepositoryResult<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, &format!("/rest/v1/rpc/{function}"), token)
            .json(args)
            .send()
            .await?;

        Ok(ensure_success(response).await?.json::<T>().await?)
    }

    pub async fn insert<B: Serialize + ?Sized>(
        &self,
        table: &str,
        body: &B,
        token: Option<&str>,
    ) -> RepositoryResult<()> {
        let response = self
            .request(Method::POST, &format!("/rest/v1/{table}"), token)
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }

    /// Inserts or, when a row with the same `on_conflict` key exists, merges.
    pub async fn upsert<B: Serialize + ?Sized>(
        &self,
        table: &str,
        body: &B,
        on_conflict: &str,
        token: Option<&str>,
    ) -> RepositoryResult<()> {
        let response = self
            .request(Method::POST, &format!("/rest/v1/{table}"), token)
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(body)
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }

    pub async fn delete(
        &self,
        table: &str,
        params: &QueryParams,
        token: Option<&str>,
    ) -> RepositoryResult<()> {
        let response = self
            .request(Method::DELETE, &format!("/rest/v1/{table}"), token)
            .query(params)
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }

    /// Signs a key in the configured bucket and returns the absolute URL.
    pub async fn sign_object(&self, storage_key: &str, token: Option<&str>) -> RepositoryResult<String> {
        let path = format!(
            "/storage/v1/object/sign/{}/{}",
            self.storage_bucket,
            storage_key.trim_start_matches('/')
        );
        let response = self
            .request(Method::POST, &path, token)
            .json(&SignObjectRequest {
                expires_in: self.signed_url_ttl_secs,
            })
            .send()
            .await?;

        let signed = ensure_success(response).await?.json::<SignedObject>().await?;
        Ok(format!("{}/storage/v1{}", self.base_url, signed.signed_url))
    }

    /// Posts to the auth service and decodes the response body.
    pub async fn auth_json<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> RepositoryResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, &format!("/auth/v1/{path}"), token)
            .json(body)
            .send()
            .await?;

        Ok(ensure_success(response).await?.json::<T>().await?)
    }

    /// Posts to the auth service, ignoring the response body.
    pub async fn auth_post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> RepositoryResult<()> {
        let response = self
            .request(Method::POST, &format!("/auth/v1/{path}"), token)
            .json(body)
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }

    pub async fn invoke_function<B: Serialize + ?Sized>(
        &self,
        name: &str,
        body: &B,
        token: Option<&str>,
    ) -> RepositoryResult<()> {
        let response = self
            .request(Method::POST, &format!("/functions/v1/{name}"), token)
            .json(body)
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }
}

/// Turns a non-2xx response into [`RepositoryError::Backend`].
async fn ensure_success(response: Response) -> RepositoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let parsed: BackendErrorBody = serde_json::from_str(&body).unwrap_or_default();
    let message = parsed.describe().unwrap_or_else(|| {
        if body.trim().is_empty() {
            status.to_string()
        } else {
            body.clone()
        }
    });

    Err(RepositoryError::Backend {
        status: status.as_u16(),
        code: parsed.code(),
        message,
    })
}

/// Total row count from a `Content-Range` header such as `0-9/42` or `*/0`.
pub fn parse_content_range(value: &str) -> Option<usize> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.parse().ok()
}

pub fn select_param(columns: &str) -> (String, String) {
    ("select".to_string(), columns.to_string())
}

pub fn eq_param(column: &str, value: impl Display) -> (String, String) {
    (column.to_string(), format!("eq.{value}"))
}

/// Case-insensitive substring match. SQL wildcards in `value` match literally.
pub fn ilike_param(column: &str, value: &str) -> (String, String) {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    (column.to_string(), format!("ilike.*{escaped}*"))
}

pub fn in_param<V: Display>(column: &str, values: &[V]) -> (String, String) {
    let joined = values
        .iter()
        .map(|value| format!("\"{value}\""))
        .collect::<Vec<_>>()
        .join(",");
    (column.to_string(), format!("in.({joined})"))
}

pub fn order_param(column: &str, order: SortOrder) -> (String, String) {
    let direction = if order.is_ascending() { "asc" } else { "desc" };
    ("order".to_string(), format!("{column}.{direction}"))
}

pub fn limit_param(limit: usize) -> (String, String) {
    ("limit".to_string(), limit.to_string())
}

pub fn page_params(pagination: &Pagination) -> [(String, String); 2] {
    [
        limit_param(pagination.limit()),
        ("offset".to_string(), pagination.offset().to_string()),
    ]
}

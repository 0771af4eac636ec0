// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the finance REST API.

use reqwest::blocking::{Client, RequestBuilder, Response};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{
    rows_from_values, Budget, Category, CategoryInput, Profile, Snapshot, Transaction,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API url is not configured; run `budgetlens config set-url <url>`")]
    NotConfigured,
    #[error("Failed to build HTTP client: {0}")]
    Client(anyhow::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Transactions,
    Categories,
    Budgets,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Transactions => "transactions",
            Resource::Categories => "categories",
            Resource::Budgets => "budgets",
        }
    }
}

/// Accepts either a bare JSON array or a paginated `{"results": [...]}` page.
/// Rows that do not decode are skipped; a body that is not a list is an error.
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, serde_json::Error> {
    let rows = match value {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Null) | None => return Ok(Vec::new()),
            Some(other) => other,
        },
        Value::Null => return Ok(Vec::new()),
        other => other,
    };
    let rows: Vec<Value> = serde_json::from_value(rows)?;
    Ok(rows_from_values(rows))
}

pub struct ApiClient {
    http: Client,
    base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base: &str, token: Option<String>) -> ApiResult<Self> {
        let base = base.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ApiError::NotConfigured);
        }
        let http = crate::utils::http_client().map_err(ApiError::Client)?;
        Ok(Self {
            http,
            base: base.to_string(),
            token,
        })
    }

    pub fn from_settings(conn: &Connection) -> anyhow::Result<Self> {
        let base = crate::db::get_api_url(conn)?;
        let token = crate::db::get_token(conn)?;
        Ok(Self::new(&base, token)?)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}/", self.base, path.trim_matches('/'))
    }

    fn item_url(&self, resource: Resource, id: i64) -> String {
        self.url(&format!("{}/{}", resource.path(), id))
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    fn send(&self, req: RequestBuilder) -> ApiResult<Response> {
        let resp = self.authed(req).send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    fn read_json<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn list<T: DeserializeOwned>(&self, resource: Resource) -> ApiResult<Vec<T>> {
        let url = self.url(resource.path());
        tracing::debug!(%url, "GET list");
        let value: Value = Self::read_json(self.send(self.http.get(&url))?)?;
        Ok(decode_list(value)?)
    }

    pub fn get<T: DeserializeOwned>(&self, resource: Resource, id: i64) -> ApiResult<T> {
        let url = self.item_url(resource, id);
        tracing::debug!(%url, "GET item");
        Self::read_json(self.send(self.http.get(&url))?)
    }

    pub fn create<B: Serialize, T: DeserializeOwned>(
        &self,
        resource: Resource,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.url(resource.path());
        tracing::debug!(%url, "POST");
        Self::read_json(self.send(self.http.post(&url).json(body))?)
    }

    pub fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: i64,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.item_url(resource, id);
        tracing::debug!(%url, "PUT");
        Self::read_json(self.send(self.http.put(&url).json(body))?)
    }

    pub fn delete(&self, resource: Resource, id: i64) -> ApiResult<()> {
        let url = self.item_url(resource, id);
        tracing::debug!(%url, "DELETE");
        self.send(self.http.delete(&url))?;
        Ok(())
    }

    pub fn profile(&self) -> ApiResult<Profile> {
        let url = self.url("users/profile");
        Self::read_json(self.send(self.http.get(&url))?)
    }

    pub fn update_profile(&self, patch: &Value) -> ApiResult<Profile> {
        let url = self.url("users/profile");
        Self::read_json(self.send(self.http.patch(&url).json(patch))?)
    }

    /// Creates each default category, skipping the ones the API rejects.
    pub fn seed_categories(&self, defaults: &[CategoryInput]) -> Vec<Category> {
        let mut created = Vec::new();
        for input in defaults {
            match self.create::<_, Category>(Resource::Categories, input) {
                Ok(c) => created.push(c),
                Err(err) => {
                    tracing::warn!(category = %input.name, error = %err, "failed to create category")
                }
            }
        }
        created
    }

    /// Fetches the three lists the analytics engine works on. An empty
    /// category list is seeded with the defaults first.
    pub fn fetch_snapshot(&self, defaults: &[CategoryInput]) -> ApiResult<Snapshot> {
        let transactions: Vec<Transaction> = self.list(Resource::Transactions)?;
        let mut categories: Vec<Category> = self.list(Resource::Categories)?;
        if categories.is_empty() {
            tracing::info!("no categories found, creating defaults");
            categories = self.seed_categories(defaults);
        }
        let budgets: Vec<Budget> = self.list(Resource::Budgets)?;
        Ok(Snapshot {
            transactions,
            categories,
            budgets,
        })
    }
}

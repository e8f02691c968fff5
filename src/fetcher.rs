//! Client for the ratings service's GraphQL API.

use crate::constants::{SEARCH_QUERY, TEACHER_QUERY};
use crate::error::{Error, Result};
use crate::models::{GraphQlResponse, NodeData, RatingRecord, SearchData};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

/// The two lookups the updater needs from a ratings provider.
///
/// `Ok(None)` / an empty list mean "no match"; `Err` is reserved for
/// transport and decoding failures.
#[async_trait]
pub trait RatingsSource: Send + Sync {
    async fn fetch_by_id(&self, legacy_id: &str) -> Result<Option<RatingRecord>>;

    async fn search_by_name(&self, name: &str) -> Result<Vec<RatingRecord>>;
}

/// Connection settings for [`RmpClient`]
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub school_id: String,
    pub auth: String,
}

pub struct RmpClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl RmpClient {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, config })
    }

    async fn post<T: DeserializeOwned>(&self, body: Value) -> Result<GraphQlResponse<T>> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", &self.config.auth)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl RatingsSource for RmpClient {
    async fn fetch_by_id(&self, legacy_id: &str) -> Result<Option<RatingRecord>> {
        let response = self.post(node_request(legacy_id)).await?;
        node_from_response(response)
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<RatingRecord>> {
        let response = self
            .post(search_request(name, &self.config.school_id))
            .await?;
        candidates_from_response(response)
    }
}

/// Opaque node id the service derives from a legacy id
pub fn encode_teacher_id(legacy_id: &str) -> String {
    STANDARD.encode(format!("Teacher-{}", legacy_id))
}

fn node_request(legacy_id: &str) -> Value {
    json!({
        "query": TEACHER_QUERY,
        "variables": { "id": encode_teacher_id(legacy_id) },
    })
}

fn search_request(name: &str, school_id: &str) -> Value {
    json!({
        "query": SEARCH_QUERY,
        "variables": {
            "query": { "text": name, "schoolID": school_id },
        },
    })
}

fn node_from_response(response: GraphQlResponse<NodeData>) -> Result<Option<RatingRecord>> {
    match response.data {
        Some(data) => Ok(data.node.map(RatingRecord::from)),
        None => no_data(response.errors),
    }
}

fn candidates_from_response(response: GraphQlResponse<SearchData>) -> Result<Vec<RatingRecord>> {
    let Some(data) = response.data else {
        return no_data(response.errors);
    };

    Ok(data
        .new_search
        .and_then(|search| search.teachers)
        .map(|teachers| teachers.edges)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|edge| edge.node)
        .map(RatingRecord::from)
        .collect())
}

/// A missing `data` envelope is only an error when the service said why
fn no_data<T: Default>(errors: Option<Vec<crate::models::GraphQlError>>) -> Result<T> {
    match errors {
        Some(errors) if !errors.is_empty() => Err(Error::GraphQl(
            errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; "),
        )),
        _ => Ok(T::default()),
    }
}

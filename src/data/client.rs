//! Clients for the remote data service
//!
//! `Transport` is the only seam that touches the network. The query clients
//! on top of it build parameters, decode bodies and hand back owned records;
//! they never touch session state, merging results is the caller's job.

use crate::core::{
    config::ClientConfig,
    constants::{ANNOUNCEMENTS_PATH, PARTNERS_PATH},
};
use crate::data::{
    filter::FilterCriteria,
    records::{AnnouncementRecord, ItemsEnvelope, PointRecord},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Failure of a single service request. No partial data accompanies either
/// variant; an empty result set is a success, not an error.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Transport failure or a non-success HTTP status
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not the expected JSON shape
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        QueryError::Network(err.to_string())
    }
}

/// Issues one GET request and returns the raw response body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<String, QueryError>;
}

/// `Transport` backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| crate::MapError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<String, QueryError> {
        let url = self
            .config
            .endpoint(path)
            .map_err(|e| QueryError::Network(e.to_string()))?;
        log::trace!("GET {} {:?}", url, params);

        let resp = self.client.get(url).query(params).send().await?;
        if !resp.status().is_success() {
            return Err(QueryError::Network(format!("HTTP {}", resp.status())));
        }
        Ok(resp.text().await?)
    }
}

fn decode_items<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, QueryError> {
    let envelope: ItemsEnvelope<T> = serde_json::from_str(body)?;
    Ok(envelope.items)
}

/// Searches partners matching a criteria snapshot
#[derive(Clone)]
pub struct PartnerQueryClient {
    transport: Arc<dyn Transport>,
}

impl PartnerQueryClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn fetch(&self, criteria: &FilterCriteria) -> Result<Vec<PointRecord>, QueryError> {
        let params = criteria.to_query_parameters();
        let body = self.transport.get(PARTNERS_PATH, &params).await?;
        let points: Vec<PointRecord> = decode_items(&body)?;

        for point in points.iter().filter(|p| !p.position().is_valid()) {
            log::warn!(
                "partner {} has out-of-range coordinates ({}, {})",
                point.id,
                point.latitude,
                point.longitude
            );
        }
        Ok(points)
    }
}

/// Reads the announcement feed
#[derive(Clone)]
pub struct AnnouncementClient {
    transport: Arc<dyn Transport>,
}

impl AnnouncementClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn fetch(&self) -> Result<Vec<AnnouncementRecord>, QueryError> {
        let body = self.transport.get(ANNOUNCEMENTS_PATH, &[]).await?;
        decode_items(&body)
    }
}

//! HTTP access to the hotel backend.

use std::time::Duration;

use abi::{
    ApiConfig, AvailabilityQuery, AvailabilityRecord, Error, ErrorBody, LoginRequest,
    LoginResponse, RegisterRequest,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

pub const REGISTER_PATH: &str = "/api/users/register";
pub const LOGIN_PATH: &str = "/api/users/login";
pub const AVAILABILITY_PATH: &str = "/api/hotel/availability";
pub const AVAILABILITY_SEARCH_PATH: &str = "/api/hotel/availability/search";

#[async_trait]
pub trait HotelApi: Send + Sync {
    /// create an account; the body of a successful response is returned untouched
    async fn register(&self, req: &RegisterRequest) -> Result<Value, Error>;
    /// exchange credentials for a token and the user profile
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, Error>;
    /// availability records for a date range
    async fn search_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<Vec<AvailabilityRecord>, Error>;
    /// every availability record the backend knows about
    async fn list_availability(&self) -> Result<Vec<AvailabilityRecord>, Error>;
}

#[derive(Debug, Clone)]
pub struct HttpHotelApi {
    client: Client,
    config: ApiConfig,
}

impl HttpHotelApi {
    pub fn new(config: ApiConfig) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Network(format!("failed to create http client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Full url for `path`; fails before any request when no backend is configured.
    pub fn url(&self, path: &str) -> Result<String, Error> {
        Ok(format!("{}{}", self.config.backend_url()?, path))
    }

    async fn send(&self, req: RequestBuilder) -> Result<Value, Error> {
        let resp = req.send().await.map_err(network)?;
        let status = resp.status();
        let body = resp.text().await.map_err(network)?;
        debug!("backend answered {status}");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            warn!("request rejected with {status}: {message:?}");
            return Err(Error::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl HotelApi for HttpHotelApi {
    async fn register(&self, req: &RegisterRequest) -> Result<Value, Error> {
        let url = self.url(REGISTER_PATH)?;
        self.send(self.client.post(url).json(req)).await
    }

    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, Error> {
        let url = self.url(LOGIN_PATH)?;
        let value = self.send(self.client.post(url).json(req)).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn search_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<Vec<AvailabilityRecord>, Error> {
        let url = self.url(AVAILABILITY_SEARCH_PATH)?;
        let value = self
            .send(self.client.get(url).query(&query.to_query_pairs()))
            .await?;
        Ok(normalize_records(value))
    }

    async fn list_availability(&self) -> Result<Vec<AvailabilityRecord>, Error> {
        let url = self.url(AVAILABILITY_PATH)?;
        let value = self.send(self.client.get(url)).await?;
        Ok(normalize_records(value))
    }
}

/// A body that is not a JSON array counts as an empty result. Array items
/// that are not JSON objects are skipped.
pub fn normalize_records(value: Value) -> Vec<AvailabilityRecord> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("skipping malformed availability record: {e}");
                    None
                }
            })
            .collect(),
        other => {
            debug!("availability response is not a list: {other}");
            Vec::new()
        }
    }
}

fn network(e: reqwest::Error) -> Error {
    Error::Network(e.to_string())
}

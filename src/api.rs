use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;

/// Client for the homework statuses endpoint.
pub struct HomeworkApi {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl HomeworkApi {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    /// Fetch homework changes since `timestamp` and return the decoded JSON object.
    pub async fn get_api_answer(&self, timestamp: i64) -> Result<Map<String, Value>, ApiError> {
        debug!("Requesting homework statuses from {} since {}", self.endpoint, timestamp);

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", timestamp)])
            .send()
            .await
            .map_err(ApiError::Request)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ApiError::BadStatus(status));
        }

        let body = response.text().await.map_err(ApiError::Request)?;
        let value: Value = serde_json::from_str(&body).map_err(ApiError::JsonDecode)?;

        debug!("Received answer from homework API");

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(ApiError::NotAnObject),
        }
    }
}

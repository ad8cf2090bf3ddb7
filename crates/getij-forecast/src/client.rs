//! Supabase (PostgREST) client for the latest-row RPC.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::types::{ForecastError, LatestRow};

pub const DEFAULT_RPC_NAME: &str = "get_latest_sms";
const USER_AGENT: &str = concat!("getij/", env!("CARGO_PKG_VERSION"));

/// PostgREST error body
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    code: Option<String>,
    hint: Option<String>,
    details: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    rpc_name: String,
}

impl ForecastClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        rpc_name: &str,
        timeout: Duration,
    ) -> Result<Self, ForecastError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            rpc_name: rpc_name.to_string(),
        })
    }

    pub fn rpc_name(&self) -> &str {
        &self.rpc_name
    }

    fn rpc_url(&self) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, self.rpc_name)
    }

    /// Call the RPC and return its first row, if any.
    #[instrument(skip(self), fields(rpc = %self.rpc_name), level = "info")]
    pub async fn fetch_latest(&self) -> Result<Option<LatestRow>, ForecastError> {
        let response = self
            .client
            .post(self.rpc_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let body = self.handle_response(response).await?;
        let row = first_row(body)?;

        tracing::info!(found = row.is_some(), "Latest row fetched");
        Ok(row)
    }

    /// Helper to handle API responses and errors.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value, ForecastError> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(|e| ForecastError::Rpc {
                status: status.as_u16(),
                code: None,
                message: format!("invalid JSON response: {}", e),
            });
        }

        let text = response.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<PostgrestError>(&text) {
            Ok(err) => {
                tracing::debug!(
                    code = ?err.code,
                    hint = ?err.hint,
                    details = ?err.details,
                    "PostgREST error"
                );
                let message = err.message.unwrap_or_else(|| status.to_string());
                (err.code, message)
            }
            Err(_) if !text.trim().is_empty() => (None, format!("{}: {}", status, text.trim())),
            Err(_) => (None, status.to_string()),
        };

        Err(ForecastError::Rpc {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

/// Pick the row out of an RPC response body.
///
/// Set-returning functions answer with an array; scalar-row functions with
/// a bare object.
fn first_row(body: Value) -> Result<Option<LatestRow>, ForecastError> {
    let row = match body {
        Value::Null => return Ok(None),
        Value::Array(rows) => match rows.into_iter().next() {
            Some(row) => row,
            None => return Ok(None),
        },
        row @ Value::Object(_) => row,
        other => {
            return Err(ForecastError::Rpc {
                status: 200,
                code: None,
                message: format!("unexpected RPC response: {}", other),
            })
        }
    };

    serde_json::from_value(row)
        .map(Some)
        .map_err(|e| ForecastError::Payload(format!("unexpected row shape: {}", e)))
}

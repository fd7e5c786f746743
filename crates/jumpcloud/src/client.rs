use std::time::Duration;

use reqwest::StatusCode;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::decode::decode_events;
use crate::error::JumpCloudError;
use crate::events::EventPage;

pub const DEFAULT_BASE_URL: &str = "https://api.jumpcloud.com";

const EVENTS_PATH: &str = "/insights/directory/v1/events";
const PAGE_LIMIT: u32 = 10_000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection parameters for [`JumpCloudClient::new`].
#[derive(Debug, Clone, Default)]
pub struct JumpCloudClientOptions {
    pub api_key: String,
    /// Defaults to [`DEFAULT_BASE_URL`] when absent.
    pub base_url: Option<String>,
    /// Sent as `x-org-id` when present (multi-tenant administrator keys).
    pub org_id: Option<String>,
}

/// Client for the Directory Insights events endpoint.
#[derive(Debug, Clone)]
pub struct JumpCloudClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    org_id: Option<String>,
}

impl JumpCloudClient {
    pub fn new(options: JumpCloudClientOptions) -> Result<Self, JumpCloudError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(JumpCloudError::Http)?;
        Ok(Self {
            http,
            api_key: options.api_key,
            base_url: options
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            org_id: options.org_id,
        })
    }

    /// Fetches one page of events, across all kinds, at or after `start`.
    ///
    /// Issues exactly one request; there is no pagination within a run. The
    /// endpoint answers 200 with an empty array when there is nothing new, so
    /// any other status is a hard failure carried back with its body.
    pub async fn events_since(&self, start: OffsetDateTime) -> Result<EventPage, JumpCloudError> {
        let url = format!("{}{EVENTS_PATH}", self.base_url);
        let mut request = self
            .http
            .post(url)
            .header("x-api-key", &self.api_key)
            .json(&request_body(start)?);
        if let Some(org_id) = &self.org_id {
            request = request.header("x-org-id", org_id);
        }

        let response = request.send().await.map_err(JumpCloudError::Request)?;
        let status = response.status();
        let body = response.text().await.map_err(JumpCloudError::ReadBody)?;
        if status != StatusCode::OK {
            return Err(JumpCloudError::Status { status, body });
        }

        decode_events(&body)
    }
}

fn request_body(start: OffsetDateTime) -> Result<serde_json::Value, JumpCloudError> {
    // The endpoint requires the start time in RFC 3339.
    let start_time = start.format(&Rfc3339)?;
    Ok(serde_json::json!({
        "service": ["all"],
        "start_time": start_time,
        "limit": PAGE_LIMIT,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn request_body_asks_for_all_services_with_an_rfc3339_start() {
        let body = request_body(datetime!(2023-04-01 12:00:00 UTC)).unwrap();
        assert_eq!(body["service"], serde_json::json!(["all"]));
        assert_eq!(body["start_time"], "2023-04-01T12:00:00Z");
        assert_eq!(body["limit"], 10_000);
    }

    #[test]
    fn base_url_defaults_when_not_configured() {
        let client = JumpCloudClient::new(JumpCloudClientOptions {
            api_key: "key".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);

        let client = JumpCloudClient::new(JumpCloudClientOptions {
            api_key: "key".to_string(),
            base_url: Some("https://eu.api.jumpcloud.com".to_string()),
            org_id: None,
        })
        .unwrap();
        assert_eq!(client.base_url, "https://eu.api.jumpcloud.com");
    }
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{ApiError, ServerError};
use crate::models::{BadgeCountsDto, TradeRecordDto};
use crate::utils::http_client;

const TRADE_RECORDS_PATH: &str = "/api/v1/trade-records";
const BADGES_PATH: &str = "/api/v1/badges";

/// Backend operations the synchronizer reads from.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_trade_records(&self) -> Result<Vec<TradeRecordDto>, ApiError>;
    async fn fetch_badge_counts(&self) -> Result<BadgeCountsDto, ApiError>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

pub struct HttpRemote {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpRemote {
    pub fn new(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpRemote {
            client,
            base_url,
            token,
        }
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let client = http_client(cfg.http_timeout)?;
        Ok(Self::new(client, cfg.api_base_url.clone(), cfg.api_token.clone()))
    }

    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.get(&url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");
        decode_body(status, &body)
    }
}

/// Turn a raw response into the payload or the matching `ApiError`.
pub(crate) fn decode_body<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, ApiError> {
    if !status.is_success() {
        let err = serde_json::from_slice::<ServerError>(body).unwrap_or_else(|_| ServerError {
            code: status.as_u16().to_string(),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
            data: None,
        });
        return Err(ApiError::Server(err));
    }
    if body.is_empty() {
        return Err(ApiError::EmptyData);
    }
    let env: Envelope<T> = serde_json::from_slice(body)?;
    env.data.ok_or(ApiError::EmptyData)
}

#[async_trait]
impl RemoteSource for HttpRemote {
    async fn fetch_trade_records(&self) -> Result<Vec<TradeRecordDto>, ApiError> {
        self.get(TRADE_RECORDS_PATH).await
    }

    async fn fetch_badge_counts(&self) -> Result<BadgeCountsDto, ApiError> {
        self.get(BADGES_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_envelope_payload() {
        let body = br#"{"data":{"emerald":1,"gold":2,"silver":3,"bronze":4}}"#;
        let dto: BadgeCountsDto = decode_body(StatusCode::OK, body).unwrap();
        assert_eq!(dto.gold, 2);
    }

    #[test]
    fn null_or_missing_data_is_empty() {
        let r: Result<BadgeCountsDto, _> = decode_body(StatusCode::OK, br#"{"data":null}"#);
        assert_eq!(r.unwrap_err(), ApiError::EmptyData);
        let r: Result<BadgeCountsDto, _> = decode_body(StatusCode::OK, br#"{}"#);
        assert_eq!(r.unwrap_err(), ApiError::EmptyData);
        let r: Result<BadgeCountsDto, _> = decode_body(StatusCode::OK, b"");
        assert_eq!(r.unwrap_err(), ApiError::EmptyData);
    }

    #[test]
    fn malformed_body_is_decoding_error() {
        let r: Result<BadgeCountsDto, _> = decode_body(StatusCode::OK, br#"{"data":{"gold":"x"}}"#);
        assert!(matches!(r, Err(ApiError::Decoding(_))));
    }

    #[test]
    fn server_error_payload_is_surfaced() {
        let body = br#"{"code":"AUTH-001","message":"expired token","data":{"reauth":true}}"#;
        let r: Result<BadgeCountsDto, _> = decode_body(StatusCode::UNAUTHORIZED, body);
        match r {
            Err(ApiError::Server(e)) => {
                assert_eq!(e.code, "AUTH-001");
                assert_eq!(e.detail("reauth"), Some(&serde_json::json!(true)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_json_error_body_falls_back_to_status() {
        let r: Result<BadgeCountsDto, _> =
            decode_body(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        match r {
            Err(ApiError::Server(e)) => {
                assert_eq!(e.code, "502");
                assert_eq!(e.message, "Bad Gateway");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as _;
use thiserror::Error;

/// Failures of a remote fetch. Closed set: every transport, payload and
/// backend failure maps onto exactly one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("No internet connection")]
    NoInternet,

    #[error("Request timed out")]
    Timeout,

    #[error("Connection lost")]
    ConnectionLost,

    #[error("Could not resolve host")]
    DnsFailure,

    #[error("Secure connection failed")]
    TlsFailure,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Failed to decode response: {0}")]
    Decoding(String),

    #[error("Response contained no data")]
    EmptyData,

    #[error("Server error {0}")]
    Server(ServerError),
}

/// Error payload reported by the backend. `data` is whatever JSON the
/// server attached and is kept undecoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl ServerError {
    /// Look up a field of the attached data, e.g. `detail("field")`.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|d| d.get(key))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ApiError::Timeout;
        }
        if err.is_decode() {
            return ApiError::Decoding(err.to_string());
        }
        if err.is_connect() {
            let chain = source_chain(&err).to_ascii_lowercase();
            if chain.contains("dns") || chain.contains("resolve") {
                return ApiError::DnsFailure;
            }
            if chain.contains("certificate") || chain.contains("tls") || chain.contains("ssl") {
                return ApiError::TlsFailure;
            }
            return ApiError::NoInternet;
        }
        ApiError::ConnectionLost
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decoding(err.to_string())
    }
}

fn source_chain(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(e) = cur {
        out.push_str(": ");
        out.push_str(&e.to_string());
        cur = e.source();
    }
    out
}

/// Failures of the local cache store.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache storage error: {0}")]
    Storage(String),

    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for CacheError {
    fn from(err: rusqlite::Error) -> Self {
        CacheError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::dates::Locale;
use crate::logging::LogConfig;

pub const DEFAULT_API_URL: &str = "https://api.hedge.app";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub http_timeout: Duration,
    /// How long the CLI waits for background refreshes before exiting.
    pub refresh_grace: Duration,
    pub locale: Locale,
    pub db_path: Option<PathBuf>,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            http_timeout: Duration::from_secs(15),
            refresh_grace: Duration::from_secs(5),
            locale: Locale::Korean,
            db_path: None,
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Read `HEDGE_*` variables (and `.env` when present).
    pub fn from_env() -> Self {
        let _ = dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Config::default();
        let non_empty = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let secs = |k: &str, fallback: Duration| {
            non_empty(k)
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(fallback)
        };

        Config {
            api_base_url: non_empty("HEDGE_API_URL").unwrap_or(d.api_base_url),
            api_token: non_empty("HEDGE_API_TOKEN"),
            http_timeout: secs("HEDGE_HTTP_TIMEOUT_SECS", d.http_timeout),
            refresh_grace: secs("HEDGE_REFRESH_GRACE_SECS", d.refresh_grace),
            locale: non_empty("HEDGE_LOCALE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(d.locale),
            db_path: non_empty("HEDGE_DB").map(PathBuf::from),
            log: LogConfig::from_lookup(&get),
        }
    }
}

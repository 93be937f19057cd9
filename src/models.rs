// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Buy,
    Sell,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Buy => "buy",
            OrderType::Sell => "sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emotion {
    Calm,
    Confident,
    Excited,
    Anxious,
    Fearful,
    Greedy,
    Regretful,
    #[serde(other)]
    Unknown,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Calm => "calm",
            Emotion::Confident => "confident",
            Emotion::Excited => "excited",
            Emotion::Anxious => "anxious",
            Emotion::Fearful => "fearful",
            Emotion::Greedy => "greedy",
            Emotion::Regretful => "regretful",
            Emotion::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipleCheck {
    pub principle_id: i64,
    pub principle: String,
    pub is_followed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: i64,
    pub symbol: String,
    pub market: String,
    pub order_type: OrderType,
    pub price: i64,
    pub currency: String,
    pub volume: i64,
    pub order_date: String, // yyyy.MM.dd or locale long form
    pub return_rate: Option<f64>,
    pub content: String,
    pub principle_checks: Vec<PrincipleCheck>,
    pub emotion: Emotion,
}

impl TradeRecord {
    pub fn followed_principles(&self) -> usize {
        self.principle_checks.iter().filter(|c| c.is_followed).count()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCounts {
    pub emerald: u32,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

impl BadgeCounts {
    pub fn total(&self) -> u64 {
        [self.emerald, self.gold, self.silver, self.bronze]
            .iter()
            .map(|c| u64::from(*c))
            .sum()
    }
}

// Wire formats as sent by the backend.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipleCheckDto {
    pub principle_id: i64,
    pub principle: String,
    pub is_followed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecordDto {
    pub trade_id: i64,
    pub symbol: String,
    pub market: String,
    pub order_type: OrderType,
    pub price: i64,
    pub currency: String,
    pub volume: i64,
    pub order_date: String,
    #[serde(default, rename = "yield")]
    pub return_rate: Option<f64>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub principle_checks: Vec<PrincipleCheckDto>,
    pub emotion: Emotion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeCountsDto {
    pub emerald: i64,
    pub gold: i64,
    pub silver: i64,
    pub bronze: i64,
}

impl From<TradeRecordDto> for TradeRecord {
    fn from(dto: TradeRecordDto) -> Self {
        TradeRecord {
            id: dto.trade_id,
            symbol: dto.symbol,
            market: dto.market,
            order_type: dto.order_type,
            price: dto.price,
            currency: dto.currency,
            volume: dto.volume,
            order_date: dto.order_date,
            return_rate: dto.return_rate,
            content: dto.content,
            principle_checks: dto
                .principle_checks
                .into_iter()
                .map(|c| PrincipleCheck {
                    principle_id: c.principle_id,
                    principle: c.principle,
                    is_followed: c.is_followed,
                })
                .collect(),
            emotion: dto.emotion,
        }
    }
}

impl TryFrom<BadgeCountsDto> for BadgeCounts {
    type Error = ApiError;

    fn try_from(dto: BadgeCountsDto) -> Result<Self, Self::Error> {
        fn counter(name: &str, v: i64) -> Result<u32, ApiError> {
            u32::try_from(v)
                .map_err(|_| ApiError::Decoding(format!("badge count '{}' out of range: {}", name, v)))
        }
        Ok(BadgeCounts {
            emerald: counter("emerald", dto.emerald)?,
            gold: counter("gold", dto.gold)?,
            silver: counter("silver", dto.silver)?,
            bronze: counter("bronze", dto.bronze)?,
        })
    }
}

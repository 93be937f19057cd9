// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TradeRecord;
use crate::sync::{Synchronizer, TradeRecords};
use crate::utils::{format_amount, format_return_rate, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Context, Result};

pub async fn handle(sync: &Synchronizer, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        list(sync, sub).await?;
    }
    Ok(())
}

async fn list(sync: &Synchronizer, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let symbol = sub.get_one::<String>("symbol").map(|s| s.as_str());
    let min_price = sub
        .get_one::<String>("min-price")
        .map(|s| parse_amount(s))
        .transpose()?;

    let records = sync
        .fetch::<TradeRecords>()
        .await
        .context("Failed to load trade records")?;
    let data = filter_by_min_price(filter_by_symbol(records, symbol), min_price);

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Symbol", "Market", "Side", "Price", "Volume", "Return", "Emotion", "Principles"],
                table_rows(&data),
            )
        );
    }
    Ok(())
}

/// Case-insensitive symbol filter; `None` keeps everything.
pub fn filter_by_symbol(records: Vec<TradeRecord>, symbol: Option<&str>) -> Vec<TradeRecord> {
    match symbol.map(str::trim).filter(|s| !s.is_empty()) {
        Some(sym) => records
            .into_iter()
            .filter(|r| r.symbol.eq_ignore_ascii_case(sym))
            .collect(),
        None => records,
    }
}

pub fn filter_by_min_price(records: Vec<TradeRecord>, min: Option<i64>) -> Vec<TradeRecord> {
    match min {
        Some(min) => records.into_iter().filter(|r| r.price >= min).collect(),
        None => records,
    }
}

pub fn table_rows(records: &[TradeRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.order_date.clone(),
                r.symbol.clone(),
                r.market.clone(),
                r.order_type.as_str().to_string(),
                format!("{} {}", format_amount(r.price), r.currency),
                format_amount(r.volume),
                format_return_rate(r.return_rate),
                r.emotion.as_str().to_string(),
                format!("{}/{}", r.followed_principles(), r.principle_checks.len()),
            ]
        })
        .collect()
}

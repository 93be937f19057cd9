// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::dates::Locale;
use crate::grouping::{group, GroupedRetrospectionByCompany};
use crate::sync::{Synchronizer, TradeRecords};
use crate::utils::{format_amount, format_return_rate, maybe_print_json, parse_date};
use anyhow::{Context, Result};

pub async fn handle(sync: &Synchronizer, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let now = match sub.get_one::<String>("now") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let locale = match sub.get_one::<String>("locale") {
        Some(s) => s.parse::<Locale>()?,
        None => cfg.locale,
    };

    let records = sync
        .fetch::<TradeRecords>()
        .await
        .context("Failed to load trade records")?;
    let groups = group(&records, now, locale);

    if !maybe_print_json(json_flag, jsonl_flag, &groups)? {
        print!("{}", render(&groups));
    }
    Ok(())
}

/// Indented text form of the grouped history.
pub fn render(groups: &[GroupedRetrospectionByCompany]) -> String {
    let mut out = String::new();
    for company in groups {
        out.push_str(&format!("{} ({})\n", company.symbol, company.record_count()));
        for month in &company.months {
            out.push_str(&format!("  {}\n", month.title));
            for day in &month.days {
                out.push_str(&format!("    {}\n", day.title));
                for r in &day.records {
                    out.push_str(&format!(
                        "      #{} {} {} x {} {} {}\n",
                        r.id,
                        r.order_type.as_str(),
                        format_amount(r.price),
                        format_amount(r.volume),
                        r.currency,
                        format_return_rate(r.return_rate),
                    ));
                }
            }
        }
    }
    out
}

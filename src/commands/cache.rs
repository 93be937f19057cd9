// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cache::SqliteCache;
use crate::sync::{Badges, Synchronizer, TradeRecords};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(store: &SqliteCache, sync: &Synchronizer, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("status", _)) => status(store)?,
        Some(("clear", sub)) => {
            let what = sub
                .get_one::<String>("what")
                .map(|s| s.as_str())
                .unwrap_or("all");
            clear(sync, what)?;
            println!("Cleared cached {}", what);
        }
        _ => {}
    }
    Ok(())
}

fn status(store: &SqliteCache) -> Result<()> {
    let rows: Vec<Vec<String>> = store
        .entries()?
        .into_iter()
        .map(|e| vec![e.key, e.bytes.to_string(), e.updated_at])
        .collect();
    if rows.is_empty() {
        println!("Cache is empty");
    } else {
        println!("{}", pretty_table(&["Key", "Bytes", "Updated"], rows));
    }
    Ok(())
}

pub fn clear(sync: &Synchronizer, what: &str) -> Result<()> {
    match what {
        "trades" => sync.clear::<TradeRecords>()?,
        "badges" => sync.clear::<Badges>()?,
        "all" => {
            sync.clear::<TradeRecords>()?;
            sync.clear::<Badges>()?;
        }
        other => anyhow::bail!("Unknown cache slot '{}'", other),
    }
    Ok(())
}

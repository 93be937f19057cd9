// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::sync::{Badges, Synchronizer};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub async fn handle(sync: &Synchronizer, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let counts = sync
        .fetch::<Badges>()
        .await
        .context("Failed to load badge counts")?;

    if !maybe_print_json(json_flag, jsonl_flag, &counts)? {
        let rows = vec![
            vec!["emerald".to_string(), counts.emerald.to_string()],
            vec!["gold".to_string(), counts.gold.to_string()],
            vec!["silver".to_string(), counts.silver.to_string()],
            vec!["bronze".to_string(), counts.bronze.to_string()],
            vec!["total".to_string(), counts.total().to_string()],
        ];
        println!("{}", pretty_table(&["Badge", "Count"], rows));
    }
    Ok(())
}

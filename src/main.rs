// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::sync::Arc;
use tracing::warn;

use hedge::{cli, commands, config::Config, db, logging, remote::HttpRemote, sync::Synchronizer};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    logging::init_logging(&cfg.log)?;

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = Arc::new(db::open_cache(cfg.db_path.as_deref())?);
    let remote = Arc::new(HttpRemote::from_config(&cfg)?);
    let sync = Synchronizer::new(store.clone(), remote);

    let res = match matches.subcommand() {
        Some(("trades", sub)) => commands::trades::handle(&sync, sub).await,
        Some(("history", sub)) => commands::history::handle(&sync, &cfg, sub).await,
        Some(("badges", sub)) => commands::badges::handle(&sync, sub).await,
        Some(("cache", sub)) => commands::cache::handle(&store, &sync, sub),
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    };

    // Give background refreshes a chance to land in the cache before exit.
    if tokio::time::timeout(cfg.refresh_grace, sync.drain()).await.is_err() {
        warn!(grace = ?cfg.refresh_grace, "background refresh still running; aborting");
        sync.shutdown().await;
    }
    res
}

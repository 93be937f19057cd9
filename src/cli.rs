// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("hedge")
        .version(crate_version!())
        .about("Hedge: trade journal sync and monthly retrospection")
        .subcommand(
            Command::new("trades")
                .about("Trade records")
                .subcommand(json_args(
                    Command::new("list")
                        .about("List trade records (cached first, refreshed in background)")
                        .arg(
                            Arg::new("symbol")
                                .long("symbol")
                                .help("Only records for this symbol"),
                        )
                        .arg(
                            Arg::new("min-price")
                                .long("min-price")
                                .help("Only records priced at or above this amount (e.g. 1,000,000)"),
                        ),
                )),
        )
        .subcommand(json_args(
            Command::new("history")
                .about("Trade history grouped by symbol, month and day")
                .arg(
                    Arg::new("now")
                        .long("now")
                        .help("Reference date YYYY-MM-DD (default: today)"),
                )
                .arg(
                    Arg::new("locale")
                        .long("locale")
                        .value_parser(["ko", "en"])
                        .help("Title language (default from HEDGE_LOCALE)"),
                ),
        ))
        .subcommand(json_args(
            Command::new("badges").about("Feedback badge counts"),
        ))
        .subcommand(
            Command::new("cache")
                .about("Local cache")
                .subcommand(Command::new("status").about("Show cached entries"))
                .subcommand(
                    Command::new("clear").about("Clear cached data").arg(
                        Arg::new("what")
                            .value_parser(["trades", "badges", "all"])
                            .default_value("all"),
                    ),
                ),
        )
}

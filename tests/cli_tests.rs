// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use hedge::commands::{history, trades};
use hedge::dates::Locale;
use hedge::grouping::group;
use hedge::models::{Emotion, OrderType, PrincipleCheck, TradeRecord, TradeRecordDto};
use hedge::cli;
use hedge::utils::parse_amount;

fn rec(id: i64, symbol: &str, date: &str) -> TradeRecord {
    TradeRecord {
        id,
        symbol: symbol.to_string(),
        market: "NASDAQ".to_string(),
        order_type: OrderType::Buy,
        price: 1_234_500,
        currency: "KRW".to_string(),
        volume: 3,
        order_date: date.to_string(),
        return_rate: Some(-1.25),
        content: String::new(),
        principle_checks: vec![
            PrincipleCheck {
                principle_id: 1,
                principle: "Never chase a gap".to_string(),
                is_followed: true,
            },
            PrincipleCheck {
                principle_id: 2,
                principle: "Size under 5%".to_string(),
                is_followed: false,
            },
        ],
        emotion: Emotion::Anxious,
    }
}

#[test]
fn history_args_parse() {
    let matches = cli::build_cli().get_matches_from([
        "hedge", "history", "--now", "2025-11-15", "--locale", "en", "--json",
    ]);
    let Some(("history", sub)) = matches.subcommand() else {
        panic!("no history subcommand");
    };
    assert_eq!(sub.get_one::<String>("now").unwrap(), "2025-11-15");
    assert_eq!(sub.get_one::<String>("locale").unwrap(), "en");
    assert!(sub.get_flag("json"));
    assert!(!sub.get_flag("jsonl"));
}

#[test]
fn json_and_jsonl_conflict() {
    let res = cli::build_cli().try_get_matches_from(["hedge", "badges", "--json", "--jsonl"]);
    assert!(res.is_err());
}

#[test]
fn cache_clear_defaults_to_all_and_rejects_unknown() {
    let matches = cli::build_cli().get_matches_from(["hedge", "cache", "clear"]);
    if let Some(("cache", cache_m)) = matches.subcommand() {
        if let Some(("clear", clear_m)) = cache_m.subcommand() {
            assert_eq!(clear_m.get_one::<String>("what").unwrap(), "all");
        } else {
            panic!("no clear subcommand");
        }
    } else {
        panic!("no cache subcommand");
    }
    assert!(cli::build_cli()
        .try_get_matches_from(["hedge", "cache", "clear", "principles"])
        .is_err());
}

#[test]
fn symbol_filter_is_case_insensitive() {
    let records = vec![rec(1, "aapl", "2025.11.01"), rec(2, "TSLA", "2025.11.01")];
    let out = trades::filter_by_symbol(records.clone(), Some(" AAPL "));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, 1);
    assert_eq!(trades::filter_by_symbol(records, None).len(), 2);
}

#[test]
fn min_price_filter_takes_separated_amounts() {
    let mut cheap = rec(2, "TSLA", "2025.11.01");
    cheap.price = 999_999;
    let records = vec![rec(1, "AAPL", "2025.11.01"), cheap];

    let m = cli::build_cli().get_matches_from(["hedge", "trades", "list", "--min-price", "1,000,000"]);
    let (_, trades_m) = m.subcommand().unwrap();
    let (_, list_m) = trades_m.subcommand().unwrap();
    let min = list_m
        .get_one::<String>("min-price")
        .map(|s| parse_amount(s).unwrap());
    assert_eq!(min, Some(1_000_000));

    let out = trades::filter_by_min_price(records.clone(), min);
    let ids: Vec<_> = out.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1]);
    // inclusive bound
    assert_eq!(trades::filter_by_min_price(records.clone(), Some(999_999)).len(), 2);
    assert_eq!(trades::filter_by_min_price(records, None).len(), 2);
}

#[test]
fn table_rows_format_amounts() {
    let rows = trades::table_rows(&[rec(5, "AAPL", "2025.11.01")]);
    assert_eq!(rows[0][5], "1,234,500 KRW");
    assert_eq!(rows[0][7], "-1.25%");
    assert_eq!(rows[0][8], "anxious");
    assert_eq!(rows[0][9], "1/2");
}

#[test]
fn history_render_nests_titles() {
    let now = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
    let groups = group(&[rec(5, "AAPL", "2025.11.01")], now, Locale::Korean);
    let text = history::render(&groups);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "AAPL (1)");
    assert_eq!(lines[1], "  이번달 회고");
    assert_eq!(lines[2], "    11월 1일");
    assert_eq!(lines[3], "      #5 buy 1,234,500 x 3 KRW -1.25%");
}

#[test]
fn dto_decodes_wire_json() {
    let raw = r#"{
        "tradeId": 42,
        "symbol": "005930",
        "market": "KOSPI",
        "orderType": "SELL",
        "price": 71500,
        "currency": "KRW",
        "volume": 20,
        "orderDate": "2025년 11월 1일",
        "yield": 4.2,
        "content": "took profit",
        "principleChecks": [{"principleId": 3, "principle": "Sell into strength", "isFollowed": true}],
        "emotion": "SOMETHING_NEW"
    }"#;
    let dto: TradeRecordDto = serde_json::from_str(raw).unwrap();
    let r = TradeRecord::from(dto);
    assert_eq!(r.id, 42);
    assert_eq!(r.order_type, OrderType::Sell);
    assert_eq!(r.return_rate, Some(4.2));
    assert_eq!(r.emotion, Emotion::Unknown);
    assert_eq!(r.followed_principles(), 1);
}

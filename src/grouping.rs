// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::dates::{day_title, month_title, parse_order_date, Locale};
use crate::models::TradeRecord;

/// Month bucket relative to the reference date of one grouping pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonthSection {
    ThisMonth,
    LastMonth,
    Absolute { year: i32, month: u32 },
}

impl MonthSection {
    pub fn classify(date: NaiveDate, now: NaiveDate) -> Self {
        let key = (date.year(), date.month());
        if key == (now.year(), now.month()) {
            return MonthSection::ThisMonth;
        }
        if let Some(prev) = now.checked_sub_months(Months::new(1)) {
            if key == (prev.year(), prev.month()) {
                return MonthSection::LastMonth;
            }
        }
        MonthSection::Absolute {
            year: key.0,
            month: key.1,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            MonthSection::ThisMonth => 0,
            MonthSection::LastMonth => 1,
            MonthSection::Absolute { .. } => 2,
        }
    }
}

// Newest first: this month, last month, then absolute months descending.
impl Ord for MonthSection {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                MonthSection::Absolute { year: y1, month: m1 },
                MonthSection::Absolute { year: y2, month: m2 },
            ) => (y2, m2).cmp(&(y1, m1)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for MonthSection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRetrospectionGroup {
    pub date: NaiveDate,
    pub title: String,
    pub records: Vec<TradeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRetrospectionGroup {
    pub section: MonthSection,
    pub title: String,
    pub days: Vec<DailyRetrospectionGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedRetrospectionByCompany {
    pub symbol: String,
    pub months: Vec<MonthlyRetrospectionGroup>,
}

impl GroupedRetrospectionByCompany {
    pub fn record_count(&self) -> usize {
        self.months
            .iter()
            .flat_map(|m| m.days.iter())
            .map(|d| d.records.len())
            .sum()
    }
}

/// Build the symbol -> month -> day tree. Every record is classified
/// against the same `now`; records whose order date cannot be parsed are
/// left out.
pub fn group(
    records: &[TradeRecord],
    now: NaiveDate,
    locale: Locale,
) -> Vec<GroupedRetrospectionByCompany> {
    type Days = BTreeMap<NaiveDate, Vec<TradeRecord>>;
    let mut by_symbol: BTreeMap<&str, BTreeMap<MonthSection, Days>> = BTreeMap::new();
    let mut dropped = 0usize;

    for rec in records {
        let Some(date) = parse_order_date(&rec.order_date, locale) else {
            warn!(id = rec.id, order_date = %rec.order_date, "unparseable order date; record skipped");
            dropped += 1;
            continue;
        };
        by_symbol
            .entry(rec.symbol.as_str())
            .or_default()
            .entry(MonthSection::classify(date, now))
            .or_default()
            .entry(date)
            .or_default()
            .push(rec.clone());
    }

    if dropped > 0 {
        debug!(dropped, total = records.len(), "grouping dropped records");
    }

    by_symbol
        .into_iter()
        .map(|(symbol, months)| GroupedRetrospectionByCompany {
            symbol: symbol.to_string(),
            months: months
                .into_iter()
                .map(|(section, days)| MonthlyRetrospectionGroup {
                    section,
                    title: month_title(section, locale),
                    days: days
                        .into_iter()
                        .rev()
                        .map(|(date, records)| DailyRetrospectionGroup {
                            date,
                            title: day_title(date, locale),
                            records,
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn section_order_is_newest_first() {
        let mut v = vec![
            MonthSection::Absolute { year: 2023, month: 5 },
            MonthSection::LastMonth,
            MonthSection::Absolute { year: 2024, month: 12 },
            MonthSection::ThisMonth,
            MonthSection::Absolute { year: 2024, month: 1 },
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                MonthSection::ThisMonth,
                MonthSection::LastMonth,
                MonthSection::Absolute { year: 2024, month: 12 },
                MonthSection::Absolute { year: 2024, month: 1 },
                MonthSection::Absolute { year: 2023, month: 5 },
            ]
        );
    }

    #[test]
    fn classify_handles_year_rollover() {
        let now = ymd(2025, 1, 10);
        assert_eq!(MonthSection::classify(ymd(2025, 1, 31), now), MonthSection::ThisMonth);
        assert_eq!(MonthSection::classify(ymd(2024, 12, 20), now), MonthSection::LastMonth);
        assert_eq!(
            MonthSection::classify(ymd(2024, 1, 20), now),
            MonthSection::Absolute { year: 2024, month: 1 }
        );
    }

    #[test]
    fn classify_on_month_end() {
        // March 31 minus one month clamps to Feb, still the previous month.
        let now = ymd(2025, 3, 31);
        assert_eq!(MonthSection::classify(ymd(2025, 2, 1), now), MonthSection::LastMonth);
    }
}

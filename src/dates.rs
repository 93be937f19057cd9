// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Order-date parsing and retrospection labels.
//!
//! Everything here takes the locale explicitly so output never depends on
//! the host's locale settings.

use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

use crate::grouping::MonthSection;

const DOTTED: &str = "%Y.%m.%d";
const KOREAN_LONG: &str = "%Y년 %m월 %d일";
const ENGLISH_LONG: &str = "%B %d, %Y";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Korean,
    English,
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "ko-kr" | "korean" => Ok(Locale::Korean),
            "en" | "en-us" | "english" => Ok(Locale::English),
            other => Err(anyhow::anyhow!("Unknown locale '{}', expected ko or en", other)),
        }
    }
}

impl Locale {
    /// Input form accepted on top of the wire formats, if any.
    fn extra_format(&self) -> Option<&'static str> {
        match self {
            Locale::Korean => None,
            Locale::English => Some(ENGLISH_LONG),
        }
    }
}

/// Parse a record's order date. `yyyy.MM.dd` and `yyyy년 M월 d일` are
/// always accepted, whatever the display locale; the locale may add one
/// more form. Anything else yields `None`.
pub fn parse_order_date(text: &str, locale: Locale) -> Option<NaiveDate> {
    let t = text.trim();
    [DOTTED, KOREAN_LONG]
        .into_iter()
        .chain(locale.extra_format())
        .find_map(|fmt| NaiveDate::parse_from_str(t, fmt).ok())
}

pub fn month_title(section: MonthSection, locale: Locale) -> String {
    match (locale, section) {
        (Locale::Korean, MonthSection::ThisMonth) => "이번달 회고".to_string(),
        (Locale::Korean, MonthSection::LastMonth) => "지난달 회고".to_string(),
        (Locale::Korean, MonthSection::Absolute { year, month }) => {
            format!("{:02}년 {}월 회고", year.rem_euclid(100), month)
        }
        (Locale::English, MonthSection::ThisMonth) => "This month's retrospection".to_string(),
        (Locale::English, MonthSection::LastMonth) => "Last month's retrospection".to_string(),
        (Locale::English, MonthSection::Absolute { year, month }) => {
            match NaiveDate::from_ymd_opt(year, month, 1) {
                Some(d) => format!("{} retrospection", d.format("%b %Y")),
                None => format!("{}-{:02} retrospection", year, month),
            }
        }
    }
}

pub fn day_title(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Korean => format!("{}월 {}일", date.month(), date.day()),
        Locale::English => date.format("%b %-d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_both_korean_formats() {
        assert_eq!(parse_order_date("2025.11.01", Locale::Korean), Some(ymd(2025, 11, 1)));
        assert_eq!(parse_order_date("2025년 11월 1일", Locale::Korean), Some(ymd(2025, 11, 1)));
        assert_eq!(parse_order_date(" 2024년 3월 15일 ", Locale::Korean), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert_eq!(parse_order_date("not-a-date", Locale::Korean), None);
        assert_eq!(parse_order_date("2025.02.30", Locale::Korean), None);
        assert_eq!(parse_order_date("", Locale::Korean), None);
    }

    #[test]
    fn english_long_form() {
        assert_eq!(parse_order_date("November 1, 2025", Locale::English), Some(ymd(2025, 11, 1)));
        assert_eq!(parse_order_date("2025.11.01", Locale::English), Some(ymd(2025, 11, 1)));
        assert_eq!(parse_order_date("2025년 11월 1일", Locale::English), Some(ymd(2025, 11, 1)));
        assert_eq!(parse_order_date("November 1, 2025", Locale::Korean), None);
    }

    #[test]
    fn titles() {
        assert_eq!(day_title(ymd(2025, 11, 1), Locale::Korean), "11월 1일");
        assert_eq!(
            month_title(MonthSection::Absolute { year: 2025, month: 11 }, Locale::Korean),
            "25년 11월 회고"
        );
        assert_eq!(
            month_title(MonthSection::Absolute { year: 2005, month: 3 }, Locale::Korean),
            "05년 3월 회고"
        );
        assert_eq!(
            month_title(MonthSection::Absolute { year: 2024, month: 12 }, Locale::English),
            "Dec 2024 retrospection"
        );
        assert_eq!(day_title(ymd(2025, 11, 1), Locale::English), "Nov 1");
    }

    #[test]
    fn locale_from_str() {
        assert_eq!("ko".parse::<Locale>().unwrap(), Locale::Korean);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::English);
        assert!("fr".parse::<Locale>().is_err());
    }
}

// Cryptoplex - Cryptoeconomic complexity analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Calendar granularities and window boundaries.
//!
//! Buckets follow the usual resampling conventions: a day is its own
//! bucket, weeks end on Sunday, months and years end on their last calendar
//! day. Buckets are labelled by their end date.

use crate::error::{CoreError, Result};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar aggregation granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

const GRANULARITY_NAMES: [&str; 12] = [
    "D", "W", "M", "Y", "day", "week", "month", "year", "daily", "weekly", "monthly", "yearly",
];

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];

    /// Short resampling code.
    pub fn code(self) -> &'static str {
        match self {
            Granularity::Day => "D",
            Granularity::Week => "W",
            Granularity::Month => "M",
            Granularity::Year => "Y",
        }
    }

    /// First date of the bucket containing `date`.
    pub fn bucket_start(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Day => Some(date),
            Granularity::Week => {
                let back = date.weekday().num_days_from_sunday();
                // Sunday closes the week, so the week opens on Monday.
                let offset = if back == 0 { 6 } else { u64::from(back) - 1 };
                date.checked_sub_days(Days::new(offset))
            }
            Granularity::Month => date.with_day(1),
            Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        }
    }

    /// Last date of the bucket containing `date` (the bucket label).
    pub fn bucket_end(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Day => Some(date),
            Granularity::Week => {
                let ahead = 6 - date.weekday().num_days_from_monday();
                date.checked_add_days(Days::new(u64::from(ahead)))
            }
            Granularity::Month => date
                .with_day(1)?
                .checked_add_months(Months::new(1))?
                .pred_opt(),
            Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 12, 31),
        }
    }

    /// Contiguous `(start, end)` buckets covering `first..=last`.
    pub fn buckets(self, first: NaiveDate, last: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
        let mut out = Vec::new();
        if first > last {
            return out;
        }
        let mut cursor = self.bucket_start(first);
        while let Some(start) = cursor {
            if start > last {
                break;
            }
            let Some(end) = self.bucket_end(start) else {
                break;
            };
            out.push((start, end));
            cursor = end.succ_opt();
        }
        out
    }

    /// Calendar windows between `first` and `last` for sliding analysis.
    ///
    /// Weekly windows run from one Sunday to the next (both inclusive),
    /// using the Sundays that fall inside the range. Monthly and yearly
    /// windows run from the first to the last day of each period touched
    /// by the range. Daily windows are single days.
    pub fn windows(self, first: NaiveDate, last: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
        if first > last {
            return Vec::new();
        }
        match self {
            Granularity::Week => {
                let mut sundays = Vec::new();
                let mut cursor = Some(first);
                while let Some(date) = cursor {
                    if date > last {
                        break;
                    }
                    if date.weekday() == Weekday::Sun {
                        sundays.push(date);
                        cursor = date.checked_add_days(Days::new(7));
                    } else {
                        cursor = date.succ_opt();
                    }
                }
                sundays.windows(2).map(|w| (w[0], w[1])).collect()
            }
            _ => self.buckets(first, last),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Granularity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let found = match trimmed {
            "D" => Some(Granularity::Day),
            "W" => Some(Granularity::Week),
            "M" => Some(Granularity::Month),
            "Y" => Some(Granularity::Year),
            other => match other.to_ascii_lowercase().as_str() {
                "day" | "daily" => Some(Granularity::Day),
                "week" | "weekly" => Some(Granularity::Week),
                "month" | "monthly" => Some(Granularity::Month),
                "year" | "yearly" => Some(Granularity::Year),
                _ => None,
            },
        };
        found.ok_or_else(|| CoreError::invalid_selector(trimmed, &GRANULARITY_NAMES))
    }
}

impl TryFrom<String> for Granularity {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Granularity> for String {
    fn from(g: Granularity) -> Self {
        g.code().to_string()
    }
}

/// Parse a comma-separated granularity list such as `"W,M"`.
pub fn parse_granularities(list: &str) -> Result<Vec<Granularity>> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

// Cryptoplex - Cryptoeconomic complexity analysis
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Date-indexed series.
//!
//! A [`Series`] is an ordered run of `(date, value)` points with strictly
//! increasing dates. Dates that were never observed are simply absent; a
//! present point may still carry a missing value (a non-finite ratio, or a
//! `None` state), which keeps the date in the index without contributing an
//! observation.

use crate::classifier::StateLabel;
use crate::error::{CoreError, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// A single dated point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point<T> {
    pub date: NaiveDate,
    pub value: T,
}

/// Ordered, date-unique series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<T> {
    points: Vec<Point<T>>,
}

/// Raw ratio series (e.g. transactions per kW). Non-finite values are missing.
pub type TimeSeries = Series<f64>;

/// Classified series. `None` marks a missing state.
pub type StateSeries = Series<Option<StateLabel>>;

impl<T> Default for Series<T> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<T> Series<T> {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from `(date, value)` pairs, rejecting unordered dates.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, T)>,
    {
        let mut series = Self::new();
        for (date, value) in pairs {
            series.push(date, value)?;
        }
        Ok(series)
    }

    /// Append a point. The date must be strictly after the last one.
    pub fn push(&mut self, date: NaiveDate, value: T) -> Result<()> {
        if let Some(last) = self.points.last() {
            if date <= last.date {
                return Err(CoreError::NonIncreasingTimestamp {
                    previous: last.date,
                    next: date,
                });
            }
        }
        self.points.push(Point { date, value });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point<T>> {
        self.points.iter()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Position of `date` in the index, if present.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.points.binary_search_by(|p| p.date.cmp(&date)).ok()
    }

    /// Whether `date` belongs to the index (missing values included).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.position(date).is_some()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&T> {
        self.position(date).map(|i| &self.points[i].value)
    }

    /// Points with `start <= date <= end`.
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> &[Point<T>] {
        if start > end {
            return &[];
        }
        let lo = self.points.partition_point(|p| p.date < start);
        let hi = self.points.partition_point(|p| p.date <= end);
        &self.points[lo..hi]
    }

    /// Map every value, keeping the date index unchanged.
    pub fn map<U, F>(&self, mut f: F) -> Series<U>
    where
        F: FnMut(&T) -> U,
    {
        Series {
            points: self
                .points
                .iter()
                .map(|p| Point {
                    date: p.date,
                    value: f(&p.value),
                })
                .collect(),
        }
    }
}

impl TimeSeries {
    /// Finite values, in date order.
    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points
            .iter()
            .map(|p| p.value)
            .filter(|v| v.is_finite())
    }

    /// Number of non-missing observations.
    pub fn valid_count(&self) -> usize {
        self.valid_values().count()
    }

    /// Value at `date` if present and finite.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.get(date).copied().filter(|v| v.is_finite())
    }
}

impl StateSeries {
    /// Number of non-missing states.
    pub fn valid_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }
}

impl<'a, T> IntoIterator for &'a Series<T> {
    type Item = &'a Point<T>;
    type IntoIter = std::slice::Iter<'a, Point<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_push_rejects_non_increasing_dates() {
        let mut series = TimeSeries::new();
        series.push(day(2), 1.0).unwrap();
        assert!(series.push(day(2), 2.0).is_err());
        assert!(series.push(day(1), 2.0).is_err());
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_range_is_inclusive() {
        let series = TimeSeries::from_pairs((1..=10).map(|d| (day(d), d as f64))).unwrap();
        let slice = series.range(day(3), day(5));
        assert_eq!(slice.len(), 3);
        assert_eq!(slice[0].date, day(3));
        assert_eq!(slice[2].date, day(5));
        assert!(series.range(day(6), day(5)).is_empty());
    }

    #[test]
    fn test_missing_values_stay_in_index() {
        let series =
            TimeSeries::from_pairs(vec![(day(1), 1.0), (day(2), f64::NAN), (day(4), 3.0)])
                .unwrap();
        assert!(series.contains_date(day(2)));
        assert!(!series.contains_date(day(3)));
        assert_eq!(series.valid_count(), 2);
        assert_eq!(series.value_at(day(2)), None);
        assert_eq!(series.value_at(day(4)), Some(3.0));
    }

    #[test]
    fn test_map_preserves_dates() {
        let series = TimeSeries::from_pairs(vec![(day(1), 1.0), (day(3), 2.0)]).unwrap();
        let doubled = series.map(|v| v * 2.0);
        assert_eq!(doubled.dates().collect::<Vec<_>>(), vec![day(1), day(3)]);
        assert_eq!(doubled.points()[1].value, 4.0);
    }
}

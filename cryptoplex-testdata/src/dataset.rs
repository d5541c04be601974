// Cryptoplex Testdata - Master table I/O
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! The master CSV table and its mapping to a [`Panel`].
//!
//! Layout: a `Date` column (`YYYY-MM-DD`), then per entity a
//! `<Entity> Transactions per kW` column and an optional
//! `<entity>_market_cap` column (entity name lowercased). Empty cells and
//! `NaN` are missing values.

use chrono::{NaiveDate, NaiveDateTime};
use cryptoplex::{CoreError, EntityData, Panel, TimeSeries};
use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

/// Name of the date column.
pub const DATE_COLUMN: &str = "Date";

const RATIO_SUFFIX: &str = " Transactions per kW";
const CAP_SUFFIX: &str = "_market_cap";

/// Dataset error types.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Ratio column name for an entity.
pub fn ratio_column(entity: &str) -> String {
    format!("{}{}", entity, RATIO_SUFFIX)
}

/// Market-cap column name for an entity.
pub fn market_cap_column(entity: &str) -> String {
    format!("{}{}", entity.to_lowercase(), CAP_SUFFIX)
}

/// One row of the table. Values follow the column order of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

/// Date-indexed table of named numeric columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Value columns, without the date column.
    pub columns: Vec<String>,
    pub rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Entities that have a ratio column, in column order.
    pub fn entities(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter_map(|c| c.strip_suffix(RATIO_SUFFIX))
            .map(str::to_string)
            .collect()
    }

    /// `(date, value)` pairs of a column, missing cells as NaN.
    pub fn series(&self, name: &str) -> Result<TimeSeries, DatasetError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;
        let mut rows: Vec<&DatasetRow> = self.rows.iter().collect();
        rows.sort_by_key(|r| r.date);
        let series = TimeSeries::from_pairs(rows.into_iter().map(|r| {
            let value = r.values.get(idx).copied().flatten().unwrap_or(f64::NAN);
            (r.date, value)
        }))?;
        Ok(series)
    }

    /// Build a table from a panel. The date index is the union of every
    /// entity's dates; dates an entity lacks become empty cells.
    pub fn from_panel(panel: &Panel) -> Self {
        let mut columns = Vec::new();
        for (name, data) in panel.iter() {
            columns.push(ratio_column(name));
            if data.companion.is_some() {
                columns.push(market_cap_column(name));
            }
        }

        let dates: BTreeSet<NaiveDate> = panel
            .iter()
            .flat_map(|(_, data)| {
                data.ratio
                    .dates()
                    .chain(data.companion.iter().flat_map(|c| c.dates()))
                    .collect::<Vec<_>>()
            })
            .collect();

        let rows = dates
            .into_iter()
            .map(|date| {
                let mut values = Vec::with_capacity(columns.len());
                for (_, data) in panel.iter() {
                    values.push(data.ratio.value_at(date));
                    if let Some(companion) = &data.companion {
                        values.push(companion.value_at(date));
                    }
                }
                DatasetRow { date, values }
            })
            .collect();

        Self { columns, rows }
    }

    /// Assemble a panel from the ratio and market-cap columns.
    ///
    /// With `entities = None` every entity with a ratio column is loaded.
    pub fn to_panel(&self, entities: Option<&[String]>) -> Result<Panel, DatasetError> {
        let names = match entities {
            Some(names) => names.to_vec(),
            None => self.entities(),
        };
        if names.is_empty() {
            return Err(DatasetError::MissingColumn(format!("*{}", RATIO_SUFFIX)));
        }

        let mut panel = Panel::new();
        for name in names {
            let ratio = self.series(&ratio_column(&name))?;
            let cap_column = market_cap_column(&name);
            let mut data = EntityData::new(ratio);
            if self.column_index(&cap_column).is_some() {
                data = data.with_companion(self.series(&cap_column)?);
            }
            panel.insert(name, data)?;
        }
        Ok(panel)
    }

    /// Write as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), DatasetError> {
        let mut out = csv::Writer::from_writer(writer);
        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push(DATE_COLUMN.to_string());
        header.extend(self.columns.iter().cloned());
        out.write_record(&header)?;

        for row in &self.rows {
            let mut record = Vec::with_capacity(header.len());
            record.push(row.date.format("%Y-%m-%d").to_string());
            record.extend(row.values.iter().map(|v| match v {
                Some(x) if x.is_finite() => x.to_string(),
                _ => String::new(),
            }));
            out.write_record(&record)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Read CSV with a `Date` column anywhere in the header.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut input = csv::Reader::from_reader(reader);
        let headers = input.headers()?.clone();
        let date_idx = headers
            .iter()
            .position(|h| h.trim() == DATE_COLUMN)
            .ok_or_else(|| DatasetError::MissingColumn(DATE_COLUMN.to_string()))?;

        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx)
            .map(|(_, h)| h.trim().to_string())
            .collect();
        let mut dataset = Dataset::new(columns);

        for (i, result) in input.records().enumerate() {
            let record = result?;
            // Header is line 1.
            let line = i + 2;
            let raw_date = record.get(date_idx).unwrap_or("").trim();
            let date = parse_date(raw_date).ok_or_else(|| DatasetError::Parse {
                line,
                message: format!("invalid date '{}'", raw_date),
            })?;

            let mut values = Vec::with_capacity(dataset.columns.len());
            for (j, cell) in record.iter().enumerate() {
                if j == date_idx {
                    continue;
                }
                values.push(parse_value(cell).map_err(|message| DatasetError::Parse {
                    line,
                    message,
                })?);
            }
            values.resize(dataset.columns.len(), None);
            dataset.rows.push(DatasetRow { date, values });
        }

        Ok(dataset)
    }

    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let file = std::fs::File::create(path)?;
        self.write_csv(std::io::BufWriter::new(file))
    }

    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::read_csv(std::io::BufReader::new(file))
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

fn parse_value(cell: &str) -> Result<Option<f64>, String> {
    let s = cell.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let value: f64 = s
        .parse()
        .map_err(|_| format!("invalid number '{}'", s))?;
    Ok(value.is_finite().then_some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
Date,Bitcoin Transactions per kW,bitcoin_market_cap,Ethereum Transactions per kW
2024-01-01,1.5,100,20
2024-01-02,,110,21
2024-01-03,2.5,NaN,
";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_column_conventions() {
        assert_eq!(ratio_column("Bitcoin"), "Bitcoin Transactions per kW");
        assert_eq!(market_cap_column("Bitcoin"), "bitcoin_market_cap");
    }

    #[test]
    fn test_read_csv() {
        let dataset = Dataset::read_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.columns.len(), 3);
        assert_eq!(dataset.entities(), vec!["Bitcoin", "Ethereum"]);
        assert_eq!(dataset.rows[1].values[0], None);
        assert_eq!(dataset.rows[2].values[1], None);
        assert_eq!(dataset.rows[2].values[2], None);
    }

    #[test]
    fn test_to_panel() {
        let dataset = Dataset::read_csv(SAMPLE.as_bytes()).unwrap();
        let panel = dataset.to_panel(None).unwrap();
        assert_eq!(panel.len(), 2);

        let bitcoin = panel.get("Bitcoin").unwrap();
        assert_eq!(bitcoin.ratio.len(), 3);
        assert_eq!(bitcoin.ratio.valid_count(), 2);
        assert_eq!(
            bitcoin.companion.as_ref().unwrap().value_at(ymd(2024, 1, 2)),
            Some(110.0)
        );
        assert!(panel.get("Ethereum").unwrap().companion.is_none());
    }

    #[test]
    fn test_select_entities() {
        let dataset = Dataset::read_csv(SAMPLE.as_bytes()).unwrap();
        let panel = dataset
            .to_panel(Some(&["Ethereum".to_string()]))
            .unwrap();
        assert_eq!(panel.names().collect::<Vec<_>>(), vec!["Ethereum"]);

        let err = dataset.to_panel(Some(&["Solana".to_string()])).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(c) if c == "Solana Transactions per kW"));
    }

    #[test]
    fn test_missing_date_column() {
        let err = Dataset::read_csv("Day,x\n2024-01-01,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(_)));
    }

    #[test]
    fn test_parse_error_reports_line() {
        let csv = "Date,Bitcoin Transactions per kW\n2024-01-01,1\n2024-01-02,abc\n";
        match Dataset::read_csv(csv.as_bytes()).unwrap_err() {
            DatasetError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unordered_dates_are_sorted() {
        let csv = "Date,Bitcoin Transactions per kW\n2024-01-02,2\n2024-01-01,1\n";
        let panel = Dataset::read_csv(csv.as_bytes())
            .unwrap()
            .to_panel(None)
            .unwrap();
        let ratio = &panel.get("Bitcoin").unwrap().ratio;
        assert_eq!(ratio.first_date(), Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let csv = "Date,Bitcoin Transactions per kW\n2024-01-01,2\n2024-01-01,1\n";
        let err = Dataset::read_csv(csv.as_bytes())
            .unwrap()
            .to_panel(None)
            .unwrap_err();
        assert!(matches!(err, DatasetError::Core(_)));
    }

    #[test]
    fn test_csv_file_roundtrip_from_panel() {
        let mut panel = Panel::new();
        let ratio =
            TimeSeries::from_pairs(vec![(ymd(2024, 1, 1), 1.25), (ymd(2024, 1, 3), f64::NAN)])
                .unwrap();
        let caps = TimeSeries::from_pairs(vec![(ymd(2024, 1, 2), 5e11)]).unwrap();
        panel
            .insert("Bitcoin", EntityData::new(ratio).with_companion(caps))
            .unwrap();

        let dataset = Dataset::from_panel(&panel);
        assert_eq!(dataset.len(), 3);

        let file = NamedTempFile::new().unwrap();
        dataset.to_csv(file.path()).unwrap();
        let loaded = Dataset::from_csv(file.path()).unwrap();
        assert_eq!(loaded, dataset);

        let restored = loaded.to_panel(None).unwrap();
        let bitcoin = restored.get("Bitcoin").unwrap();
        assert_eq!(bitcoin.ratio.value_at(ymd(2024, 1, 1)), Some(1.25));
        assert_eq!(bitcoin.ratio.valid_count(), 1);
        assert_eq!(
            bitcoin.companion.as_ref().unwrap().value_at(ymd(2024, 1, 2)),
            Some(5e11)
        );
    }
}

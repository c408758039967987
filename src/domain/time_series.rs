// Time series domain models
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A single observation as returned by the data source. `period` keeps the
/// source encoding (e.g. `2019`, `YR2019`, `2019Q3`, `2019M07`).
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub period: String,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(period: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            period: period.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Frequency {
    Annual,
    Quarterly,
    Monthly,
}

/// Normalized period label with a chronological ordering.
///
/// Periods compare by year, then by the month they start in. Annual
/// periods sort before the quarters and months of the same year, and a
/// quarter sorts before the month it starts in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Period {
    year: i32,
    start_month: u8,
    frequency: Frequency,
    label: String,
}

impl Period {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let raw = raw.strip_prefix("YR").unwrap_or(raw);
        if raw.len() < 4 || !raw.is_char_boundary(4) {
            return None;
        }

        let (year_part, rest) = raw.split_at(4);
        if !year_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year: i32 = year_part.parse().ok()?;

        if rest.is_empty() {
            return Some(Self {
                year,
                start_month: 0,
                frequency: Frequency::Annual,
                label: year_part.to_string(),
            });
        }

        if !rest.is_char_boundary(1) {
            return None;
        }
        let (kind, number) = rest.split_at(1);
        let number: u8 = number.parse().ok()?;
        match kind {
            "Q" if (1..=4).contains(&number) => Some(Self {
                year,
                start_month: 3 * number - 2,
                frequency: Frequency::Quarterly,
                label: format!("{}Q{}", year_part, number),
            }),
            "M" if (1..=12).contains(&number) => Some(Self {
                year,
                start_month: number,
                frequency: Frequency::Monthly,
                label: format!("{}M{:02}", year_part, number),
            }),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn sort_key(&self) -> (i32, u8, Frequency) {
        (self.year, self.start_month, self.frequency)
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Wide table of aligned series: one row per period, one column per
/// indicator. Absent observations stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesTable {
    periods: Vec<String>,
    columns: Vec<String>,
    rows: Vec<Vec<Option<f64>>>,
}

impl TimeSeriesTable {
    /// Align per-indicator points onto the union of their periods.
    ///
    /// Column order follows `series` exactly. A period repeated within one
    /// column keeps the last value.
    pub fn align(series: Vec<(String, Vec<(Period, f64)>)>) -> Self {
        let width = series.len();
        let mut by_period: BTreeMap<Period, Vec<Option<f64>>> = BTreeMap::new();
        let mut columns = Vec::with_capacity(width);

        for (col, (id, points)) in series.into_iter().enumerate() {
            columns.push(id);
            for (period, value) in points {
                by_period.entry(period).or_insert_with(|| vec![None; width])[col] = Some(value);
            }
        }

        let (periods, rows): (Vec<String>, Vec<Vec<Option<f64>>>) = by_period
            .into_iter()
            .map(|(period, row)| (period.label().to_string(), row))
            .unzip();

        Self {
            periods,
            columns,
            rows,
        }
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    pub fn column(&self, id: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.columns.iter().position(|c| c == id)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

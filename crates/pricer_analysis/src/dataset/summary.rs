//! Aggregate statistics over a priced dataset.
//!
//! The reduce phase of batch pricing: everything here reads a finished
//! [`PricedDataset`] and never re-prices. Skipped rows contribute to row
//! counts and date bounds only.

use std::collections::BTreeMap;

use pricer_core::types::time::ObservationDate;
use serde::Serialize;

use super::analyzer::PricedDataset;
use super::table::OUTPUT_COLUMNS;

/// Descriptive statistics of one numeric column.
///
/// Quantiles use linear interpolation between order statistics and the
/// standard deviation uses the sample (n − 1) denominator.
///
/// Only finite values enter the statistics. Infinite values (gamma and theta
/// of an at-the-money option at expiry) are counted in `non_finite` instead,
/// so one such row cannot turn the mean into ±∞ and the deviation into NaN.
///
/// # Examples
/// ```
/// use pricer_analysis::dataset::ColumnStatistics;
///
/// let stats = ColumnStatistics::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
/// assert_eq!(stats.count, 4);
/// assert_eq!(stats.mean, 2.5);
/// assert_eq!(stats.median, 2.5);
/// assert_eq!(stats.q25, 1.75);
/// assert!(ColumnStatistics::from_values(&[]).is_none());
///
/// let with_inf = ColumnStatistics::from_values(&[1.0, 3.0, f64::INFINITY]).unwrap();
/// assert_eq!((with_inf.count, with_inf.non_finite), (2, 1));
/// assert_eq!(with_inf.mean, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStatistics {
    /// Number of finite values
    pub count: usize,
    /// Values left out because they are infinite or NaN
    pub non_finite: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation; `None` for a single value
    pub std: Option<f64>,
    /// Smallest value
    pub min: f64,
    /// First quartile
    #[serde(rename = "25%")]
    pub q25: f64,
    /// Median
    #[serde(rename = "50%")]
    pub median: f64,
    /// Third quartile
    #[serde(rename = "75%")]
    pub q75: f64,
    /// Largest value
    pub max: f64,
}

impl ColumnStatistics {
    /// Computes statistics over the finite values, or `None` when there are
    /// none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let std = (n > 1).then(|| {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        });

        Some(Self {
            count: n,
            non_finite: values.len() - n,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[n - 1],
        })
    }
}

/// Linear-interpolated quantile of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    if lo == hi || frac == 0.0 {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

/// Statistics for a named column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedStatistics {
    /// Column name
    pub column: String,
    /// Statistics over the priced rows
    pub statistics: ColumnStatistics,
}

/// Average prices for one maturity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaturityGroup {
    /// Days to maturity shared by the bucket
    pub days_to_maturity: u32,
    /// Priced rows in the bucket
    pub count: usize,
    /// Mean call price
    pub avg_call_price: f64,
    /// Mean put price
    pub avg_put_price: f64,
}

/// Headline figures for a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatasetOverview {
    /// All rows in the table
    pub total_rows: usize,
    /// Rows with a valuation
    pub priced_rows: usize,
    /// Rows the engine rejected
    pub skipped_rows: usize,
    /// Mean call price over priced rows
    pub avg_call_price: Option<f64>,
    /// Mean put price over priced rows
    pub avg_put_price: Option<f64>,
    /// Earliest observation
    pub first_date: Option<ObservationDate>,
    /// Latest observation
    pub last_date: Option<ObservationDate>,
}

/// Everything reported about a priced dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Headline figures
    pub overview: DatasetOverview,
    /// Statistics for each computed column with at least one finite value, in
    /// output order
    pub statistics: Vec<NamedStatistics>,
    /// Statistics of moneyness S / K over priced rows
    pub moneyness: Option<ColumnStatistics>,
    /// Average prices by days to maturity, ascending; buckets with no priced
    /// rows are omitted
    pub maturity_groups: Vec<MaturityGroup>,
}

impl DatasetSummary {
    /// Aggregates a priced dataset.
    pub fn from_priced(priced: &PricedDataset) -> Self {
        let rows: Vec<[f64; 8]> = priced.priced().map(|(_, v)| v.to_array()).collect();

        let statistics = OUTPUT_COLUMNS
            .iter()
            .enumerate()
            .filter_map(|(i, column)| {
                let values: Vec<f64> = rows.iter().map(|row| row[i]).collect();
                ColumnStatistics::from_values(&values).map(|statistics| NamedStatistics {
                    column: column.to_string(),
                    statistics,
                })
            })
            .collect();

        let moneyness: Vec<f64> = priced.moneyness().into_iter().flatten().collect();

        Self {
            overview: overview(priced),
            statistics,
            moneyness: ColumnStatistics::from_values(&moneyness),
            maturity_groups: maturity_groups(priced),
        }
    }

    /// Statistics for a computed column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnStatistics> {
        self.statistics
            .iter()
            .find(|s| s.column == name)
            .map(|s| &s.statistics)
    }
}

fn overview(priced: &PricedDataset) -> DatasetOverview {
    let (calls, puts): (Vec<f64>, Vec<f64>) = priced
        .priced()
        .map(|(_, v)| (v.call_price, v.put_price))
        .unzip();
    let mean = |values: &[f64]| {
        (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
    };

    let dates = priced.records().iter().map(|r| r.date);

    DatasetOverview {
        total_rows: priced.len(),
        priced_rows: priced.priced_count(),
        skipped_rows: priced.skipped_count(),
        avg_call_price: mean(calls.as_slice()),
        avg_put_price: mean(puts.as_slice()),
        first_date: dates.clone().min(),
        last_date: dates.max(),
    }
}

fn maturity_groups(priced: &PricedDataset) -> Vec<MaturityGroup> {
    let mut buckets: BTreeMap<u32, (usize, f64, f64)> = BTreeMap::new();
    for (record, valuation) in priced.priced() {
        let entry = buckets.entry(record.days_to_maturity).or_default();
        entry.0 += 1;
        entry.1 += valuation.call_price;
        entry.2 += valuation.put_price;
    }

    buckets
        .into_iter()
        .map(|(days, (count, call_sum, put_sum))| MaturityGroup {
            days_to_maturity: days,
            count,
            avg_call_price: call_sum / count as f64,
            avg_put_price: put_sum / count as f64,
        })
        .collect()
}

//! Batch pricing of option datasets.
//!
//! [`DatasetAnalyzer`] owns a working copy of one table. Pricing is an
//! explicit map over the ordered row records (each row builds its own
//! engine) followed by a separate gather that sorts outcomes into priced
//! and skipped rows.

use std::io::{Read, Write};

use pricer_models::analytical::{AnalyticalError, BlackScholes, OptionValuation};
use tracing::{debug, info, warn};

use super::schema::{validate_schema, ColumnLayout, SchemaValidation};
use super::summary::DatasetSummary;
use super::table::{cell_at, OptionRecord, RawTable, OUTPUT_COLUMNS};
use crate::error::AnalysisError;
use crate::parallel::{map_in_batches, BatchProgress, ParallelConfig};

/// Anything that can be materialised into a [`RawTable`].
pub trait TableSource {
    /// Produces the table.
    ///
    /// # Errors
    /// Source-specific read or parse failures.
    fn into_table(self) -> Result<RawTable, AnalysisError>;
}

impl TableSource for RawTable {
    fn into_table(self) -> Result<RawTable, AnalysisError> {
        Ok(self)
    }
}

impl TableSource for &RawTable {
    fn into_table(self) -> Result<RawTable, AnalysisError> {
        Ok(self.clone())
    }
}

/// CSV text arriving on a byte stream.
#[derive(Debug)]
pub struct CsvSource<R> {
    reader: R,
}

impl<R: Read> CsvSource<R> {
    /// Wraps a reader positioned at the CSV header row.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> TableSource for CsvSource<R> {
    fn into_table(self) -> Result<RawTable, AnalysisError> {
        RawTable::from_reader(self.reader)
    }
}

/// Configuration for dataset analysis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Chunking and parallelism settings
    pub parallel: ParallelConfig,
}

impl AnalyzerConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that prices on the calling thread only.
    pub fn sequential() -> Self {
        Self {
            parallel: ParallelConfig::sequential(),
        }
    }

    /// Sets the batch size for chunked processing.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.parallel.batch_size = batch_size.max(1);
        self
    }

    /// Sets the row count at which the Rayon pool is used.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel.parallel_threshold = threshold;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// `AnalysisError::InvalidConfig` if the batch size is zero.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.parallel.batch_size == 0 {
            return Err(AnalysisError::InvalidConfig(
                "batch_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// A row whose inputs the engine rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// Zero-based data row index
    pub index: usize,
    /// Why the engine rejected the row
    pub error: AnalyticalError,
}

/// Pricing outcome for a whole table.
///
/// Holds the input table (without any stale computed columns), the typed
/// records, and one optional valuation per row. Skipped rows keep their
/// input cells and have no valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedDataset {
    input: RawTable,
    records: Vec<OptionRecord>,
    valuations: Vec<Option<OptionValuation>>,
    skipped: Vec<SkippedRow>,
}

impl PricedDataset {
    /// Number of rows, priced or not.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows with a valuation.
    pub fn priced_count(&self) -> usize {
        self.records.len() - self.skipped.len()
    }

    /// Number of rows the engine rejected.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Rejected rows in row order.
    pub fn skipped_rows(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Typed records in row order.
    pub fn records(&self) -> &[OptionRecord] {
        &self.records
    }

    /// Per-row valuations; `None` marks a skipped row.
    pub fn valuations(&self) -> &[Option<OptionValuation>] {
        &self.valuations
    }

    /// Records paired with their valuation, skipped rows excluded.
    pub fn priced(&self) -> impl Iterator<Item = (&OptionRecord, &OptionValuation)> {
        self.records
            .iter()
            .zip(&self.valuations)
            .filter_map(|(record, valuation)| valuation.as_ref().map(|v| (record, v)))
    }

    /// Per-row moneyness S / K; `None` for skipped rows.
    pub fn moneyness(&self) -> Vec<Option<f64>> {
        self.records
            .iter()
            .zip(&self.valuations)
            .map(|(record, valuation)| valuation.as_ref().map(|_| record.moneyness()))
            .collect()
    }

    /// Header of the augmented table.
    pub fn output_headers(&self) -> Vec<String> {
        self.input
            .headers()
            .iter()
            .cloned()
            .chain(OUTPUT_COLUMNS.iter().map(|c| c.to_string()))
            .collect()
    }

    /// The input table with the eight computed columns appended.
    ///
    /// Skipped rows carry empty computed cells.
    pub fn to_table(&self) -> RawTable {
        let width = self.input.headers().len();
        let rows = self
            .input
            .rows()
            .iter()
            .zip(&self.valuations)
            .map(|(row, valuation)| {
                let inputs = (0..width).map(|i| cell_at(row, i).to_string());
                let outputs: Vec<String> = match valuation {
                    Some(v) => v.to_array().iter().map(f64::to_string).collect(),
                    None => vec![String::new(); OptionValuation::LEN],
                };
                inputs.chain(outputs).collect()
            })
            .collect();

        RawTable::new(self.output_headers(), rows)
    }

    /// Writes the augmented table as CSV with a header row.
    ///
    /// # Errors
    /// `AnalysisError::Csv` or `AnalysisError::Io` if the writer fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), AnalysisError> {
        let table = self.to_table();
        let mut writer = csv::Writer::from_writer(writer);

        writer.write_record(table.headers())?;
        for row in table.rows() {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Descriptive statistics, moneyness, and maturity groups.
    pub fn summarize(&self) -> DatasetSummary {
        DatasetSummary::from_priced(self)
    }
}

/// Validates, prices, and summarises one option dataset.
///
/// # Examples
/// ```
/// use pricer_analysis::dataset::DatasetAnalyzer;
///
/// let csv = "Date,Stock_Price,Volatility,Risk_Free_Rate,Strike,Days_To_Maturity,Time_To_Maturity\n\
///            2024-01-01,100,0.2,0.05,100,365,1.0\n\
///            2024-01-02,100,0.0,0.05,100,365,1.0\n";
///
/// let analyzer = DatasetAnalyzer::from_reader(csv.as_bytes()).unwrap();
/// assert!(analyzer.validate_schema().is_valid);
///
/// let priced = analyzer.price_all().unwrap();
/// assert_eq!(priced.priced_count(), 1);
/// assert_eq!(priced.skipped_count(), 1);
///
/// let call = priced.valuations()[0].unwrap().call_price;
/// assert!((call - 10.4506).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct DatasetAnalyzer {
    table: RawTable,
    config: AnalyzerConfig,
}

impl DatasetAnalyzer {
    /// Creates an analyzer over any table source.
    ///
    /// # Errors
    /// Whatever the source reports while materialising the table.
    pub fn new<S: TableSource>(source: S) -> Result<Self, AnalysisError> {
        Ok(Self::from_table(source.into_table()?))
    }

    /// Creates an analyzer by parsing CSV from a stream.
    ///
    /// # Errors
    /// `AnalysisError::Csv` for malformed CSV.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AnalysisError> {
        Self::new(CsvSource::new(reader))
    }

    /// Creates an analyzer over an already materialised table.
    pub fn from_table(table: RawTable) -> Self {
        Self {
            table,
            config: AnalyzerConfig::default(),
        }
    }

    /// Replaces the analyzer configuration.
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the analyzer configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Returns the working table as loaded.
    pub fn table(&self) -> &RawTable {
        &self.table
    }

    /// Checks the working table against the dataset schema.
    pub fn validate_schema(&self) -> SchemaValidation {
        validate_schema(&self.table)
    }

    /// Prices every row.
    ///
    /// # Errors
    /// `AnalysisError::Schema` when the table fails validation (nothing is
    /// priced), or `AnalysisError::InvalidConfig`. Rows the engine rejects
    /// are skipped, not errors.
    pub fn price_all(&self) -> Result<PricedDataset, AnalysisError> {
        self.price_all_with_progress(|_| {})
    }

    /// Prices every row, reporting progress after each chunk.
    ///
    /// # Errors
    /// See [`DatasetAnalyzer::price_all`].
    pub fn price_all_with_progress<P>(&self, on_progress: P) -> Result<PricedDataset, AnalysisError>
    where
        P: Fn(BatchProgress) + Sync + Send,
    {
        self.config.validate()?;

        // Computed columns from an earlier run are replaced, never duplicated
        let input = self.table.without_columns(&OUTPUT_COLUMNS);
        let layout = ColumnLayout::resolve(&input)
            .map_err(|missing| AnalysisError::Schema(SchemaValidation::missing(missing)))?;

        let records = match input
            .rows()
            .iter()
            .map(|row| OptionRecord::parse(&layout, row))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(records) => records,
            Err(_) => return Err(AnalysisError::Schema(validate_schema(&input))),
        };

        let parallel = &self.config.parallel;
        debug!(
            rows = records.len(),
            batch_size = parallel.batch_size,
            parallel = parallel.should_parallelize(records.len()),
            "Pricing dataset"
        );

        let outcomes = map_in_batches(&records, parallel, price_record, |progress| {
            debug!(
                processed = progress.processed,
                total = progress.total,
                "Priced chunk"
            );
            on_progress(progress);
        });

        let mut skipped = Vec::new();
        let valuations = outcomes
            .into_iter()
            .enumerate()
            .map(|(index, outcome)| match outcome {
                Ok(valuation) => Some(valuation),
                Err(error) => {
                    warn!(row = index, %error, "Skipping row");
                    skipped.push(SkippedRow { index, error });
                    None
                }
            })
            .collect();

        let priced = PricedDataset {
            input,
            records,
            valuations,
            skipped,
        };
        info!(
            priced = priced.priced_count(),
            skipped = priced.skipped_count(),
            "Dataset pricing complete"
        );

        Ok(priced)
    }

    /// Prices every row and summarises the result.
    ///
    /// # Errors
    /// See [`DatasetAnalyzer::price_all`].
    pub fn summarize(&self) -> Result<DatasetSummary, AnalysisError> {
        Ok(self.price_all()?.summarize())
    }
}

fn price_record(record: &OptionRecord) -> Result<OptionValuation, AnalyticalError> {
    Ok(BlackScholes::new(record.parameters()?).valuation())
}

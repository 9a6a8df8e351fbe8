//! Option dataset validation, batch pricing, and aggregation.
//!
//! ```text
//! CSV stream / RawTable ──► DatasetAnalyzer ──► validate_schema
//!                                   │
//!                                   ▼
//!                        price_all (map, chunked)
//!                                   │
//!                                   ▼
//!                PricedDataset ──► write_csv / summarize (reduce)
//! ```

pub mod analyzer;
pub mod schema;
pub mod summary;
pub mod table;

pub use analyzer::{
    AnalyzerConfig, CsvSource, DatasetAnalyzer, PricedDataset, SkippedRow, TableSource,
};
pub use schema::{validate_schema, ColumnKind, InvalidColumn, SchemaValidation, REQUIRED_COLUMNS};
pub use summary::{ColumnStatistics, DatasetOverview, DatasetSummary, MaturityGroup, NamedStatistics};
pub use table::{OptionRecord, RawTable, OUTPUT_COLUMNS};

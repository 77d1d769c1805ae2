//! PostgreSQL adapters.

mod report_reader;

pub use report_reader::PostgresReportReader;

//! Application layer handlers.

pub mod report;

pub use report::{ExportError, ExportReportHandler, ExportReportQuery};

//! Report export handlers.

mod export_report;

pub use export_report::{ExportError, ExportReportHandler, ExportReportQuery};

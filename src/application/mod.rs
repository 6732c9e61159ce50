pub mod use_cases;

pub use use_cases::export_service::{ExportReport, ExportService};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use application::{ExportReport, ExportService};
pub use domain::csv::{encode, encode_value, CsvDocument, CSV_EXTENSION, CSV_MIME};
pub use domain::error::{AppError, Result};
pub use domain::record::Record;
pub use infrastructure::channels::{
    ChannelKind, ChannelReceipt, ClipboardProvider, ExportCapabilities, OutputChannel,
};
pub use infrastructure::config::ExportSettings;

// ============================================================
// EXPORT SERVICE USE CASE
// ============================================================
// Orchestrate encoding and channel delivery

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::csv::{encode_value, CsvDocument};
use crate::domain::error::Result;
use crate::infrastructure::channels::{ChannelKind, ChannelReceipt, ExportCapabilities};

/// Outcome of one export run.
///
/// `document` carries the raw CSV text, so the report itself serves as
/// the raw-text output channel. A `skipped` report means the input had
/// no usable data and no channel was invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    pub skipped: bool,
    pub row_count: usize,
    pub column_count: usize,
    pub byte_len: usize,
    pub elapsed_ms: u64,
    pub receipts: Vec<ChannelReceipt>,
    pub document: CsvDocument,
}

/// CSV export use case: encode once, deliver everywhere requested.
pub struct ExportService {
    capabilities: ExportCapabilities,
}

impl ExportService {
    pub fn new(capabilities: ExportCapabilities) -> Self {
        Self { capabilities }
    }

    /// Encode `records` and deliver the document through each requested
    /// channel, in order. The same immutable document goes to every
    /// channel; channels never see each other.
    pub async fn export(
        &self,
        records: &Value,
        channels: &[ChannelKind],
    ) -> Result<ExportReport> {
        let start = Instant::now();

        let document = CsvDocument::new(encode_value(records));

        if document.is_empty() {
            // Absent or malformed input is expected (data not loaded
            // yet); produce no artifact and report the skip.
            warn!("no usable data, skipping export");
            return Ok(ExportReport {
                skipped: true,
                row_count: 0,
                column_count: 0,
                byte_len: 0,
                elapsed_ms: start.elapsed().as_millis() as u64,
                receipts: Vec::new(),
                document,
            });
        }

        info!(
            rows = document.row_count(),
            columns = document.column_count(),
            bytes = document.byte_len(),
            "encoded CSV document"
        );

        let mut receipts = Vec::with_capacity(channels.len());
        for kind in channels {
            let channel = self.capabilities.channel(*kind)?;
            let receipt = channel.deliver(&document).await?;
            receipts.push(receipt);
        }

        Ok(ExportReport {
            skipped: false,
            row_count: document.row_count(),
            column_count: document.column_count(),
            byte_len: document.byte_len(),
            elapsed_ms: start.elapsed().as_millis() as u64,
            receipts,
            document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn local_capabilities(dir: &std::path::Path) -> ExportCapabilities {
        ExportCapabilities {
            output_dir: Some(dir.to_path_buf()),
            filename_stem: "test".to_string(),
            clipboard: None,
            upload: None,
        }
    }

    #[tokio::test]
    async fn test_empty_input_skips_all_channels() {
        let tmp = tempfile::tempdir().unwrap();
        let service = ExportService::new(local_capabilities(tmp.path()));

        for input in [json!(null), json!([]), json!([{}]), json!("nope")] {
            let report = service
                .export(&input, &[ChannelKind::Download, ChannelKind::Buffer])
                .await
                .unwrap();
            assert!(report.skipped);
            assert!(report.receipts.is_empty());
            assert!(report.document.is_empty());
        }

        // No artifact may exist after skipped exports.
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_export_delivers_to_each_requested_channel() {
        let tmp = tempfile::tempdir().unwrap();
        let service = ExportService::new(local_capabilities(tmp.path()));

        let records = json!([
            {"name": "John", "age": 30, "city": "New York"},
            {"name": "Jane", "age": 25, "city": "Los Angeles"}
        ]);

        let report = service
            .export(&records, &[ChannelKind::Download, ChannelKind::Buffer])
            .await
            .unwrap();

        assert!(!report.skipped);
        assert_eq!(report.row_count, 2);
        assert_eq!(report.column_count, 3);
        assert_eq!(report.receipts.len(), 2);
        assert_eq!(
            report.document.as_str(),
            "\"name\",\"age\",\"city\"\nJohn,30,New York\nJane,25,Los Angeles"
        );

        let saved = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(saved, 1);
    }

    #[tokio::test]
    async fn test_missing_capability_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let service = ExportService::new(local_capabilities(tmp.path()));
        let records = json!([{"a": 1}]);

        let err = service
            .export(&records, &[ChannelKind::Upload])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }
}

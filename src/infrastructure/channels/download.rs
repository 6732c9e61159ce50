// ============================================================
// DOWNLOAD CHANNEL
// ============================================================
// Save the document as a timestamped .csv file under the host's
// chosen directory

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{ChannelKind, ChannelReceipt, OutputChannel};
use crate::domain::csv::{CsvDocument, CSV_MIME};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::storage::{ensure_output_dir, timestamped_filename};

pub struct DownloadChannel {
    dir: PathBuf,
    stem: String,
}

impl DownloadChannel {
    pub fn new(dir: PathBuf, stem: String) -> Self {
        Self { dir, stem }
    }
}

#[async_trait]
impl OutputChannel for DownloadChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Download
    }

    async fn deliver(&self, document: &CsvDocument) -> Result<ChannelReceipt> {
        let dir = ensure_output_dir(&self.dir)?;
        let path = dir.join(timestamped_filename(&self.stem));

        let bytes = document.to_bytes();
        fs::write(&path, &bytes).map_err(|e| {
            AppError::IoError(format!("failed to write {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            "saved CSV document"
        );

        Ok(ChannelReceipt::Download {
            path,
            byte_len: bytes.len(),
            checksum: document.checksum(),
            mime: CSV_MIME.to_string(),
        })
    }
}

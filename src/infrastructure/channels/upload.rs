// ============================================================
// UPLOAD CHANNEL
// ============================================================
// POST the document to a configured endpoint as a multipart form

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use uuid::Uuid;

use super::{ChannelKind, ChannelReceipt, OutputChannel, UploadTarget};
use crate::domain::csv::CsvDocument;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::storage::timestamped_filename;

pub struct UploadChannel {
    target: UploadTarget,
    stem: String,
}

impl UploadChannel {
    pub fn new(target: UploadTarget, stem: String) -> Self {
        Self { target, stem }
    }
}

#[async_trait]
impl OutputChannel for UploadChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Upload
    }

    async fn deliver(&self, document: &CsvDocument) -> Result<ChannelReceipt> {
        let export_id = Uuid::new_v4().to_string();
        let filename = timestamped_filename(&self.stem);

        let part = Part::bytes(document.to_bytes())
            .file_name(filename)
            .mime_str("text/csv")
            .map_err(|e| AppError::UploadError(e.to_string()))?;

        let form = Form::new()
            .text("export_id", export_id.clone())
            .text("checksum", document.checksum())
            .part("file", part);

        let response = self
            .target
            .client
            .post(self.target.url.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UploadError(format!(
                "endpoint {} answered {}",
                self.target.url, status
            )));
        }

        tracing::info!(
            url = %self.target.url,
            export_id = %export_id,
            status = status.as_u16(),
            "uploaded CSV document"
        );

        Ok(ChannelReceipt::Upload {
            url: self.target.url.to_string(),
            export_id,
            status: status.as_u16(),
        })
    }
}

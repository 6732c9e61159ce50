// ============================================================
// BUFFER CHANNEL
// ============================================================
// Hand the document back as UTF-8 bytes wrapped in a data URI, for
// hosts that trigger their own download machinery

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::{ChannelKind, ChannelReceipt, OutputChannel};
use crate::domain::csv::{CsvDocument, CSV_MIME};
use crate::domain::error::Result;

pub struct BufferChannel;

#[async_trait]
impl OutputChannel for BufferChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Buffer
    }

    async fn deliver(&self, document: &CsvDocument) -> Result<ChannelReceipt> {
        let bytes = document.to_bytes();
        let data_uri = format!("data:{}base64,{}", CSV_MIME, STANDARD.encode(&bytes));

        Ok(ChannelReceipt::Buffer {
            byte_len: bytes.len(),
            data_uri,
        })
    }
}

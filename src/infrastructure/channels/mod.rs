// ============================================================
// OUTPUT CHANNELS
// ============================================================
// Adapters that hand the encoded document to a platform facility.
// Channels never mutate or retain the document; each delivery is a
// single call against an immutable value.

mod buffer;
mod clipboard;
mod download;
mod upload;

pub use buffer::BufferChannel;
pub use clipboard::ClipboardProvider;
pub use download::DownloadChannel;
pub use upload::UploadChannel;

use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::csv::CsvDocument;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::ExportSettings;

/// The output channels a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Download,
    Clipboard,
    Buffer,
    Upload,
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChannelKind::Download => "download",
            ChannelKind::Clipboard => "clipboard",
            ChannelKind::Buffer => "buffer",
            ChannelKind::Upload => "upload",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ChannelKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "download" => Ok(ChannelKind::Download),
            "clipboard" => Ok(ChannelKind::Clipboard),
            "buffer" => Ok(ChannelKind::Buffer),
            "upload" => Ok(ChannelKind::Upload),
            other => Err(AppError::ValidationError(format!(
                "unknown channel '{}', expected download, clipboard, buffer, or upload",
                other
            ))),
        }
    }
}

/// What a channel reports back after a successful delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum ChannelReceipt {
    Download {
        path: PathBuf,
        byte_len: usize,
        checksum: String,
        mime: String,
    },
    Clipboard {
        provider: String,
        byte_len: usize,
    },
    Buffer {
        byte_len: usize,
        data_uri: String,
    },
    Upload {
        url: String,
        export_id: String,
        status: u16,
    },
}

/// A single delivery of an encoded document to a platform facility.
#[async_trait]
pub trait OutputChannel: Send + Sync {
    fn kind(&self) -> ChannelKind;

    async fn deliver(&self, document: &CsvDocument) -> Result<ChannelReceipt>;
}

/// Upload capability: a client plus the endpoint it posts to.
#[derive(Debug, Clone)]
pub struct UploadTarget {
    pub client: reqwest::Client,
    pub url: Url,
}

/// Explicit capability descriptor the host assembles and passes in.
///
/// Environment facts (where files go, which clipboard exists, which
/// endpoint receives uploads) live here, never in ambient globals; the
/// encoder stays environment-agnostic.
#[derive(Debug, Clone, Default)]
pub struct ExportCapabilities {
    pub output_dir: Option<PathBuf>,
    pub filename_stem: String,
    pub clipboard: Option<ClipboardProvider>,
    pub upload: Option<UploadTarget>,
}

impl ExportCapabilities {
    /// Assemble capabilities from loaded settings. Clipboard detection
    /// runs only here, at the host's request; an explicit provider in
    /// the settings wins over detection.
    pub fn from_settings(settings: &ExportSettings) -> Result<Self> {
        let clipboard = match &settings.clipboard_provider {
            Some(name) => Some(name.parse::<ClipboardProvider>()?),
            None => ClipboardProvider::detect(),
        };

        let upload = match settings.upload_endpoint()? {
            Some(url) => Some(UploadTarget {
                client: reqwest::Client::new(),
                url,
            }),
            None => None,
        };

        Ok(Self {
            output_dir: Some(settings.output_dir.clone()),
            filename_stem: settings.filename_stem.clone(),
            clipboard,
            upload,
        })
    }

    /// Instantiate the adapter for a requested channel, or report the
    /// missing capability.
    pub fn channel(&self, kind: ChannelKind) -> Result<Box<dyn OutputChannel>> {
        match kind {
            ChannelKind::Download => {
                let dir = self.output_dir.clone().ok_or_else(|| {
                    AppError::Unsupported("no output directory capability".to_string())
                })?;
                Ok(Box::new(DownloadChannel::new(
                    dir,
                    self.filename_stem.clone(),
                )))
            }
            ChannelKind::Clipboard => {
                let provider = self.clipboard.clone().ok_or_else(|| {
                    AppError::Unsupported("no clipboard capability".to_string())
                })?;
                Ok(Box::new(provider))
            }
            ChannelKind::Buffer => Ok(Box::new(BufferChannel)),
            ChannelKind::Upload => {
                let target = self.upload.clone().ok_or_else(|| {
                    AppError::Unsupported("no upload endpoint capability".to_string())
                })?;
                Ok(Box::new(UploadChannel::new(
                    target,
                    self.filename_stem.clone(),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_kind_round_trips_through_names() {
        for kind in [
            ChannelKind::Download,
            ChannelKind::Clipboard,
            ChannelKind::Buffer,
            ChannelKind::Upload,
        ] {
            assert_eq!(kind.to_string().parse::<ChannelKind>().unwrap(), kind);
        }
        assert!("telegraph".parse::<ChannelKind>().is_err());
    }

    #[test]
    fn test_missing_capabilities_are_reported() {
        let caps = ExportCapabilities::default();
        assert!(caps.channel(ChannelKind::Download).is_err());
        assert!(caps.channel(ChannelKind::Clipboard).is_err());
        assert!(caps.channel(ChannelKind::Upload).is_err());
        // The buffer channel needs no platform capability.
        assert!(caps.channel(ChannelKind::Buffer).is_ok());
    }
}

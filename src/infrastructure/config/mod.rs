// ============================================================
// EXPORT SETTINGS
// ============================================================
// Figment-backed configuration: defaults, optional TOML file, and
// CSV_EXPORT_-prefixed environment variables (highest precedence)

use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "csv-export.toml";
pub const ENV_PREFIX: &str = "CSV_EXPORT_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Filename stem for saved documents (timestamp and .csv suffix are
    /// appended by the download channel).
    pub filename_stem: String,

    /// Directory the download channel writes into.
    pub output_dir: PathBuf,

    /// Endpoint for the upload channel, when one is configured.
    pub upload_url: Option<String>,

    /// Clipboard provider override ("wayland", "xclip", "xsel",
    /// "pasteboard", "tmux", "windows"). Unset means detect.
    pub clipboard_provider: Option<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            filename_stem: "export".to_string(),
            output_dir: PathBuf::from("."),
            upload_url: None,
            clipboard_provider: None,
        }
    }
}

impl ExportSettings {
    /// Load settings from defaults, then `csv-export.toml`, then the
    /// environment. A `.env` file is honored when present.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings: ExportSettings = Figment::new()
            .merge(Serialized::defaults(ExportSettings::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.filename_stem.trim().is_empty() {
            return Err(AppError::ConfigError(
                "filename_stem must not be empty".to_string(),
            ));
        }
        if let Some(raw) = &self.upload_url {
            Url::parse(raw).map_err(|e| {
                AppError::ConfigError(format!("invalid upload_url '{}': {}", raw, e))
            })?;
        }
        Ok(())
    }

    /// Parsed form of `upload_url`, if configured.
    pub fn upload_endpoint(&self) -> Result<Option<Url>> {
        match &self.upload_url {
            Some(raw) => {
                let url = Url::parse(raw).map_err(|e| {
                    AppError::ConfigError(format!("invalid upload_url '{}': {}", raw, e))
                })?;
                Ok(Some(url))
            }
            None => Ok(None),
        }
    }
}

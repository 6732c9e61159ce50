//! Command-line interface
//!
//! Reads a JSON array of records from a file or stdin and delivers the
//! encoded CSV through the requested channels.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;

use crate::application::ExportService;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::channels::{ChannelKind, ExportCapabilities};
use crate::infrastructure::config::ExportSettings;

#[derive(Debug, Parser)]
#[command(name = "csv-export", version, about = "Convert JSON records to CSV and deliver the document")]
pub struct Cli {
    /// JSON file containing an array of flat records; stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output channel (repeatable): download, clipboard, buffer, upload
    #[arg(short, long = "channel", value_parser = parse_channel, default_values_t = [ChannelKind::Buffer])]
    pub channels: Vec<ChannelKind>,

    /// Directory for the download channel (overrides configuration)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Filename stem for saved and uploaded documents
    #[arg(long)]
    pub stem: Option<String>,

    /// Endpoint for the upload channel
    #[arg(long, env = "CSV_EXPORT_UPLOAD_URL")]
    pub upload_url: Option<String>,

    /// Clipboard provider override (wayland, xclip, xsel, pasteboard, tmux)
    #[arg(long)]
    pub clipboard: Option<String>,
}

fn parse_channel(s: &str) -> std::result::Result<ChannelKind, String> {
    s.parse::<ChannelKind>().map_err(|e| e.to_string())
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut settings = ExportSettings::load()?;
    if let Some(dir) = cli.out_dir {
        settings.output_dir = dir;
    }
    if let Some(stem) = cli.stem {
        settings.filename_stem = stem;
    }
    if cli.upload_url.is_some() {
        settings.upload_url = cli.upload_url;
    }
    if cli.clipboard.is_some() {
        settings.clipboard_provider = cli.clipboard;
    }
    settings.validate()?;

    let records = read_records(cli.input.as_deref())?;

    let capabilities = ExportCapabilities::from_settings(&settings)?;
    let service = ExportService::new(capabilities);
    let report = service.export(&records, &cli.channels).await?;

    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|e| AppError::ValidationError(format!("failed to render report: {}", e)))?;
    println!("{}", rendered);

    Ok(())
}

fn read_records(input: Option<&std::path::Path>) -> Result<Value> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!("failed to read {}: {}", path.display(), e))
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    // Unparseable input is a caller mistake worth surfacing; absent or
    // non-array JSON still degrades to the empty document downstream.
    serde_json::from_str(&raw)
        .map_err(|e| AppError::ValidationError(format!("input is not valid JSON: {}", e)))
}

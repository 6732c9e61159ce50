// ============================================================
// CLIPBOARD CHANNEL
// ============================================================
// Write-only system clipboard adapter. On unix hosts the document is
// piped to the platform's clipboard utility; Windows uses the native
// clipboard API.

use std::io::Write;
use std::process::{Command, Stdio};
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChannelKind, ChannelReceipt, OutputChannel};
use crate::domain::csv::CsvDocument;
use crate::domain::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClipboardProvider {
    Pasteboard,
    Wayland,
    XClip,
    XSel,
    Tmux,
    #[cfg(windows)]
    Windows,
}

impl ClipboardProvider {
    /// Pick a provider for this host, if one is usable. Runs only when
    /// the host assembles its capability set; nothing else in the crate
    /// consults the environment.
    #[cfg(windows)]
    pub fn detect() -> Option<Self> {
        Some(Self::Windows)
    }

    #[cfg(target_os = "macos")]
    pub fn detect() -> Option<Self> {
        if binary_exists("pbcopy") {
            Some(Self::Pasteboard)
        } else if env_var_is_set("TMUX") && binary_exists("tmux") {
            Some(Self::Tmux)
        } else {
            None
        }
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    pub fn detect() -> Option<Self> {
        if env_var_is_set("WAYLAND_DISPLAY") && binary_exists("wl-copy") {
            Some(Self::Wayland)
        } else if env_var_is_set("DISPLAY") && binary_exists("xclip") {
            Some(Self::XClip)
        } else if env_var_is_set("DISPLAY") && binary_exists("xsel") {
            Some(Self::XSel)
        } else if env_var_is_set("TMUX") && binary_exists("tmux") {
            Some(Self::Tmux)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pasteboard => "pasteboard",
            Self::Wayland => "wayland",
            Self::XClip => "xclip",
            Self::XSel => "xsel",
            Self::Tmux => "tmux",
            #[cfg(windows)]
            Self::Windows => "windows",
        }
    }

    fn command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Self::Pasteboard => Some(("pbcopy", &[])),
            Self::Wayland => Some(("wl-copy", &["--type", "text/plain"])),
            Self::XClip => Some(("xclip", &["-i", "-selection", "clipboard"])),
            Self::XSel => Some(("xsel", &["-i", "-b"])),
            Self::Tmux => Some(("tmux", &["load-buffer", "-w", "-"])),
            #[cfg(windows)]
            Self::Windows => None,
        }
    }

    fn copy(&self, content: &str) -> Result<()> {
        #[cfg(windows)]
        if let Self::Windows = self {
            return clipboard_win::set_clipboard(clipboard_win::formats::Unicode, content)
                .map_err(|err| AppError::ClipboardError(err.to_string()));
        }

        let (program, args) = self.command().ok_or_else(|| {
            AppError::ClipboardError(format!("provider '{}' has no command", self.name()))
        })?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                AppError::ClipboardError(format!("failed to spawn {}: {}", program, e))
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            AppError::ClipboardError(format!("no stdin pipe for {}", program))
        })?;
        stdin
            .write_all(content.as_bytes())
            .map_err(|e| AppError::ClipboardError(format!("write to {}: {}", program, e)))?;
        drop(stdin);

        let status = child
            .wait()
            .map_err(|e| AppError::ClipboardError(format!("wait for {}: {}", program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(AppError::ClipboardError(format!(
                "{} exited with {}",
                program, status
            )))
        }
    }
}

impl FromStr for ClipboardProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pasteboard" | "pbcopy" => Ok(Self::Pasteboard),
            "wayland" | "wl-copy" => Ok(Self::Wayland),
            "xclip" => Ok(Self::XClip),
            "xsel" => Ok(Self::XSel),
            "tmux" => Ok(Self::Tmux),
            #[cfg(windows)]
            "windows" => Ok(Self::Windows),
            other => Err(AppError::ConfigError(format!(
                "unknown clipboard provider '{}'",
                other
            ))),
        }
    }
}

#[async_trait]
impl OutputChannel for ClipboardProvider {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Clipboard
    }

    async fn deliver(&self, document: &CsvDocument) -> Result<ChannelReceipt> {
        self.copy(document.as_str())?;
        tracing::info!(provider = self.name(), bytes = document.byte_len(), "copied CSV to clipboard");

        Ok(ChannelReceipt::Clipboard {
            provider: self.name().to_string(),
            byte_len: document.byte_len(),
        })
    }
}

#[cfg(not(windows))]
fn env_var_is_set(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|v| !v.is_empty())
}

#[cfg(not(windows))]
fn binary_exists(name: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| dir.join(name).is_file())
}

//! Export of the decision collection as downloadable files.

mod markdown;

pub use markdown::render_markdown;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};

use crate::entity::Decision;
use crate::error::{BreadcrumbError, Result};

const FILENAME_PREFIX: &str = "breadcrumb-export";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Markdown => "text/markdown",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = BreadcrumbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(BreadcrumbError::InvalidExportFormat(s.to_string())),
        }
    }
}

/// A rendered export, ready to be saved.
///
/// The export owns its bytes. `write_to` consumes it, so the buffer is
/// released as soon as the file is written.
#[derive(Debug, Clone)]
pub struct Export {
    pub filename: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Export {
    /// Write the export into `dir`, creating it if needed. Returns the path.
    pub fn write_to(self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// `breadcrumb-export-<YYYY-MM-DD>.<ext>`, dated in UTC.
pub fn export_filename<Tz: TimeZone>(format: ExportFormat, now: &DateTime<Tz>) -> String {
    format!(
        "{}-{}.{}",
        FILENAME_PREFIX,
        now.with_timezone(&Utc).format("%Y-%m-%d"),
        format.extension()
    )
}

/// The collection as a pretty-printed JSON array (two-space indent).
pub fn export_json<Tz: TimeZone>(decisions: &[Decision], now: &DateTime<Tz>) -> Result<Export> {
    let data = serde_json::to_string_pretty(decisions)?;
    Ok(Export {
        filename: export_filename(ExportFormat::Json, now),
        media_type: ExportFormat::Json.media_type(),
        bytes: data.into_bytes(),
    })
}

/// The collection as a human-readable Markdown document.
pub fn export_markdown<Tz: TimeZone>(decisions: &[Decision], now: &DateTime<Tz>) -> Export
where
    Tz::Offset: fmt::Display,
{
    Export {
        filename: export_filename(ExportFormat::Markdown, now),
        media_type: ExportFormat::Markdown.media_type(),
        bytes: render_markdown(decisions, now).into_bytes(),
    }
}

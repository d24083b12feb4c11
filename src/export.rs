//! SVG export pipeline and download sink.
//!
//! Export rewrites the rendered SVG's first `width`/`height` attributes to
//! fixed target values by text substitution (no XML re-parse), names the
//! file after the current UTC time and hands the bytes to a [`DownloadSink`].

use chrono::{DateTime, SecondsFormat, Utc};
use regex::{NoExpand, Regex};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config::ExportConfig;

pub const SVG_MIME: &str = "image/svg+xml;charset=utf-8";

fn width_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"width="[^"]*""#).expect("valid width pattern"))
}

fn height_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"height="[^"]*""#).expect("valid height pattern"))
}

/// Replace the first `width="…"` and the first `height="…"`.
pub fn resize_svg(svg: &str, width: &str, height: &str) -> String {
    let width_value = format!(r#"width="{}""#, width);
    let height_value = format!(r#"height="{}""#, height);
    let resized = width_attr().replacen(svg, 1, NoExpand(&width_value));
    height_attr()
        .replacen(&resized, 1, NoExpand(&height_value))
        .into_owned()
}

/// `<prefix>_<ISO-8601 millis UTC with ':' '.' '-' replaced by '_'>.svg`
pub fn export_file_name(prefix: &str, now: DateTime<Utc>) -> String {
    let timestamp: String = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .chars()
        .map(|c| if matches!(c, ':' | '.' | '-') { '_' } else { c })
        .collect();
    format!("{}_{}.svg", prefix, timestamp)
}

/// A ready-to-save SVG download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgExport {
    pub file_name: String,
    pub content: String,
}

impl SvgExport {
    pub fn prepare(svg: &str, config: &ExportConfig, now: DateTime<Utc>) -> Self {
        Self {
            file_name: export_file_name(&config.file_prefix, now),
            content: resize_svg(svg, &config.width, &config.height),
        }
    }
}

/// Where exported files go.
pub trait DownloadSink: Send + Sync {
    /// Save `bytes` as `file_name`, returning the saved location.
    fn save(&self, file_name: &str, mime: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}

/// Writes downloads into a directory, creating it if needed.
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectoryDownloads {
    fn save(&self, file_name: &str, mime: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), mime, size = bytes.len(), "Download saved");
        Ok(path)
    }
}

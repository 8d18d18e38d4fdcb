use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Export URL of the sheet read when nothing else is configured.
pub const DEFAULT_SOURCE_URL: &str =
    "https://docs.google.com/spreadsheets/d/1Vzo1a5jwx1Mx0w41fOEJHy-bq2KPj6pLU7ySUbGw29E/export?format=xlsx";

/// Relative path the downloaded workbook is saved to.
pub const DEFAULT_DESTINATION: &str = "user_sheet.xlsx";

/// HTTP transfer limits for the single GET.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Seconds allowed for establishing the connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole transfer, redirects included.
    pub timeout_secs: u64,
    /// Maximum number of redirects followed.
    pub max_redirections: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 300,
            max_redirections: 10,
        }
    }
}

/// Configuration passed explicitly into each step of a run.
///
/// Loaded from `~/.config/sheetpeek/config.toml` when present; every field is optional there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// URL returning the spreadsheet document as the response body.
    pub source_url: String,
    /// Where the downloaded bytes are written (overwritten on every run).
    pub destination_path: PathBuf,
    pub fetch: FetchConfig,
    /// Extra header label -> canonical field entries for `--map`.
    pub aliases: BTreeMap<String, String>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            destination_path: PathBuf::from(DEFAULT_DESTINATION),
            fetch: FetchConfig::default(),
            aliases: BTreeMap::new(),
        }
    }
}

impl SheetConfig {
    /// Rejects URLs that are not http(s) and an empty destination.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.source_url)
            .with_context(|| format!("invalid source URL: {}", self.source_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("unsupported URL scheme '{}': {}", url.scheme(), self.source_url);
        }
        if self.destination_path.as_os_str().is_empty() {
            bail!("destination path is empty");
        }
        Ok(())
    }
}

/// Builds the xlsx export URL for a Google Sheets document ID.
pub fn google_export_url(sheet_id: &str) -> Result<String> {
    let valid = !sheet_id.is_empty()
        && sheet_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        bail!("invalid sheet id: {:?}", sheet_id);
    }
    let mut url = Url::parse("https://docs.google.com/spreadsheets/d/")?
        .join(&format!("{}/export", sheet_id))?;
    url.query_pairs_mut().append_pair("format", "xlsx");
    Ok(url.into())
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sheetpeek")?;
    Ok(xdg_dirs.get_config_home().join("sheetpeek").join("config.toml"))
}

/// Load configuration from the default location, or defaults if no file exists.
/// Never writes a default file.
pub fn load_or_default() -> Result<SheetConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(SheetConfig::default());
    }
    load_from(&path)
}

/// Load configuration from an explicit file. The file must exist.
pub fn load_from(path: &Path) -> Result<SheetConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: SheetConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::info!("loaded config from {}", path.display());
    Ok(cfg)
}

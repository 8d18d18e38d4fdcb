//! CLI for sheetpeek.

use anyhow::Result;
use clap::Parser;
use sheetpeek_core::config::{self, SheetConfig};
use sheetpeek_core::mapping::ColumnMapping;
use sheetpeek_core::report;
use std::io;
use std::path::PathBuf;

/// Download a spreadsheet export and list its column headers.
#[derive(Debug, Parser)]
#[command(name = "sheetpeek")]
#[command(about = "Download a spreadsheet and print its column headers", long_about = None)]
pub struct Cli {
    /// URL returning the spreadsheet document (default: the configured sheet).
    #[arg(long, value_name = "URL", conflicts_with = "sheet_id")]
    pub url: Option<String>,

    /// Google Sheets document ID; downloads its xlsx export.
    #[arg(long, value_name = "ID")]
    pub sheet_id: Option<String>,

    /// Where to save the downloaded file (default: user_sheet.xlsx).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Config file to use instead of ~/.config/sheetpeek/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show the canonical record field each header maps to.
    #[arg(long)]
    pub map: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    /// Applies flag overrides on top of a loaded config.
    pub fn apply(&self, mut cfg: SheetConfig) -> Result<SheetConfig> {
        if let Some(url) = &self.url {
            cfg.source_url = url.clone();
        }
        if let Some(id) = &self.sheet_id {
            cfg.source_url = config::google_export_url(id)?;
        }
        if let Some(output) = &self.output {
            cfg.destination_path = output.clone();
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn run(self) -> Result<()> {
        let base = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_default()?,
        };
        let cfg = self.apply(base)?;
        tracing::debug!("effective config: {:?}", cfg);

        let mapping = self
            .map
            .then(|| ColumnMapping::builtin().with_aliases(&cfg.aliases));

        let outcome = report::run(&cfg);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        report::write_outcome(&outcome, &mut out, mapping.as_ref())?;
        Ok(())
    }
}

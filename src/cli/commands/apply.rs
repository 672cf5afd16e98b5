use std::path::PathBuf;

use log::{info, warn};

use crate::config::Config;
use crate::site;
use crate::utils::error::{BoxResult, TocsmithError};

/// Handle the apply command
pub fn handle_apply_command(config: &Config, dir: Option<&PathBuf>) -> BoxResult<()> {
    let site_dir = dir.unwrap_or(&config.destination);
    info!("Applying tables of contents to {}", site_dir.display());

    let report = site::process_site(site_dir)?;

    if report.skipped_headings > 0 {
        warn!(
            "{} headings had no anchor and were left out of their table of contents",
            report.skipped_headings
        );
    }

    if !report.failed.is_empty() {
        return Err(TocsmithError::Generic(format!(
            "{} pages could not be processed",
            report.failed.len()
        ))
        .into());
    }

    Ok(())
}

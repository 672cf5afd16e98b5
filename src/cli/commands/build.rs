use log::info;

use crate::config::Config;
use crate::markdown::{self, BuildOptions};
use crate::utils::error::{BoxResult, TocsmithError};

/// Handle the build command
pub fn handle_build_command(config: &Config, unpublished: bool) -> BoxResult<()> {
    info!("Building posts...");

    let options = BuildOptions { unpublished };
    let report = markdown::build_posts(config, &options)?;
    info!("{}", report.toc.summary());

    if !report.toc.failed.is_empty() {
        return Err(TocsmithError::Generic(format!(
            "{} posts failed to build",
            report.toc.failed.len()
        ))
        .into());
    }

    info!("Site built successfully at {}", config.destination.display());
    Ok(())
}

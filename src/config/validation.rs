use log::info;

use crate::config::Config;
use crate::utils::error::{BoxResult, TocsmithError};

/// Validate the configuration
pub fn validate_config(config: &Config) -> BoxResult<()> {
    if config.destination == config.source {
        return Err(TocsmithError::Config(format!(
            "Destination must differ from source: {}",
            config.destination.display()
        ))
        .into());
    }

    if config.posts_dir.is_absolute() {
        return Err(TocsmithError::Config(format!(
            "posts_dir must be relative to the source: {}",
            config.posts_dir.display()
        ))
        .into());
    }

    info!("Source directory: {}", config.source.display());
    Ok(())
}

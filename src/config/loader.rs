use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::defaults;
use crate::config::types::Config;
use crate::config::validation;
use crate::utils::error::{BoxResult, TocsmithError};

/// Configuration file names to look for
const CONFIG_FILES: [&str; 3] = ["_config.yml", "_config.yaml", "_config.toml"];

/// Load site configuration from config files
pub fn load_config<P: AsRef<Path>>(
    source_dir: P,
    config_files: Option<Vec<PathBuf>>,
) -> BoxResult<Config> {
    let mut config = Config::default();

    let config_paths = match config_files {
        Some(paths) if !paths.is_empty() => paths,
        _ => find_default_config_files(&source_dir),
    };

    if config_paths.is_empty() {
        debug!("No configuration files found, using defaults");
    } else {
        for path in config_paths {
            debug!("Loading configuration from {}", path.display());
            merge_config_file(&mut config, &path)?;
        }
    }

    if config.source == defaults::default_source() {
        config.source = source_dir.as_ref().to_path_buf();
    }

    validation::validate_config(&config)?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Find default configuration files
fn find_default_config_files<P: AsRef<Path>>(source_dir: P) -> Vec<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| source_dir.as_ref().join(name))
        .filter(|path| path.exists())
        .collect()
}

/// Merge a configuration file into the current configuration
fn merge_config_file(config: &mut Config, config_path: &Path) -> BoxResult<()> {
    let content = fs::read_to_string(config_path).map_err(|e| {
        TocsmithError::Config(format!(
            "Failed to read configuration file {}: {}",
            config_path.display(),
            e
        ))
    })?;

    let extension = config_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    // Assume YAML if no extension
    let file_config = match extension.as_deref() {
        None | Some("yml") | Some("yaml") => parse_yaml_config(&content, config_path)?,
        Some("toml") => parse_toml_config(&content, config_path)?,
        Some(other) => {
            return Err(TocsmithError::Config(format!(
                "Unsupported configuration file format: {}",
                other
            ))
            .into());
        }
    };

    merge_configs(config, file_config);
    Ok(())
}

/// Parse a YAML configuration file
fn parse_yaml_config(content: &str, path: &Path) -> BoxResult<Config> {
    // An empty YAML document deserialises to null rather than a mapping
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_yaml::from_str(content).map_err(|e| {
        TocsmithError::Config(format!(
            "Failed to parse YAML configuration ({}): {}",
            path.display(),
            e
        ))
        .into()
    })
}

/// Parse a TOML configuration file
fn parse_toml_config(content: &str, path: &Path) -> BoxResult<Config> {
    toml::from_str(content).map_err(|e| {
        TocsmithError::Config(format!(
            "Failed to parse TOML configuration ({}): {}",
            path.display(),
            e
        ))
        .into()
    })
}

/// Merge two configurations, keeping only non-default values from `source`
fn merge_configs(target: &mut Config, source: Config) {
    if source.source != defaults::default_source() {
        target.source = source.source;
    }

    if source.destination != defaults::default_destination() {
        target.destination = source.destination;
    }

    if source.posts_dir != defaults::default_posts_dir() {
        target.posts_dir = source.posts_dir;
    }

    if source.layout.is_some() {
        target.layout = source.layout;
    }

    if source.title != defaults::default_site_title() {
        target.title = source.title;
    }
}

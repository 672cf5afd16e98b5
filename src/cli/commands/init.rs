use std::collections::BTreeMap;
use std::path::Path;

use log::info;

use crate::config::defaults;
use crate::utils::error::{BoxResult, TocsmithError};
use crate::utils::fs::{create_directory, write_file};

/// Create the directory layout and configuration file of a new blog
pub fn create_site(site_path: &Path, title: &str, force: bool) -> BoxResult<()> {
    if site_path.exists() {
        let is_empty = site_path
            .read_dir()
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);

        if !is_empty && !force {
            return Err(TocsmithError::Generic(format!(
                "Directory '{}' exists and is not empty. Use --force to overwrite.",
                site_path.display()
            ))
            .into());
        }
    }

    let posts_dir = site_path.join(defaults::default_posts_dir());
    create_directory(&posts_dir)?;
    info!("Created directory: {}", posts_dir.display());

    let mut settings = BTreeMap::new();
    settings.insert("title", title);
    let config_content = format!("# Site configuration\n{}", serde_yaml::to_string(&settings)?);

    let config_path = site_path.join("_config.yml");
    write_file(&config_path, &config_content)?;
    info!("Created config file: {}", config_path.display());

    Ok(())
}

/// Handle the init command
pub fn handle_init_command(path: &Path, title: Option<&str>, force: bool) -> BoxResult<()> {
    let title = title.map(str::to_string).unwrap_or_else(defaults::default_site_title);
    info!("Creating new blog at {}", path.display());

    create_site(path, &title, force)?;

    info!("Run 'tocsmith new <TITLE> --source {}' to start a post", path.display());
    Ok(())
}

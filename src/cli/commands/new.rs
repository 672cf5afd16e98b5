use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use log::info;

use crate::config::Config;
use crate::markdown::Post;
use crate::utils::error::{BoxResult, TocsmithError};
use crate::utils::fs::write_file;

/// Write a new unpublished post named after its title into the posts directory
pub fn create_post(
    posts_dir: &Path,
    title: &str,
    created_at: NaiveDateTime,
    force: bool,
) -> BoxResult<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        return Err(TocsmithError::Generic(format!(
            "Post title '{}' has nothing to build a file name from",
            title
        ))
        .into());
    }

    let path = posts_dir.join(format!("{}.md", slug));
    if path.exists() && !force {
        return Err(TocsmithError::Generic(format!(
            "Post '{}' already exists. Use --force to overwrite.",
            path.display()
        ))
        .into());
    }

    write_file(&path, &Post::draft_source(title, created_at))?;
    Ok(path)
}

/// Handle the new command
pub fn handle_new_command(config: &Config, title: &str, force: bool) -> BoxResult<()> {
    let path = create_post(&config.posts_path(), title, Local::now().naive_local(), force)?;

    info!("Created post {}", path.display());
    info!("Set 'published: true' in its header to include it in 'tocsmith build'");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_writes_header() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("_posts");

        let path = create_post(&posts, "Hello, World", NaiveDateTime::default(), false).unwrap();

        assert_eq!(path, posts.join("hello-world.md"));
        let source = fs::read_to_string(&path).unwrap();
        assert!(source.starts_with("[//]: # (title: Hello, World)\n"));
        assert!(source.contains("[//]: # (created_at: 1970-01-01 00:00:00)\n"));
        assert!(source.contains("[//]: # (published: false)\n"));
    }

    #[test]
    fn test_existing_post_needs_force() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("_posts");
        create_post(&posts, "Twice", NaiveDateTime::default(), false).unwrap();

        assert!(create_post(&posts, "Twice", NaiveDateTime::default(), false).is_err());
        assert!(create_post(&posts, "Twice", NaiveDateTime::default(), true).is_ok());
    }

    #[test]
    fn test_title_without_slug_is_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(create_post(dir.path(), "???", NaiveDateTime::default(), false).is_err());
    }
}

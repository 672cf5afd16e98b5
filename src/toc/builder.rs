use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::toc::model::{Heading, HeadingLevel, TocEntry};

/// Problems a build pass can run into. Neither aborts the pass.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum TocError {
    /// The heading carries no nested anchor element to link to
    #[error("{level} heading \"{label}\" has no anchor")]
    MissingAnchor { level: HeadingLevel, label: String },
    /// There is no mount point for the table of contents
    #[error("no table of contents container in document")]
    MissingContainer,
}

/// Mount point that receives the generated links.
pub trait TocContainer {
    /// Append one entry after any existing children
    fn append(&mut self, entry: &TocEntry);

    /// Remove the container together with its immediate parent
    fn remove_with_parent(&mut self);

    /// Remove the container alone, keeping its parent and siblings
    fn remove(&mut self);
}

/// What a build pass did to the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BuildOutcome {
    /// Entries were appended to the container
    Populated {
        entries: Vec<TocEntry>,
        skipped: Vec<TocError>,
    },
    /// The document has no headings, so the container and its parent were dropped
    Removed { skipped: Vec<TocError> },
    /// Every heading was skipped; only the container itself was dropped
    Detached { skipped: Vec<TocError> },
    /// Nothing to mount on; the document was left alone
    Unchanged { reason: TocError },
}

impl BuildOutcome {
    pub fn entries(&self) -> &[TocEntry] {
        match self {
            BuildOutcome::Populated { entries, .. } => entries,
            _ => &[],
        }
    }

    pub fn skipped(&self) -> &[TocError] {
        match self {
            BuildOutcome::Populated { skipped, .. }
            | BuildOutcome::Removed { skipped }
            | BuildOutcome::Detached { skipped } => skipped,
            BuildOutcome::Unchanged { .. } => &[],
        }
    }

    pub fn is_modified(&self) -> bool {
        !matches!(self, BuildOutcome::Unchanged { .. })
    }
}

/// Turn a heading into its entry, or explain why it cannot be linked
pub fn entry_for(heading: &Heading) -> Result<TocEntry, TocError> {
    match heading.anchor.as_deref() {
        Some(anchor) if !anchor.is_empty() => Ok(TocEntry {
            label: heading.label.clone(),
            target: format!("#{}", anchor),
            depth: heading.level.depth(),
        }),
        _ => Err(TocError::MissingAnchor {
            level: heading.level,
            label: heading.label.clone(),
        }),
    }
}

/// Builds the flat table of contents of one document.
pub struct TocBuilder;

impl TocBuilder {
    /// Run one synchronous pass.
    ///
    /// Headings are taken in the order given and never re-sorted. Headings
    /// without an anchor are skipped. A document without headings loses the
    /// container and its parent; when headings exist but none can be linked
    /// only the container goes, since the parent may hold the content.
    /// Either way a container is never left empty.
    pub fn build<H, C>(headings: H, container: Option<&mut C>) -> BuildOutcome
    where
        H: IntoIterator<Item = Heading>,
        C: TocContainer + ?Sized,
    {
        let mut entries = Vec::new();
        let mut skipped = Vec::new();
        let mut seen = 0;

        for heading in headings {
            seen += 1;
            match entry_for(&heading) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    warn!("Skipping table of contents entry: {}", err);
                    skipped.push(err);
                }
            }
        }

        let container = match container {
            Some(container) => container,
            None => {
                debug!("No table of contents container, leaving document untouched");
                return BuildOutcome::Unchanged {
                    reason: TocError::MissingContainer,
                };
            }
        };

        if seen == 0 {
            debug!("No headings, removing table of contents container and its parent");
            container.remove_with_parent();
            return BuildOutcome::Removed { skipped };
        }

        if entries.is_empty() {
            debug!("No heading could be linked, removing table of contents container");
            container.remove();
            return BuildOutcome::Detached { skipped };
        }

        for entry in &entries {
            container.append(entry);
        }
        debug!("Appended {} table of contents entries", entries.len());

        BuildOutcome::Populated { entries, skipped }
    }
}

//! Filesystem adapter for enumerating frame sequences.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use deflicker_core::{DeflickerError, SequenceEntry, SequenceSource};
use tracing::{debug, warn};

/// Supported image extensions.
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp", "gif"];

/// Lists the frames of a source directory in file-name order.
///
/// Each frame is paired with a file of the same name in the destination
/// directory. Without a destination the entries point back at their source,
/// which suits runs that never write.
pub struct FsSequenceSource {
    source: PathBuf,
    destination: Option<PathBuf>,
}

impl FsSequenceSource {
    /// Creates a read-only sequence over `source`.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: None,
        }
    }

    /// Sets the directory adjusted frames are written to.
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Creates the destination directory and checks it differs from the source.
    fn prepare_destination(&self, destination: &Path) -> Result<()> {
        std::fs::create_dir_all(destination).with_context(|| {
            format!(
                "Failed to create destination directory: {}",
                destination.display()
            )
        })?;

        let src = resolve(&self.source, "source")?;
        let dst = resolve(destination, "destination")?;
        if src == dst {
            return Err(DeflickerError::Configuration(format!(
                "source and destination are the same directory: {}",
                src.display()
            ))
            .into());
        }
        Ok(())
    }
}

impl SequenceSource for FsSequenceSource {
    fn entries(&self) -> Result<Vec<SequenceEntry>> {
        if !self.source.is_dir() {
            bail!("Source is not a directory: {}", self.source.display());
        }
        if let Some(destination) = &self.destination {
            self.prepare_destination(destination)?;
        }

        let dir = std::fs::read_dir(&self.source)
            .with_context(|| format!("Failed to read directory: {}", self.source.display()))?;

        let mut files = Vec::new();
        for entry in dir {
            let entry = entry
                .with_context(|| format!("Failed to read directory: {}", self.source.display()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if is_supported_image(&path) {
                files.push(path);
            } else {
                warn!("Skipping unsupported file: {}", path.display());
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        debug!("Found {} frames in {}", files.len(), self.source.display());

        Ok(files
            .into_iter()
            .map(|source| {
                let destination = match (&self.destination, source.file_name()) {
                    (Some(dir), Some(name)) => dir.join(name),
                    _ => source.clone(),
                };
                SequenceEntry::new(source, destination)
            })
            .collect())
    }
}

/// Checks if a path has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| RASTER_EXTENSIONS.contains(&e.as_str()))
}

/// Canonicalizes `path`, naming it and its `role` on failure.
fn resolve(path: &Path, role: &str) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("Failed to resolve {role}: {}", path.display()))
}

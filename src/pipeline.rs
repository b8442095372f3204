//! Collect → map → write.
//!
//! Composes the three stages into one run and does the accounting the CLI
//! reports: how many images were found, how many made it into the manifest,
//! and which ones no publish root could map.
//!
//! ## Outcomes
//!
//! | Situation | Result | Manifest |
//! |-----------|--------|----------|
//! | No images in the source folder | `Ok(RunOutcome::Empty)` | not written |
//! | Some images unmapped | `Ok(RunOutcome::Completed)`, `skipped > 0` | written |
//! | Every image unmapped | `Err(RunError::NothingMapped)` with the root list | not written |
//! | Source unreadable, destination unwritable | `Err(RunError::Collect / Write)` | not written |

use crate::collect::{self, CollectError};
use crate::config::PublishRoot;
use crate::manifest;
use crate::mapping::UrlMapper;
use crate::output;
use crate::stamp::VersionStamp;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error("Cannot write manifest to {}: {source}", .destination.display())]
    Write {
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "None of the {total} image(s) could be mapped to a publish root.\n\n\
         Check that:\n\
         1) the source folder lies under one of the local roots below, or its\n   \
            path contains that root's marker segments;\n\
         2) those roots are actually published.\n\n\
         Configured roots:\n{}",
        output::format_roots(.roots).join("\n")
    )]
    NothingMapped {
        total: usize,
        roots: Vec<PublishRoot>,
    },
}

/// Parameters supplied by the caller.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Folder to collect images from.
    pub source: PathBuf,
    /// Folder that receives `manifest.txt`.
    pub destination: PathBuf,
    /// Descend into subfolders.
    pub recursive: bool,
    /// Write the manifest; `false` only maps and reports.
    pub write: bool,
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub written: usize,
    pub skipped: usize,
    /// `None` when the run did not write.
    pub manifest_path: Option<PathBuf>,
    pub stamp: VersionStamp,
    pub lines: Vec<String>,
    pub unmapped: Vec<PathBuf>,
}

impl RunSummary {
    /// Summary of a run that found no images: all counts zero, nothing written.
    pub fn empty(stamp: VersionStamp) -> Self {
        Self {
            total: 0,
            written: 0,
            skipped: 0,
            manifest_path: None,
            stamp,
            lines: Vec::new(),
            unmapped: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    /// The source folder holds no PNG/WEBP files.
    Empty { source: PathBuf },
    Completed(RunSummary),
}

pub fn run(
    request: &RunRequest,
    roots: &[PublishRoot],
    stamp: VersionStamp,
) -> Result<RunOutcome, RunError> {
    let images = collect::collect_images(&request.source, request.recursive)?;
    if images.is_empty() {
        log::info!("No PNG/WEBP files in {}", request.source.display());
        return Ok(RunOutcome::Empty {
            source: request.source.clone(),
        });
    }

    let mapper = UrlMapper::new(roots, stamp);
    let mut lines = Vec::new();
    let mut unmapped = Vec::new();
    for image in &images {
        match mapper.map(image) {
            Some(mapped) => lines.push(mapped.url),
            None => {
                log::debug!("Skipping unmapped image {}", image.display());
                unmapped.push(image.clone());
            }
        }
    }

    if lines.is_empty() {
        return Err(RunError::NothingMapped {
            total: images.len(),
            roots: roots.to_vec(),
        });
    }

    let manifest_path = if request.write {
        let path = manifest::write_manifest(&request.destination, &lines).map_err(|source| {
            RunError::Write {
                destination: request.destination.clone(),
                source,
            }
        })?;
        Some(path)
    } else {
        None
    };

    log::info!(
        "Mapped {} of {} image(s), skipped {}",
        lines.len(),
        images.len(),
        unmapped.len()
    );

    Ok(RunOutcome::Completed(RunSummary {
        total: images.len(),
        written: lines.len(),
        skipped: unmapped.len(),
        manifest_path,
        stamp: mapper.stamp().clone(),
        lines,
        unmapped,
    }))
}

//! Local path → public URL mapping.
//!
//! Stage 2 of the manifest pipeline. Each collected image is offered to the
//! configured publish roots in order; the first root that produces a URL
//! wins. Per root, two strategies are tried before moving to the next root:
//!
//! 1. **Direct**: the image lies under the root's `local_root`. Both paths
//!    are resolved to canonical absolute form first, so symlinked checkouts
//!    and relative arguments still line up.
//! 2. **Marker**: the image path contains the root's `marker_segments` as
//!    consecutive folder names (case-insensitive). Everything after the first
//!    occurrence becomes the relative path. This catches the same published
//!    tree checked out on another drive or in another clone location.
//!
//! ```text
//! root:   local_root = /data/Brochures
//!         base_url   = https://cdn.example/Brochures
//!         markers    = ["Brochures"]
//!
//! /data/Brochures/cover.png               → direct → https://cdn.example/Brochures/cover.png?v=…
//! /mnt/other/Brochures/sub/img.webp       → marker → https://cdn.example/Brochures/sub/img.webp?v=…
//! /mnt/other/Flyers/img.webp              → unmapped
//! ```
//!
//! The marker strategy is a heuristic: a folder that merely happens to share
//! the marker name will map too. Keep markers specific (several segments)
//! where trees could collide.
//!
//! Mapping never fails. A path no root can map is "unmapped", which the
//! pipeline counts and leaves out of the manifest. A file whose URL part
//! (the path below the root or after the marker) is not valid UTF-8 is
//! unmapped too: it has no faithful URL.

use crate::config::PublishRoot;
use crate::stamp::VersionStamp;
use std::path::{Component, Path, PathBuf};

/// Which strategy produced a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Direct,
    Marker,
}

/// A successfully mapped image.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedUrl {
    pub url: String,
    /// Index into the configured roots.
    pub root_index: usize,
    pub strategy: Strategy,
}

/// A publish root with its local directory resolved once up front.
#[derive(Debug)]
struct ResolvedRoot {
    root: PublishRoot,
    resolved: PathBuf,
    markers_lower: Vec<String>,
}

/// Maps image paths to URLs against an ordered list of publish roots.
#[derive(Debug)]
pub struct UrlMapper {
    roots: Vec<ResolvedRoot>,
    stamp: VersionStamp,
}

impl UrlMapper {
    pub fn new(roots: &[PublishRoot], stamp: VersionStamp) -> Self {
        let roots = roots
            .iter()
            .map(|root| ResolvedRoot {
                resolved: resolve_path(&root.local_root),
                markers_lower: root
                    .marker_segments
                    .iter()
                    .map(|s| s.to_lowercase())
                    .collect(),
                root: root.clone(),
            })
            .collect();
        Self { roots, stamp }
    }

    pub fn stamp(&self) -> &VersionStamp {
        &self.stamp
    }

    /// Map `path` with the first root that accepts it, or `None`.
    pub fn map(&self, path: &Path) -> Option<MappedUrl> {
        let resolved = resolve_path(path);
        let segments = path_segments(&resolved);

        for (root_index, entry) in self.roots.iter().enumerate() {
            if let Some(rel) = relative_to_root(&resolved, &entry.resolved) {
                log::trace!("{} matched root {} directly", path.display(), root_index + 1);
                return Some(MappedUrl {
                    url: build_url(&entry.root.base_url, &rel, &self.stamp),
                    root_index,
                    strategy: Strategy::Direct,
                });
            }

            if entry.markers_lower.is_empty() {
                continue;
            }
            if let Some(rel) = relative_after_marker(&segments, &entry.markers_lower) {
                log::trace!(
                    "{} matched root {} by marker {:?}",
                    path.display(),
                    root_index + 1,
                    entry.root.marker_segments
                );
                return Some(MappedUrl {
                    url: build_url(&entry.root.base_url, &rel, &self.stamp),
                    root_index,
                    strategy: Strategy::Marker,
                });
            }
        }

        log::trace!("{} matched no publish root", path.display());
        None
    }
}

/// Join `base_url` and a relative path into a stamped URL.
///
/// Exactly one `/` separates the two parts, whatever trailing or leading
/// slashes they carry.
pub fn build_url(base_url: &str, relative: &str, stamp: &VersionStamp) -> String {
    format!(
        "{}/{}?v={}",
        base_url.trim_end_matches('/'),
        relative.trim_start_matches('/'),
        stamp
    )
}

/// Index just past the first case-insensitive occurrence of `marker` in
/// `segments`, treated as consecutive items.
///
/// `None` entries stand for segments that are not valid UTF-8; they never
/// match a marker.
pub fn find_marker(segments: &[Option<String>], marker: &[String]) -> Option<usize> {
    if marker.is_empty() || marker.len() > segments.len() {
        return None;
    }
    segments
        .windows(marker.len())
        .position(|window| {
            window.iter().zip(marker).all(|(segment, m)| {
                segment
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase() == m.to_lowercase())
            })
        })
        .map(|start| start + marker.len())
}

fn relative_after_marker(segments: &[Option<String>], marker: &[String]) -> Option<String> {
    let end = find_marker(segments, marker)?;
    join_slash(&segments[end..])
}

fn relative_to_root(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    join_slash(&path_segments(rel))
}

/// Named segments of a path; the root and prefix components are dropped.
/// A segment that is not valid UTF-8 is kept as `None`.
fn path_segments(path: &Path) -> Vec<Option<String>> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_str().map(str::to_string)),
            _ => None,
        })
        .collect()
}

/// `/`-joined relative path, or `None` when it is empty or holds a segment
/// that is not valid UTF-8.
fn join_slash(segments: &[Option<String>]) -> Option<String> {
    let parts = segments.iter().cloned().collect::<Option<Vec<String>>>()?;
    let rel = parts.join("/").replace('\\', "/");
    (!rel.is_empty()).then_some(rel)
}

/// Canonical absolute form of `path`.
///
/// Existing paths are canonicalized (symlinks resolved). Paths that do not
/// exist on this machine, such as a root configured for another drive, are
/// made absolute and cleaned of `.` and `..` lexically.
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize_lexically(&absolute)
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

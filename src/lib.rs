//! # Publish Manifest
//!
//! Builds the list of public URLs for a folder of published images. Point it
//! at a folder of PNG/WEBP files; it works out where each file is served from
//! and writes `manifest.txt`, one cache-busted URL per line.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Collect  source/      →  [paths]          (png/webp, sorted case-insensitively)
//! 2. Map      [paths]      →  [urls] + skipped (first matching publish root wins)
//! 3. Write    [urls]       →  manifest.txt     (full overwrite)
//! ```
//!
//! Each stage is a plain function or value with no hidden state: the publish
//! roots and the version stamp are passed in, so every stage can be tested
//! without a clock or a real deployment tree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`collect`] | Stage 1: walks the source folder for PNG/WEBP files |
//! | [`mapping`] | Stage 2: turns local paths into public URLs via publish roots |
//! | [`manifest`] | Stage 3: writes `manifest.txt` |
//! | [`pipeline`] | Runs the stages and does the total/written/skipped accounting |
//! | [`config`] | Loads and validates the publish-root TOML file |
//! | [`stamp`] | The per-run `?v=` cache-busting value |
//! | [`output`] | CLI report formatting |
//!
//! # Design Decisions
//!
//! ## Two Ways to Match a Root
//!
//! A publish root is matched first by location (the image lies under the
//! root's local folder) and then, if configured, by marker segments (the
//! image path contains the root's folder names somewhere). The second form
//! exists because the same published tree is often checked out at different
//! places on different machines. Both are tried for one root before the next
//! root is considered.
//!
//! ## Unmapped Is Not an Error
//!
//! Images no root can map are counted and left out. Only when *nothing* maps
//! does the run fail, and then it reports the configured roots so the
//! operator can see what was expected.
//!
//! ## One Stamp per Run
//!
//! The `?v=` value is taken from the clock once, by the caller, and shared by
//! every URL of the run. A CDN then refetches every listed file after a
//! publish, and two manifests from the same run never disagree.

pub mod collect;
pub mod config;
pub mod manifest;
pub mod mapping;
pub mod output;
pub mod pipeline;
pub mod stamp;

#[cfg(test)]
pub(crate) mod test_helpers;

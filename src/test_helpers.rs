//! Shared test utilities for the publish-manifest test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! touch_all(tmp.path(), &["site/a.png", "site/sub/b.webp"]);
//! let mapper = UrlMapper::new(&roots, fixed_stamp());
//! ```

use std::fs;
use std::path::Path;

use crate::stamp::VersionStamp;

/// The stamp every test URL carries: `20250101120000`.
pub fn fixed_stamp() -> VersionStamp {
    VersionStamp::parse("20250101120000").unwrap()
}

/// Create placeholder files (and their parent folders) under `root`.
///
/// Collection and mapping only look at names, so the content is a stub.
pub fn touch_all(root: &Path, rel_paths: &[&str]) {
    for rel in rel_paths {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "fake image").unwrap();
    }
}

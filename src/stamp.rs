//! Cache-busting version stamp.
//!
//! Every URL written in one run carries the same `?v=<stamp>` query value so
//! that a CDN serves fresh copies after each publish. The stamp is the local
//! wall-clock time at one-second resolution, rendered as 14 digits:
//!
//! ```text
//! 2026-10-17 05:50:09  →  20261017055009
//! ```
//!
//! The stamp is computed once by the caller and handed to the mapper; nothing
//! in the pipeline reads the clock on its own.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

const STAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const STAMP_LEN: usize = 14;

#[derive(Error, Debug, PartialEq)]
#[error("Invalid version stamp '{0}': expected 14 digits (YYYYMMDDHHMMSS)")]
pub struct StampError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VersionStamp(String);

impl VersionStamp {
    /// Stamp for the current local time.
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn from_datetime<Tz>(at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self(at.format(STAMP_FORMAT).to_string())
    }

    /// Accept a caller-supplied stamp, e.g. to reproduce an earlier manifest.
    pub fn parse(value: &str) -> Result<Self, StampError> {
        let value = value.trim();
        if value.len() == STAMP_LEN && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(StampError(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

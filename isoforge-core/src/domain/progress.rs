//! Derived build progress
//!
//! Progress is never stored. It is recomputed on demand from the last
//! non-empty line of a job's log file, which the build tool appends to as it
//! advances. Re-parsing the whole log on every query is O(log length), which
//! stays cheap because logs are small and read infrequently.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static PERCENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)%").unwrap());

/// Progress derived from a build log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildProgress {
    pub progress: u32,
    pub status: String,
}

impl BuildProgress {
    /// The state reported when a log carries no percentage yet.
    pub fn unknown() -> Self {
        Self {
            progress: 0,
            status: "Unknown".to_string(),
        }
    }

    /// Parses progress out of raw log text.
    ///
    /// Only the last non-empty line is authoritative. A line such as
    /// `"[3/7] 42%: building rootfs"` yields progress 42 and status
    /// `"building rootfs"` (everything after the first colon, trimmed). A
    /// percentage line without a colon has an empty status. A last line with
    /// no percentage at all, or an empty log, reports as [`Self::unknown`].
    pub fn from_log(text: &str) -> Self {
        let Some(last_line) = text.lines().rev().find(|line| !line.trim().is_empty()) else {
            return Self::unknown();
        };

        let Some(caps) = PERCENT.captures(last_line) else {
            return Self::unknown();
        };

        // Not clamped to [0, 100]: the build tool owns the numbers it
        // reports, and the log is the ground truth either way.
        let progress = caps[1].parse().unwrap_or(0);

        let status = match last_line.split_once(':') {
            Some((_, rest)) => rest.trim().to_string(),
            None => String::new(),
        };

        Self { progress, status }
    }

    /// Whether the log claims the build reached 100%.
    pub fn is_complete(&self) -> bool {
        self.progress == 100
    }
}

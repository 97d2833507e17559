//! Directory scan configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Deepest recursion accepted for `max_depth`
const MAX_SCAN_DEPTH: usize = 256;

/// How directory scans walk the filesystem
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Follow symbolic links when scanning
    pub follow_symlinks: bool,

    /// Maximum recursion depth (0 = unlimited)
    pub max_depth: usize,
}

impl ScanConfig {
    /// Depth limit for the walker, `None` when unlimited
    pub fn depth_limit(&self) -> Option<usize> {
        if self.max_depth == 0 {
            None
        } else {
            Some(self.max_depth)
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            max_depth: 0, // unlimited
        }
    }
}

impl ConfigSection for ScanConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let results = vec![Validator::in_range(
            self.max_depth,
            0,
            MAX_SCAN_DEPTH,
            "scan.max_depth",
        )];

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.follow_symlinks = other.follow_symlinks;
        self.max_depth = other.max_depth;
    }

    fn section_name(&self) -> &'static str {
        "scan"
    }
}

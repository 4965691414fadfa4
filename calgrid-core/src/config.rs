//! Layout tuning knobs.

use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};

fn default_marker_minutes() -> u32 {
    30
}

fn default_min_grid_minutes() -> u32 {
    1
}

/// Parameters for the time-grid assigner.
///
/// Usually embedded as the `[layout]` table of the CLI config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Length of the marker interval given to deadlines and holidays in time grids.
    #[serde(default = "default_marker_minutes")]
    pub marker_minutes: u32,

    /// Width a zero-length or inverted grid interval is widened to.
    #[serde(default = "default_min_grid_minutes")]
    pub min_grid_minutes: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            marker_minutes: default_marker_minutes(),
            min_grid_minutes: default_min_grid_minutes(),
        }
    }
}

impl LayoutConfig {
    /// Reject values the assigners cannot work with.
    pub fn validated(self) -> CalGridResult<Self> {
        if self.marker_minutes == 0 || self.marker_minutes > crate::grid::MINUTES_PER_DAY {
            return Err(CalGridError::Config(format!(
                "marker_minutes must be between 1 and {}, got {}",
                crate::grid::MINUTES_PER_DAY,
                self.marker_minutes
            )));
        }
        if self.min_grid_minutes == 0 || self.min_grid_minutes > crate::grid::MINUTES_PER_DAY {
            return Err(CalGridError::Config(format!(
                "min_grid_minutes must be between 1 and {}, got {}",
                crate::grid::MINUTES_PER_DAY,
                self.min_grid_minutes
            )));
        }
        Ok(self)
    }
}

//! Mesh build configuration.

use crate::{NavError, NavResult};

/// Parameters of a mesh build.
///
/// Typically constructed with struct-update syntax over `Default`:
///
/// ```
/// use nav_core::MeshConfig;
///
/// let cfg = MeshConfig { width: 64, height: 32, ..MeshConfig::default() };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshConfig {
    /// Grid width in cells.
    pub width: i32,

    /// Grid height in cells.
    pub height: i32,

    /// Minimum clearance (SDF value) for a cell to count as free space at
    /// all.  Cells at or below this never become ridge candidates.
    pub min_item_size: f32,

    /// Minimum clearance for a comfortable path.  Road cells need more than
    /// this to be labeled, and the road-attraction flow field penalizes
    /// cells at or below it.
    pub min_path_width: f32,

    /// Half-width of the node-detection probe fans and of the node block
    /// absorbed around a junction cell (block side = `2 * node_area + 1`).
    pub node_area: i32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            min_item_size: 2.0,
            min_path_width: 3.0,
            node_area: 2,
        }
    }
}

impl MeshConfig {
    /// Total number of grid cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reject configurations no build pass can work with.
    pub fn validate(&self) -> NavResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(NavError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.min_item_size < 0.0 || self.min_path_width < 0.0 {
            return Err(NavError::Config(
                "clearance thresholds must be non-negative".into(),
            ));
        }
        if self.node_area < 1 {
            return Err(NavError::Config(format!(
                "node_area must be at least 1, got {}",
                self.node_area
            )));
        }
        Ok(())
    }
}

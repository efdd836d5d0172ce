//! Control geometry and the arming threshold

/// Default height of the refresh control strip, in logical units
pub const DEFAULT_CONTROL_HEIGHT: f32 = 50.0;

/// Geometry the state machine evaluates samples against
///
/// `base_inset_top` is the container's top inset as it was *before* the
/// control engaged. It is captured exactly once, at attach time; every inset
/// mutation the control requests is relative to it, so the container can
/// always be restored to exactly this value when a refresh ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshGeometry {
    /// Height of the control strip
    pub control_height: f32,
    /// Container top inset captured at attach time
    pub base_inset_top: f32,
}

impl RefreshGeometry {
    pub fn new(control_height: f32, base_inset_top: f32) -> Self {
        Self {
            control_height,
            base_inset_top,
        }
    }

    /// Offset at which the control arms: pulling past this (more negative)
    /// while dragging transitions `Idle` → `Armed`.
    pub fn threshold(&self) -> f32 {
        -(self.base_inset_top + self.control_height)
    }

    /// Top inset while a refresh episode is in progress
    pub fn engaged_inset(&self) -> f32 {
        self.base_inset_top + self.control_height
    }
}

impl Default for RefreshGeometry {
    fn default() -> Self {
        Self {
            control_height: DEFAULT_CONTROL_HEIGHT,
            base_inset_top: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_from_base_inset() {
        let geometry = RefreshGeometry::new(50.0, 0.0);
        assert_eq!(geometry.threshold(), -50.0);
        assert_eq!(geometry.engaged_inset(), 50.0);

        let inset = RefreshGeometry::new(50.0, 20.0);
        assert_eq!(inset.threshold(), -70.0);
        assert_eq!(inset.engaged_inset(), 70.0);
    }

    #[test]
    fn test_default_geometry() {
        let geometry = RefreshGeometry::default();
        assert_eq!(geometry.control_height, DEFAULT_CONTROL_HEIGHT);
        assert_eq!(geometry.base_inset_top, 0.0);
    }
}

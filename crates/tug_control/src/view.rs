//! Cosmetic model of the refresh control
//!
//! Arrow, spinner and message label state, plus the strip the control
//! occupies above the container's visible top edge. This is a model only —
//! the rendering layer draws it and runs the arrow-flip transition. All
//! parts are built once at construction; [`RefreshControlView::apply`] is
//! the only mutation path.

use std::f32::consts::PI;

use tug_animation::TransitionSpec;
use tug_core::{CosmeticPhase, DEFAULT_CONTROL_HEIGHT};

/// Label shown while idle
pub const REST_LABEL: &str = "Pull to refresh";
/// Label shown while armed
pub const ARMED_LABEL: &str = "Release to refresh";
/// Label shown while refreshing
pub const BUSY_LABEL: &str = "Refreshing…";

/// The strip the control occupies: full container width, positioned
/// immediately above the container's visible top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Vertical origin relative to the container's top edge (negative)
    pub origin_y: f32,
    /// Strip height, equal to the control height
    pub height: f32,
}

/// Pull-direction arrow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowIndicator {
    pub visible: bool,
    /// Target rotation in radians: 0 at rest, π when armed
    pub angle: f32,
}

/// Activity spinner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinnerIndicator {
    pub spinning: bool,
}

/// Snapshot of everything the rendering layer needs to draw the control
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshControlView {
    pub frame: Frame,
    pub arrow: ArrowIndicator,
    pub spinner: SpinnerIndicator,
    pub label: &'static str,
    /// How the arrow flip (and any other cosmetic motion) should animate
    pub transition: TransitionSpec,
}

impl RefreshControlView {
    pub fn new(control_height: f32) -> Self {
        Self {
            frame: Frame {
                origin_y: -control_height,
                height: control_height,
            },
            arrow: ArrowIndicator {
                visible: true,
                angle: 0.0,
            },
            spinner: SpinnerIndicator { spinning: false },
            label: REST_LABEL,
            transition: TransitionSpec::default(),
        }
    }

    /// Adopt the cosmetic configuration for a phase. Idempotent.
    pub fn apply(&mut self, phase: CosmeticPhase) {
        match phase {
            CosmeticPhase::Rest => {
                self.arrow.visible = true;
                self.arrow.angle = 0.0;
                self.spinner.spinning = false;
                self.label = REST_LABEL;
            }
            CosmeticPhase::Armed => {
                self.arrow.angle = PI;
                self.label = ARMED_LABEL;
            }
            CosmeticPhase::Busy => {
                self.arrow.visible = false;
                self.spinner.spinning = true;
                self.label = BUSY_LABEL;
            }
        }
    }
}

impl Default for RefreshControlView {
    fn default() -> Self {
        Self::new(DEFAULT_CONTROL_HEIGHT)
    }
}

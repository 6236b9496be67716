//! Render parameters and the per-frame model update.

use crate::constants::ROTATE_STEP;

/// User-facing toggles, read once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderParams {
    /// Auto-spin the model around its vertical axis.
    pub rotate: bool,
    /// Shade the model with the observation heat map instead of the standard material.
    pub heat_map: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            rotate: true,
            heat_map: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadingMode {
    Standard,
    HeatMap,
}

impl RenderParams {
    #[inline]
    pub fn shading_mode(&self) -> ShadingMode {
        if self.heat_map {
            ShadingMode::HeatMap
        } else {
            ShadingMode::Standard
        }
    }
}

/// Accumulated model yaw. Only advances while `rotate` is on, so switching it
/// off freezes the model where it is and switching it back on resumes from there.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModelSpin {
    pub yaw: f32,
}

impl ModelSpin {
    pub fn advance(&mut self, params: &RenderParams) -> f32 {
        if params.rotate {
            self.yaw += ROTATE_STEP;
        }
        self.yaw
    }
}

/// What the renderer needs from one frame's update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUpdate {
    pub yaw: f32,
    pub mode: ShadingMode,
}

pub fn step_frame(spin: &mut ModelSpin, params: &RenderParams) -> FrameUpdate {
    FrameUpdate {
        yaw: spin.advance(params),
        mode: params.shading_mode(),
    }
}

use glam::{Vec2, Vec4};

use crate::{lerp, ReprojectionPassParams, Vec2Ext};

/// Describes where given texel was visible in the previous frame.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct Reprojection {
    pub prev_uv: Vec2,
    pub confidence: f32,
}

impl Reprojection {
    /// Follows given motion vector (current uv minus previous uv) backwards.
    ///
    /// Texels that came from outside of the screen (or whose motion is
    /// garbage) are not reprojected at all.
    pub fn from_motion(uv: Vec2, motion: Vec2) -> Self {
        let prev_uv = uv - motion;

        if prev_uv.is_inside_unit() {
            Self {
                prev_uv,
                confidence: 1.0,
            }
        } else {
            Self::default()
        }
    }

    pub fn is_some(&self) -> bool {
        self.confidence > 0.0
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }
}

/// Blends freshly resolved reflections with the history.
pub struct Reprojector<'a> {
    pub params: &'a ReprojectionPassParams,
}

impl Reprojector<'_> {
    pub fn run(
        &self,
        fresh: Vec4,
        reprojection: Reprojection,
        history: impl Fn(Vec2) -> Vec4,
    ) -> Vec4 {
        if !self.params.has_history() || reprojection.is_none() {
            return fresh;
        }

        let weight = self.params.history_weight * reprojection.confidence;

        lerp(fresh, history(reprojection.prev_uv), weight)
    }
}

use bytemuck::{Pod, Zeroable};
use glam::{vec2, Vec2};

#[repr(C)]
#[derive(Copy, Clone, Default, Pod, Zeroable, Debug)]
pub struct RayMarchingPassParams {
    pub max_iterations: u32,
    pub binary_search_iterations: u32,
    pub max_distance: f32,
}

impl RayMarchingPassParams {
    /// Distance travelled by the ray between two consecutive coarse steps.
    pub fn step(&self) -> f32 {
        self.max_distance / (self.max_iterations.max(1) as f32)
    }
}

#[repr(C)]
#[derive(Copy, Clone, Default, Pod, Zeroable, Debug)]
pub struct ResolvingPassParams {
    pub attenuation: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Default, Pod, Zeroable, Debug)]
pub struct ReprojectionPassParams {
    pub history_weight: f32,

    /// Whether the history buffer contains an image produced by a previous
    /// frame; zero right after the buffers got (re)allocated.
    pub has_history: u32,
}

impl ReprojectionPassParams {
    pub fn has_history(&self) -> bool {
        self.has_history != 0
    }
}

#[repr(C)]
#[derive(Copy, Clone, Default, Pod, Zeroable, Debug)]
pub struct BlurPassParams {
    /// Distance between two consecutive taps, in uv-coordinates
    pub step_x: f32,
    pub step_y: f32,
}

impl BlurPassParams {
    pub fn horizontal(size: u32) -> Self {
        Self {
            step_x: 1.0 / (size as f32),
            step_y: 0.0,
        }
    }

    pub fn vertical(size: u32) -> Self {
        Self {
            step_x: 0.0,
            step_y: 1.0 / (size as f32),
        }
    }

    pub fn step(&self) -> Vec2 {
        vec2(self.step_x, self.step_y)
    }
}

#[repr(C)]
#[derive(Copy, Clone, Default, Pod, Zeroable, Debug)]
pub struct CompositionPassParams {
    pub bandwidth: f32,
    pub distance_fade: f32,
    pub max_distance: f32,
    pub mip_count: u32,
}

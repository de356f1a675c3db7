//! Common structs and per-texel algorithms used by Sheen's reflection passes.
//!
//! Everything here is a pure function of its inputs: passes hand in texture
//! views (or sampling closures) and get back the value to write, so the same
//! kernels can be driven by the host pipeline and by unit tests.

#![allow(clippy::manual_range_contains)]

mod blur;
mod camera;
mod composition;
mod passes;
mod ray_hit;
mod ray_marcher;
mod reprojection;
mod resolver;
mod utils;

pub use self::blur::*;
pub use self::camera::*;
pub use self::composition::*;
pub use self::passes::*;
pub use self::ray_hit::*;
pub use self::ray_marcher::*;
pub use self::reprojection::*;
pub use self::resolver::*;
pub use self::utils::*;

pub mod prelude {
    pub use glam::*;

    pub use crate::*;
}

/// Smallest attenuation used when fading hits near the screen's border;
/// prevents division by zero when `attenuation` is zero.
pub const MINIMUM_ATTENUATION: f32 = 0.001;

/// How much of the history gets carried into the reprojected image, provided
/// the history is valid.
pub const REPROJECTION_HISTORY_WEIGHT: f32 = 0.9;

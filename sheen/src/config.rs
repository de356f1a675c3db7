use log::debug;

/// Tunables of the reflection pipeline.
///
/// Values outside of their supported ranges are not an error - they get
/// clamped by [`Config::sanitize()`] (and NaNs get replaced with their
/// defaults) before each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// How many coarse steps each ray makes; `1..=1024`
    pub maximum_iteration_count: u32,

    /// How many times a hit gets refined by bisection; `1..=20`
    pub binary_search_iteration_count: u32,

    /// How far (in world units) rays can travel; `0.0..=100.0`
    pub maximum_march_distance: f32,

    /// Resolution shift of the ray-hit buffer; `0..=4`
    pub ray_marching_downsample_amount: u32,

    /// Resolution shift of the resolve buffer; `0..=4`
    pub resolve_downsample_amount: u32,

    /// Resolution shift of the back-face depth buffer; `0..=4`
    pub back_face_depth_texture_downsample_amount: u32,

    /// Size (in uv-space) of the fade applied to hits near the screen's
    /// border; `0.0..=1.0`
    pub attenuation: f32,

    /// Scales surface roughness into the resolve buffer's level of detail;
    /// `0.0..=100.0`
    pub bandwidth: f32,

    /// Fraction of the march distance over which reflections fade out; zero
    /// disables the fade; `0.0..=1.0`
    pub distance_fade: f32,

    pub enable_reprojection: bool,
    pub enable_blur_pyramid: bool,
}

impl Config {
    pub fn sanitize(self) -> Self {
        let default = Self::default();

        let sanitized = Self {
            maximum_iteration_count: self
                .maximum_iteration_count
                .clamp(1, 1024),
            binary_search_iteration_count: self
                .binary_search_iteration_count
                .clamp(1, 20),
            maximum_march_distance: clamp(
                self.maximum_march_distance,
                0.0,
                100.0,
                default.maximum_march_distance,
            ),
            ray_marching_downsample_amount: self
                .ray_marching_downsample_amount
                .min(4),
            resolve_downsample_amount: self.resolve_downsample_amount.min(4),
            back_face_depth_texture_downsample_amount: self
                .back_face_depth_texture_downsample_amount
                .min(4),
            attenuation: clamp(self.attenuation, 0.0, 1.0, default.attenuation),
            bandwidth: clamp(self.bandwidth, 0.0, 100.0, default.bandwidth),
            distance_fade: clamp(
                self.distance_fade,
                0.0,
                1.0,
                default.distance_fade,
            ),
            enable_reprojection: self.enable_reprojection,
            enable_blur_pyramid: self.enable_blur_pyramid,
        };

        if sanitized != self {
            debug!("Config sanitized: {:?} -> {:?}", self, sanitized);
        }

        sanitized
    }

    pub fn with_maximum_iteration_count(mut self, value: u32) -> Self {
        self.maximum_iteration_count = value;
        self
    }

    pub fn with_binary_search_iteration_count(mut self, value: u32) -> Self {
        self.binary_search_iteration_count = value;
        self
    }

    pub fn with_maximum_march_distance(mut self, value: f32) -> Self {
        self.maximum_march_distance = value;
        self
    }

    pub fn with_ray_marching_downsample_amount(mut self, value: u32) -> Self {
        self.ray_marching_downsample_amount = value;
        self
    }

    pub fn with_resolve_downsample_amount(mut self, value: u32) -> Self {
        self.resolve_downsample_amount = value;
        self
    }

    pub fn with_back_face_depth_texture_downsample_amount(
        mut self,
        value: u32,
    ) -> Self {
        self.back_face_depth_texture_downsample_amount = value;
        self
    }

    pub fn with_attenuation(mut self, value: f32) -> Self {
        self.attenuation = value;
        self
    }

    pub fn with_bandwidth(mut self, value: f32) -> Self {
        self.bandwidth = value;
        self
    }

    pub fn with_distance_fade(mut self, value: f32) -> Self {
        self.distance_fade = value;
        self
    }

    pub fn with_reprojection(mut self, enabled: bool) -> Self {
        self.enable_reprojection = enabled;
        self
    }

    pub fn with_blur_pyramid(mut self, enabled: bool) -> Self {
        self.enable_blur_pyramid = enabled;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maximum_iteration_count: 25,
            binary_search_iteration_count: 5,
            maximum_march_distance: 75.0,
            ray_marching_downsample_amount: 1,
            resolve_downsample_amount: 1,
            back_face_depth_texture_downsample_amount: 1,
            attenuation: 0.25,
            bandwidth: 7.0,
            distance_fade: 0.0,
            enable_reprojection: true,
            enable_blur_pyramid: true,
        }
    }
}

fn clamp(value: f32, min: f32, max: f32, default: f32) -> f32 {
    if value.is_nan() {
        default
    } else {
        value.clamp(min, max)
    }
}

use glam::{ivec2, vec4, IVec2, Vec2, Vec4};

#[derive(Clone, Copy)]
pub struct BilinearFilter {
    /// Sample at `f(x=0, y=0)`
    pub s00: Vec4,

    /// Sample at `f(x=1, y=0)`
    pub s10: Vec4,

    /// Sample at `f(x=0, y=1)`
    pub s01: Vec4,

    /// Sample at `f(x=1, y=1)`
    pub s11: Vec4,
}

impl BilinearFilter {
    /// Gathers the four texels surrounding given texel-space position (where
    /// `0.0` corresponds to the center of texel zero).
    pub fn from_coords(pos: Vec2, sample: impl Fn(IVec2) -> Vec4) -> Self {
        let [p00, p10, p01, p11] = Self::coords(pos);

        Self {
            s00: sample(p00),
            s10: sample(p10),
            s01: sample(p01),
            s11: sample(p11),
        }
    }

    pub fn coords(pos: Vec2) -> [IVec2; 4] {
        let x = pos.x.floor() as i32;
        let y = pos.y.floor() as i32;

        [ivec2(x, y), ivec2(x + 1, y), ivec2(x, y + 1), ivec2(x + 1, y + 1)]
    }

    pub fn eval(&self, uv: Vec2) -> Vec4 {
        let weights = vec4(
            (1.0 - uv.x) * (1.0 - uv.y),
            uv.x * (1.0 - uv.y),
            (1.0 - uv.x) * uv.y,
            uv.x * uv.y,
        );

        self.s00 * weights.x
            + self.s10 * weights.y
            + self.s01 * weights.z
            + self.s11 * weights.w
    }
}

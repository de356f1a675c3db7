use std::mem;
use std::path::Path;

use derivative::Derivative;
use glam::{uvec2, UVec2, Vec2, Vec4};
use log::debug;

use crate::{gpu, Error, Result};

/// RGBA32F texture with an optional mip chain, living in host memory.
///
/// Single-channel textures (e.g. depth) keep their value in the `x`
/// component.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Texture {
    label: String,
    size: UVec2,
    #[derivative(Debug = "ignore")]
    mips: Vec<Vec<Vec4>>,
}

impl Texture {
    pub fn builder(label: impl ToString) -> TextureBuilder {
        TextureBuilder {
            label: label.to_string(),
            size: None,
            mip_count: 1,
            clear_value: Vec4::ZERO,
        }
    }

    /// Creates a single-level texture, filling it texel-by-texel.
    pub fn from_fn(
        label: impl ToString,
        size: UVec2,
        mut f: impl FnMut(UVec2) -> Vec4,
    ) -> Result<Self> {
        let mut this = Self::builder(label).with_size(size).build()?;

        for (idx, texel) in this.mips[0].iter_mut().enumerate() {
            let idx = idx as u32;

            *texel = f(uvec2(idx % size.x, idx / size.x));
        }

        Ok(this)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn mip_count(&self) -> usize {
        self.mips.len()
    }

    pub fn mip_size(&self, mip: usize) -> UVec2 {
        mip_size(self.size, mip)
    }

    pub fn view(&self, mip: usize) -> gpu::Tex<'_> {
        gpu::Tex::new(&self.mips[mip], self.mip_size(mip))
    }

    pub fn data(&self, mip: usize) -> &[Vec4] {
        &self.mips[mip]
    }

    pub fn data_mut(&mut self, mip: usize) -> &mut [Vec4] {
        &mut self.mips[mip]
    }

    pub fn read(&self, pos: UVec2) -> Vec4 {
        self.view(0).read(pos)
    }

    pub fn write(&mut self, pos: UVec2, value: Vec4) {
        assert!(pos.x < self.size.x && pos.y < self.size.y);

        self.mips[0][(pos.y * self.size.x + pos.x) as usize] = value;
    }

    pub fn fill(&mut self, value: Vec4) {
        for mip in &mut self.mips {
            mip.fill(value);
        }
    }

    /// Samples the mip chain at given (fractional) level of detail,
    /// interpolating bilinearly within levels and linearly between them.
    pub fn sample_lod(&self, uv: Vec2, lod: f32) -> Vec4 {
        let max = (self.mip_count() - 1) as f32;

        let lod = if lod.is_nan() {
            0.0
        } else {
            lod.clamp(0.0, max)
        };

        let lo = lod.floor() as usize;
        let hi = (lo + 1).min(self.mip_count() - 1);
        let value = self.view(lo).sample_bilinear(uv);

        if hi == lo {
            value
        } else {
            gpu::lerp(
                value,
                self.view(hi).sample_bilinear(uv),
                lod - (lo as f32),
            )
        }
    }

    /// Copies `src`'s level into given level of this texture; both levels
    /// must have the same size.
    pub fn copy_mip_from(&mut self, mip: usize, src: &Texture, src_mip: usize) {
        assert_eq!(
            self.mip_size(mip),
            src.mip_size(src_mip),
            "cannot copy `{}` into `{}`",
            src.label,
            self.label,
        );

        self.mips[mip].copy_from_slice(&src.mips[src_mip]);
    }

    /// Clones the texture's first level under a new label, going through the
    /// same fallible allocation as [`TextureBuilder::build()`].
    pub fn duplicate(&self, label: impl ToString) -> Result<Self> {
        let mut this = Self::builder(label).with_size(self.size).build()?;

        this.copy_mip_from(0, self, 0);

        Ok(this)
    }

    /// Saves given level as an 8-bit PNG, clamping values into `<0.0, 1.0>`.
    pub fn save_png(&self, path: impl AsRef<Path>, mip: usize) -> Result<()> {
        let size = self.mip_size(mip);
        let view = self.view(mip);

        let image = image::RgbaImage::from_fn(size.x, size.y, |x, y| {
            let texel = view.read(uvec2(x, y));
            let texel = texel.clamp(Vec4::ZERO, Vec4::ONE) * 255.0;

            image::Rgba([
                texel.x.round() as u8,
                texel.y.round() as u8,
                texel.z.round() as u8,
                texel.w.round() as u8,
            ])
        });

        image.save(path)?;

        Ok(())
    }
}

#[derive(Debug)]
pub struct TextureBuilder {
    label: String,
    size: Option<UVec2>,
    mip_count: usize,
    clear_value: Vec4,
}

impl TextureBuilder {
    pub fn with_size(mut self, size: UVec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_mip_count(mut self, mip_count: usize) -> Self {
        self.mip_count = mip_count;
        self
    }

    pub fn with_clear_value(mut self, clear_value: Vec4) -> Self {
        self.clear_value = clear_value;
        self
    }

    pub fn build(self) -> Result<Texture> {
        let size = self.size.unwrap_or_else(|| {
            panic!("Texture `{}` has no size", self.label);
        });

        assert!(size.x > 0);
        assert!(size.y > 0);
        assert!(self.mip_count > 0);

        debug!(
            "Allocating texture `{}`; size={}x{}, mips={}",
            self.label, size.x, size.y, self.mip_count
        );

        let mut mips = Vec::new();

        mips.try_reserve_exact(self.mip_count)
            .map_err(|_| Error::AllocationFailed {
                label: self.label.clone(),
                bytes: self
                    .mip_count
                    .saturating_mul(mem::size_of::<Vec<Vec4>>()),
            })?;

        for mip in 0..self.mip_count {
            let size = mip_size(size, mip);
            let len = (size.x as usize) * (size.y as usize);
            let mut data = Vec::new();

            data.try_reserve_exact(len)
                .map_err(|_| Error::AllocationFailed {
                    label: self.label.clone(),
                    bytes: len.saturating_mul(mem::size_of::<Vec4>()),
                })?;

            data.resize(len, self.clear_value);
            mips.push(data);
        }

        Ok(Texture {
            label: self.label,
            size,
            mips,
        })
    }
}

fn mip_size(size: UVec2, mip: usize) -> UVec2 {
    (size >> (mip as u32)).max(UVec2::ONE)
}

use std::path::Path;

use glam::{uvec2, vec4, UVec2};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Error, Result, Texture};

/// Static texture from which rays get their jitter; tiled over the screen.
#[derive(Debug)]
pub struct Noise {
    texture: Texture,
}

impl Noise {
    pub const SIZE: u32 = 64;
    pub const DEFAULT_SEED: u64 = 0x5eed;

    /// Generates white noise from given seed.
    pub fn generate(seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);

        let texture =
            Texture::from_fn("noise", uvec2(Self::SIZE, Self::SIZE), |_| {
                vec4(rng.gen(), rng.gen(), rng.gen(), 1.0)
            })?;

        Ok(Self { texture })
    }

    /// Loads noise from an image, using its red channel.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        info!("Loading noise: {}", path.display());

        let image = image::open(path)
            .map_err(|err| {
                Error::resource_unavailable(format!(
                    "couldn't load noise from `{}`: {}",
                    path.display(),
                    err
                ))
            })?
            .into_rgba32f();

        if image.width() == 0 || image.height() == 0 {
            return Err(Error::resource_unavailable(format!(
                "noise at `{}` is empty",
                path.display()
            )));
        }

        let texture = Texture::from_fn(
            "noise",
            uvec2(image.width(), image.height()),
            |pos| image.get_pixel(pos.x, pos.y).0.into(),
        )?;

        Ok(Self { texture })
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Returns jitter for given texel, in range `<0.0, 1.0)`.
    pub fn jitter(&self, pos: UVec2) -> f32 {
        let pos = pos % self.texture.size();

        self.texture.read(pos).x.clamp(0.0, 0.999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate() {
        let a = Noise::generate(1).unwrap();
        let b = Noise::generate(1).unwrap();
        let c = Noise::generate(2).unwrap();

        assert_eq!(uvec2(64, 64), a.texture().size());
        assert_eq!(a.texture().data(0), b.texture().data(0));
        assert_ne!(a.texture().data(0), c.texture().data(0));
    }

    #[test]
    fn jitter() {
        let target = Noise::generate(1).unwrap();

        for y in 0..4 {
            for x in 0..4 {
                let jitter = target.jitter(uvec2(x, y));

                assert!((0.0..1.0).contains(&jitter));

                // Noise is tiled over the screen
                assert_eq!(jitter, target.jitter(uvec2(x + 64, y + 128)));
            }
        }
    }

    #[test]
    fn load_missing() {
        let result = Noise::load("/definitely/not/here/noise.png");

        assert!(matches!(result, Err(Error::ResourceUnavailable(_))));
    }

    #[test]
    fn load() {
        let path = std::env::temp_dir().join("sheen-noise-load.png");

        Noise::generate(1)
            .unwrap()
            .texture()
            .save_png(&path, 0)
            .unwrap();

        let target = Noise::load(&path).unwrap();

        assert_eq!(uvec2(64, 64), target.texture().size());
        assert!((0.0..1.0).contains(&target.jitter(uvec2(3, 5))));

        _ = std::fs::remove_file(path);
    }
}

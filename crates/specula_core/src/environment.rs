//! Environment lookup for rays that escape the scene.
//!
//! An environment maps a direction to a color and nothing else: no state,
//! no side effects. The renderer calls it for primary misses and for
//! reflection rays at any bounce depth, from many threads at once.

use std::path::Path;

use specula_math::Vec3;

use crate::scene::Color;
use crate::texture::{load_texture, Texture, TextureError, TextureResult};

/// Background color as a pure function of direction.
pub trait Environment: Send + Sync {
    /// Color seen along `direction` (expected to be unit length).
    fn sample(&self, direction: Vec3) -> Color;
}

/// The same color in every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor {
    pub color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Environment for SolidColor {
    fn sample(&self, _direction: Vec3) -> Color {
        self.color
    }
}

/// Vertical blend from `bottom` (straight down) to `top` (straight up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyGradient {
    pub bottom: Color,
    pub top: Color,
}

impl Default for SkyGradient {
    fn default() -> Self {
        Self {
            bottom: Color::ONE,
            top: Color::new(0.5, 0.7, 1.0),
        }
    }
}

impl SkyGradient {
    pub fn new(bottom: Color, top: Color) -> Self {
        Self { bottom, top }
    }
}

impl Environment for SkyGradient {
    fn sample(&self, direction: Vec3) -> Color {
        let a = 0.5 * (direction.normalize().y + 1.0);
        self.bottom.lerp(self.top, a)
    }
}

/// Faces of a cube map, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl CubeFace {
    /// Pick the face a direction points through and the (s, t) texture
    /// coordinates on it, following the usual graphics-API cube map rule.
    ///
    /// `t = 0` is the top row of the face image.
    pub fn locate(direction: Vec3) -> (CubeFace, f32, f32) {
        let Vec3 { x, y, z } = direction;
        let abs = direction.abs();

        let (face, sc, tc, ma) = if abs.x >= abs.y && abs.x >= abs.z {
            if x > 0.0 {
                (CubeFace::PosX, -z, -y, abs.x)
            } else {
                (CubeFace::NegX, z, -y, abs.x)
            }
        } else if abs.y >= abs.z {
            if y > 0.0 {
                (CubeFace::PosY, x, z, abs.y)
            } else {
                (CubeFace::NegY, x, -z, abs.y)
            }
        } else if z > 0.0 {
            (CubeFace::PosZ, x, -y, abs.z)
        } else {
            (CubeFace::NegZ, -x, -y, abs.z)
        };

        let s = 0.5 * (sc / ma + 1.0);
        let t = 0.5 * (tc / ma + 1.0);
        (face, s, t)
    }
}

/// Six-face environment image.
#[derive(Debug, Clone)]
pub struct CubeMap {
    faces: [Texture; 6],
}

impl CubeMap {
    /// Build a cube map from face textures ordered +X, -X, +Y, -Y, +Z, -Z.
    pub fn new(faces: [Texture; 6]) -> Self {
        Self { faces }
    }

    /// Load the six face images, ordered +X, -X, +Y, -Y, +Z, -Z.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> TextureResult<Self> {
        if paths.len() != 6 {
            return Err(TextureError::InvalidFaceCount(paths.len()));
        }

        let faces = paths
            .iter()
            .map(|p| load_texture(p.as_ref()))
            .collect::<TextureResult<Vec<_>>>()?;

        let faces: [Texture; 6] = faces
            .try_into()
            .map_err(|v: Vec<Texture>| TextureError::InvalidFaceCount(v.len()))?;

        log::debug!(
            "Loaded cube map ({}x{} per face)",
            faces[0].width,
            faces[0].height
        );

        Ok(Self::new(faces))
    }

    pub fn face(&self, face: CubeFace) -> &Texture {
        &self.faces[face as usize]
    }
}

impl Environment for CubeMap {
    fn sample(&self, direction: Vec3) -> Color {
        let (face, s, t) = CubeFace::locate(direction);
        self.face(face).sample(s, t)
    }
}

//! Texture assets
//!
//! Textures record a source path plus sampler state. Pixel data never enters
//! this crate; the renderer decodes images itself, and the manifest only
//! needs the recipe. 1D and 3D kinds exist for the color-grading LUTs the
//! default scene uses.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Dimensionality of a texture asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureKind {
    /// 1D lookup table (e.g. toon ramp)
    D1,
    /// Standard 2D image
    D2,
    /// 3D lookup table (e.g. color-grading cube)
    D3,
    /// Six-faced environment cubemap
    Cube,
}

/// Minification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinFilter {
    Nearest,
    Linear,
    LinearMipLinear,
}

/// Magnification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagFilter {
    Nearest,
    Linear,
}

/// Texture coordinate wrapping behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

/// A texture asset: source image path plus sampler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub kind: TextureKind,
    pub path: PathBuf,
    pub min_filter: MinFilter,
    pub mag_filter: MagFilter,
    pub wrap: WrapMode,
}

impl Texture {
    /// Creates a texture with trilinear filtering and repeat wrapping
    pub fn new(kind: TextureKind, path: impl AsRef<Path>) -> Self {
        Self {
            kind,
            path: path.as_ref().to_path_buf(),
            min_filter: MinFilter::LinearMipLinear,
            mag_filter: MagFilter::Linear,
            wrap: WrapMode::Repeat,
        }
    }

    /// Builder pattern: set the minification filter
    pub fn with_min_filter(mut self, filter: MinFilter) -> Self {
        self.min_filter = filter;
        self
    }

    /// Builder pattern: set the magnification filter
    pub fn with_mag_filter(mut self, filter: MagFilter) -> Self {
        self.mag_filter = filter;
        self
    }

    /// Builder pattern: set the wrap mode
    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    pub(crate) fn source_key(&self) -> String {
        format!("texture:{:?}:{}", self.kind, self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_sampler_defaults() {
        let tex = Texture::new(TextureKind::D2, "textures/leaves.png")
            .with_min_filter(MinFilter::Nearest)
            .with_mag_filter(MagFilter::Nearest);

        assert_eq!(tex.min_filter, MinFilter::Nearest);
        assert_eq!(tex.mag_filter, MagFilter::Nearest);
        assert_eq!(tex.wrap, WrapMode::Repeat);
    }

    #[test]
    fn source_key_distinguishes_kinds() {
        let lut = Texture::new(TextureKind::D1, "luts/toon.png");
        let image = Texture::new(TextureKind::D2, "luts/toon.png");
        assert_ne!(lut.source_key(), image.source_key());
    }
}

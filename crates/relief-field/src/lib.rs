//! Noise-field sampling seam and activation parameters.
#![forbid(unsafe_code)]

mod simplex;

pub use simplex::SimplexField;

use relief_geom::Vec3;
use serde::Deserialize;

/// Scalar field driving lattice activation. Implementations return a value in
/// `[0, 1]` for a world-space position at the given feature scale.
pub trait ScalarField {
    fn sample(&self, pos: Vec3, scale: f32) -> f32;
}

impl<F> ScalarField for F
where
    F: Fn(Vec3, f32) -> f32,
{
    #[inline]
    fn sample(&self, pos: Vec3, scale: f32) -> f32 {
        self(pos, scale)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NoiseConfig {
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default)]
    pub threshold_gain: f32,
    #[serde(default)]
    pub offset: [f32; 3],
    #[serde(default)]
    pub invert: bool,
}

fn default_scale() -> f32 {
    1.0
}
fn default_threshold() -> f32 {
    0.5
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            threshold: default_threshold(),
            threshold_gain: 0.0,
            offset: [0.0; 3],
            invert: false,
        }
    }
}

// Flattened params used in the sampling loops (snapshot of config)
#[derive(Clone, Debug)]
pub struct NoiseSpec {
    pub scale: f32,
    pub threshold: f32,
    pub threshold_gain: f32,
    pub offset: Vec3,
    pub invert: bool,
}

impl NoiseSpec {
    pub fn from_config(cfg: &NoiseConfig) -> Self {
        Self {
            scale: cfg.scale,
            threshold: cfg.threshold,
            threshold_gain: cfg.threshold_gain,
            offset: Vec3::new(cfg.offset[0], cfg.offset[1], cfg.offset[2]),
            invert: cfg.invert,
        }
    }

    /// Activation threshold at lattice layer `y`; grows linearly so peaks
    /// erode with height.
    #[inline]
    pub fn threshold_at_layer(&self, y: i32) -> f32 {
        self.threshold + self.threshold_gain * y as f32
    }
}

impl Default for NoiseSpec {
    fn default() -> Self {
        Self::from_config(&NoiseConfig::default())
    }
}

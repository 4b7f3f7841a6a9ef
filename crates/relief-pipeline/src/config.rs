use std::fs;
use std::path::Path;

use relief_field::{NoiseConfig, NoiseSpec};
use relief_geom::Vec3;
use relief_lattice::LatticeDims;
use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub lattice: LatticeConfig,
    #[serde(default)]
    pub noise: NoiseConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LatticeConfig {
    #[serde(default = "default_size_xz")]
    pub size_x: i32,
    #[serde(default = "default_size_y")]
    pub size_y: i32,
    #[serde(default = "default_size_xz")]
    pub size_z: i32,
    #[serde(default = "default_spacing")]
    pub spacing_x: f32,
    #[serde(default = "default_spacing")]
    pub spacing_y: f32,
    #[serde(default = "default_spacing")]
    pub spacing_z: f32,
    #[serde(default)]
    pub origin: [f32; 3],
}

fn default_size_xz() -> i32 {
    10
}
fn default_size_y() -> i32 {
    1
}
fn default_spacing() -> f32 {
    1.0
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            size_x: default_size_xz(),
            size_y: default_size_y(),
            size_z: default_size_xz(),
            spacing_x: default_spacing(),
            spacing_y: default_spacing(),
            spacing_z: default_spacing(),
            origin: [0.0; 3],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BehaviorConfig {
    /// When re-modulating noise, deactivate points that no longer meet the
    /// threshold.
    #[serde(default = "default_clip")]
    pub clip_on_modify: bool,
}

fn default_clip() -> bool {
    true
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            clip_on_modify: default_clip(),
        }
    }
}

impl GeneratorConfig {
    /// Rejects configurations that would produce degenerate arrays before any
    /// allocation happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.lattice;
        for (axis, size) in [("x", l.size_x), ("y", l.size_y), ("z", l.size_z)] {
            if size < 1 {
                return Err(ConfigError::InvalidSize { axis, value: size });
            }
        }
        for (axis, spacing) in [("x", l.spacing_x), ("y", l.spacing_y), ("z", l.spacing_z)] {
            if !(spacing > 0.0) {
                return Err(ConfigError::InvalidSpacing {
                    axis,
                    value: spacing,
                });
            }
        }
        if !(self.noise.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.noise.scale));
        }
        Ok(())
    }

    pub fn lattice_dims(&self) -> LatticeDims {
        LatticeDims::new(self.lattice.size_x, self.lattice.size_y, self.lattice.size_z)
    }

    pub fn spacing(&self) -> Vec3 {
        Vec3::new(
            self.lattice.spacing_x,
            self.lattice.spacing_y,
            self.lattice.spacing_z,
        )
    }

    pub fn origin(&self) -> Vec3 {
        let [x, y, z] = self.lattice.origin;
        Vec3::new(x, y, z)
    }

    pub fn noise_spec(&self) -> NoiseSpec {
        NoiseSpec::from_config(&self.noise)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let cfg: GeneratorConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(cfg)
}

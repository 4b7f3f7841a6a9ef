use relief_field::{NoiseSpec, ScalarField};
use relief_geom::{IVec3, Vec3};

use crate::{Lattice, LatticeDims, Vertex};

/// Layers at or below this y are unconditionally active so every generated
/// mesh has a solid base.
pub const BASE_LAYERS: i32 = 1;

#[inline]
fn sample_active(field: &dyn ScalarField, noise: &NoiseSpec, position: Vec3, y: i32) -> bool {
    let mut value = field.sample(position + noise.offset, noise.scale);
    if noise.invert {
        value = 1.0 - value;
    }
    value >= noise.threshold_at_layer(y)
}

impl Lattice {
    /// Allocates the full point arena and samples activation for every point.
    pub fn generate(
        dims: LatticeDims,
        spacing: Vec3,
        origin: Vec3,
        field: &dyn ScalarField,
        noise: &NoiseSpec,
    ) -> Lattice {
        let mut verts = Vec::with_capacity(dims.point_count());
        for z in 0..=dims.z {
            for y in 0..=dims.y {
                for x in 0..=dims.x {
                    let position = origin
                        + Vec3::new(
                            x as f32 * spacing.x,
                            y as f32 * spacing.y,
                            z as f32 * spacing.z,
                        );
                    let active =
                        y <= BASE_LAYERS || sample_active(field, noise, position, y);
                    verts.push(Vertex::new(position, active));
                }
            }
        }
        log::debug!(
            "generated lattice {}x{}x{} ({} points)",
            dims.x,
            dims.y,
            dims.z,
            verts.len()
        );
        Lattice { dims, verts }
    }

    /// Re-evaluates activation against the current noise parameters using each
    /// point's stored position. Base layers are never touched. When
    /// `clip_on_modify` is false, points falling below threshold keep their
    /// activation; any point that is written also has its classification state
    /// reset so the next cleaning run starts fresh.
    pub fn remodulate(
        &mut self,
        field: &dyn ScalarField,
        noise: &NoiseSpec,
        clip_on_modify: bool,
    ) {
        let dims = self.dims;
        for z in 0..=dims.z {
            for y in 0..=dims.y {
                if y <= BASE_LAYERS {
                    continue;
                }
                for x in 0..=dims.x {
                    let i = dims.point_index(IVec3::new(x, y, z));
                    let set_active = sample_active(field, noise, self.verts[i].position, y);
                    if !set_active && !clip_on_modify {
                        continue;
                    }
                    let v = &mut self.verts[i];
                    v.active = set_active;
                    v.was_cleaned = false;
                    v.valid = false;
                }
            }
        }
    }
}

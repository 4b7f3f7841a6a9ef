use hashbrown::HashMap;
use relief_geom::{IVec3, Vec3};
use relief_lattice::Lattice;

use crate::cell::CellGrid;

/// Final dense buffers handed to a renderer: positions of every surface
/// vertex in lattice scan order and a remapped triangle index list.
#[derive(Clone, Debug, Default)]
pub struct MeshBuffers {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Collects triangle corner indices (still in lattice index space) for every
/// live face: cells in scan order, directions in table order, fan order
/// `(0,1,2) + (0,2,3)` per quad.
pub fn collect_triangles(grid: &CellGrid, lattice: &Lattice) -> Vec<u32> {
    let dims = grid.dims();
    let mut triangles = Vec::new();
    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                for face in grid.cell_faces(IVec3::new(x, y, z)) {
                    if !face.is_live(lattice) {
                        continue;
                    }
                    let [a, b, c, d] = face.verts;
                    triangles.extend_from_slice(&[a, b, c, a, c, d]);
                }
            }
        }
    }
    triangles
}

/// Densifies the surface vertices and remaps the triangle list into the dense
/// index space. Every collected triangle corner is a surface vertex by
/// construction; a missing remap entry is a programming error and panics.
pub fn compact(lattice: &Lattice, triangles: &[u32]) -> MeshBuffers {
    let mut positions = Vec::new();
    let mut remap: HashMap<u32, u32> = HashMap::new();
    for (i, v) in lattice.verts().iter().enumerate() {
        if v.active && v.valid {
            remap.insert(i as u32, positions.len() as u32);
            positions.push(v.position);
        }
    }
    let indices = triangles.iter().map(|i| remap[i]).collect();
    MeshBuffers { positions, indices }
}

use relief_geom::IVec3;
use relief_lattice::{Lattice, LatticeDims};

use crate::direction::Direction;
use crate::face::Face;

/// Every cell's six faces in one flat arena, cell-major, direction-table order
/// within a cell.
#[derive(Clone, Debug)]
pub struct CellGrid {
    dims: LatticeDims,
    faces: Vec<Face>,
}

impl CellGrid {
    /// Builds all six faces for every cell unconditionally. Face validity is a
    /// derived property evaluated lazily against the lattice, so no filtering
    /// happens here.
    pub fn build(lattice: &Lattice) -> CellGrid {
        let dims = lattice.dims();
        let mut faces = Vec::with_capacity(dims.cell_count() * 6);
        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    let loc = IVec3::new(x, y, z);
                    for direction in Direction::ALL {
                        let offsets = direction.corner_offsets();
                        let verts = [
                            dims.point_index(loc + offsets[0]) as u32,
                            dims.point_index(loc + offsets[1]) as u32,
                            dims.point_index(loc + offsets[2]) as u32,
                            dims.point_index(loc + offsets[3]) as u32,
                        ];
                        faces.push(Face {
                            verts,
                            direction,
                            skip: false,
                        });
                    }
                }
            }
        }
        CellGrid { dims, faces }
    }

    #[inline]
    pub fn dims(&self) -> LatticeDims {
        self.dims
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    fn slot(&self, cell: IVec3, direction: Direction) -> usize {
        self.dims.cell_index(cell) * 6 + direction.index()
    }

    #[inline]
    pub fn face(&self, cell: IVec3, direction: Direction) -> &Face {
        &self.faces[self.slot(cell, direction)]
    }

    #[inline]
    pub fn face_mut(&mut self, cell: IVec3, direction: Direction) -> &mut Face {
        let slot = self.slot(cell, direction);
        &mut self.faces[slot]
    }

    /// The six faces of one cell, direction-table order.
    #[inline]
    pub fn cell_faces(&self, cell: IVec3) -> &[Face] {
        let base = self.dims.cell_index(cell) * 6;
        &self.faces[base..base + 6]
    }

    /// Whether the cell exposes a surface face in the given direction,
    /// ignoring skip marks.
    #[inline]
    pub fn has_surface_face(&self, cell: IVec3, direction: Direction, lattice: &Lattice) -> bool {
        self.face(cell, direction).is_surface(lattice)
    }
}

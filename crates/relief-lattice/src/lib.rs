//! Lattice point storage, noise-driven sampling, and surface validity.
#![forbid(unsafe_code)]

mod sampler;
pub mod validity;

use relief_geom::{IVec3, Vec3};

/// One lattice point and its surface-classification state.
///
/// `active` means the point exists as candidate geometry; `valid` means it was
/// confirmed to bound a legal surface. Faces and compaction only ever consume
/// points that are both.
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub position: Vec3,
    pub active: bool,
    pub valid: bool,
    /// Sticky once the point is deactivated by a cleaning pass; keeps boundary
    /// points from flip-flopping between passes.
    pub was_cleaned: bool,
    /// One bit per axis-aligned neighbor, see the `MASK_*` constants.
    pub neighbor_mask: u8,
}

impl Vertex {
    fn new(position: Vec3, active: bool) -> Self {
        Self {
            position,
            active,
            valid: false,
            was_cleaned: false,
            neighbor_mask: 0,
        }
    }
}

/// Cell counts per axis. Point counts are one higher on every axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatticeDims {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl LatticeDims {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        ((self.x + 1) * (self.y + 1) * (self.z + 1)) as usize
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.x * self.y * self.z) as usize
    }

    /// Scan order is x fastest, then y, then z.
    #[inline]
    pub fn point_index(&self, p: IVec3) -> usize {
        (p.x + p.y * (self.x + 1) + p.z * (self.x + 1) * (self.y + 1)) as usize
    }

    #[inline]
    pub fn contains_point(&self, p: IVec3) -> bool {
        p.x >= 0 && p.x <= self.x && p.y >= 0 && p.y <= self.y && p.z >= 0 && p.z <= self.z
    }

    #[inline]
    pub fn cell_index(&self, c: IVec3) -> usize {
        (c.x + c.y * self.x + c.z * self.x * self.y) as usize
    }

    #[inline]
    pub fn contains_cell(&self, c: IVec3) -> bool {
        c.x >= 0 && c.x < self.x && c.y >= 0 && c.y < self.y && c.z >= 0 && c.z < self.z
    }

    #[inline]
    pub fn on_point_boundary(&self, p: IVec3) -> bool {
        p.x == 0 || p.x == self.x || p.y == 0 || p.y == self.y || p.z == 0 || p.z == self.z
    }

    /// True when any axis is a single cell thick; face culling degenerates to
    /// duplicate elimination in that case.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.x == 1 || self.y == 1 || self.z == 1
    }
}

/// Flat arena of lattice points for one generation run.
#[derive(Clone, Debug)]
pub struct Lattice {
    dims: LatticeDims,
    verts: Vec<Vertex>,
}

impl Lattice {
    #[inline]
    pub fn dims(&self) -> LatticeDims {
        self.dims
    }

    #[inline]
    pub fn verts(&self) -> &[Vertex] {
        &self.verts
    }

    #[inline]
    pub(crate) fn verts_mut(&mut self) -> &mut [Vertex] {
        &mut self.verts
    }

    #[inline]
    pub fn vert(&self, index: usize) -> &Vertex {
        &self.verts[index]
    }

    #[inline]
    pub fn vert_at(&self, p: IVec3) -> &Vertex {
        &self.verts[self.dims.point_index(p)]
    }

    /// Out-of-bounds points count as inactive.
    #[inline]
    pub fn active_at(&self, p: IVec3) -> bool {
        self.dims.contains_point(p) && self.verts[self.dims.point_index(p)].active
    }

    /// Out-of-bounds points were never cleaned.
    #[inline]
    pub fn was_cleaned_at(&self, p: IVec3) -> bool {
        self.dims.contains_point(p) && self.verts[self.dims.point_index(p)].was_cleaned
    }

    #[inline]
    pub fn is_surface_point(&self, index: usize) -> bool {
        let v = &self.verts[index];
        v.active && v.valid
    }

    pub fn active_count(&self) -> usize {
        self.verts.iter().filter(|v| v.active).count()
    }

    pub fn surface_count(&self) -> usize {
        self.verts.iter().filter(|v| v.active && v.valid).count()
    }
}

use relief_lattice::Lattice;

use crate::direction::Direction;

/// Oriented quad referencing four lattice points by index, clockwise from the
/// outward normal.
#[derive(Clone, Copy, Debug)]
pub struct Face {
    pub verts: [u32; 4],
    pub direction: Direction,
    /// Set by the culler; a skipped face is never emitted.
    pub skip: bool,
}

impl Face {
    /// True when all four corners belong to the cleaned surface. Ignores the
    /// culler's skip mark; the culling passes reason about geometry only.
    #[inline]
    pub fn is_surface(&self, lattice: &Lattice) -> bool {
        self.verts
            .iter()
            .all(|&i| lattice.is_surface_point(i as usize))
    }

    /// Renderable: a surface face that was not culled.
    #[inline]
    pub fn is_live(&self, lattice: &Lattice) -> bool {
        !self.skip && self.is_surface(lattice)
    }

    /// Order-independent equivalence on the referenced corner set. Faces of
    /// adjacent cells that cover the same quad compare equal.
    pub fn shares_all_verts(&self, other: &Face) -> bool {
        let mut a = self.verts;
        let mut b = other.verts;
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

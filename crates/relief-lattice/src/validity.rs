//! Neighbor classification and the fixpoint cleaning loop.
//!
//! A classify pass recomputes every point's neighbor mask and validity without
//! touching activation; an apply pass then deactivates the active-but-invalid
//! points. The two phases alternate until a classify pass finds nothing left
//! to remove. Termination follows from the active set only ever shrinking.

use relief_geom::IVec3;

use crate::Lattice;

pub const MASK_LEFT: u8 = 0b000001;
pub const MASK_RIGHT: u8 = 0b000010;
pub const MASK_UP: u8 = 0b000100;
pub const MASK_DOWN: u8 = 0b001000;
pub const MASK_FORWARD: u8 = 0b010000;
pub const MASK_BACK: u8 = 0b100000;

const NEIGHBOR_STEPS: [(IVec3, u8); 6] = [
    (IVec3::new(-1, 0, 0), MASK_LEFT),
    (IVec3::new(1, 0, 0), MASK_RIGHT),
    (IVec3::new(0, 1, 0), MASK_UP),
    (IVec3::new(0, -1, 0), MASK_DOWN),
    (IVec3::new(0, 0, 1), MASK_FORWARD),
    (IVec3::new(0, 0, -1), MASK_BACK),
];

/// Candidate offsets one level above a point, excluding directly above. A
/// fully-surrounded point is a lower inward corner when any of these is
/// inactive. Only the upper ring is probed; upward-facing concave corners are
/// not recognized.
const ABOVE_RING: [IVec3; 8] = [
    IVec3::new(-1, 1, 1),
    IVec3::new(0, 1, 1),
    IVec3::new(1, 1, 1),
    IVec3::new(-1, 1, 0),
    IVec3::new(1, 1, 0),
    IVec3::new(-1, 1, -1),
    IVec3::new(0, 1, -1),
    IVec3::new(1, 1, -1),
];

#[derive(Clone, Copy, Debug, Default)]
pub struct ClassifyReport {
    /// Points still active but judged invalid by this pass.
    pub active_invalid: usize,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FixpointReport {
    pub passes: u32,
    pub removed: usize,
}

/// Recomputes every point's neighbor mask and validity. Activation is not
/// modified, so the pass is order-independent.
pub fn classify(lattice: &mut Lattice) -> ClassifyReport {
    let dims = lattice.dims();
    let mut active_invalid = 0usize;
    for z in 0..=dims.z {
        for y in 0..=dims.y {
            for x in 0..=dims.x {
                let p = IVec3::new(x, y, z);
                let mut mask = 0u8;
                for (step, bit) in NEIGHBOR_STEPS {
                    if lattice.active_at(p + step) {
                        mask |= bit;
                    }
                }
                let valid = point_valid(lattice, p, mask);
                let i = dims.point_index(p);
                let v = &mut lattice.verts_mut()[i];
                v.neighbor_mask = mask;
                v.valid = valid;
                if v.active && !valid {
                    active_invalid += 1;
                }
            }
        }
    }
    ClassifyReport { active_invalid }
}

fn point_valid(lattice: &Lattice, p: IVec3, mask: u8) -> bool {
    let n = mask.count_ones();
    if n < 3 {
        return false;
    }
    let dims = lattice.dims();
    if dims.on_point_boundary(p) {
        // Boundary points need backing toward the lattice center. The step is
        // horizontal only; points boundary solely in y degenerate to checking
        // themselves.
        let mut step = IVec3::ZERO;
        if p.x == 0 {
            step.x = 1;
        } else if p.x == dims.x {
            step.x = -1;
        }
        if p.z == 0 {
            step.z = 1;
        } else if p.z == dims.z {
            step.z = -1;
        }
        let q = p + step;
        // A backing point that was cleaned earlier still counts, otherwise
        // boundary validity would oscillate between passes.
        if lattice.was_cleaned_at(q) {
            return true;
        }
        return lattice.active_at(q);
    }
    if n == 3 {
        // Three-neighbor shelves stand only with a corroborating horizontal
        // diagonal; opposite-pair configurations cannot stand at all.
        let diag = match mask {
            0b011010 => Some(IVec3::new(1, 0, 1)),   // Forward, Right, Down
            0b101010 => Some(IVec3::new(1, 0, -1)),  // Back, Right, Down
            0b101001 => Some(IVec3::new(-1, 0, -1)), // Back, Left, Down
            0b011001 => Some(IVec3::new(-1, 0, 1)),  // Forward, Left, Down
            0b111000 | 0b001011 => return false,     // Forward+Back+Down, Left+Right+Down
            _ => None,
        };
        if let Some(step) = diag {
            if !lattice.active_at(p + step) {
                return false;
            }
        }
    }
    if n == 6 {
        // Fully surrounded: buried unless it is a lower inward corner holding
        // the surface together.
        return is_lower_inward_corner(lattice, p);
    }
    true
}

fn is_lower_inward_corner(lattice: &Lattice, p: IVec3) -> bool {
    ABOVE_RING.iter().any(|&off| {
        let q = p + off;
        lattice.dims().contains_point(q) && !lattice.active_at(q)
    })
}

/// Deactivates every active-but-invalid point, returning how many were
/// removed. Removed points keep a sticky `was_cleaned` mark.
pub fn clean(lattice: &mut Lattice) -> usize {
    let mut removed = 0usize;
    for v in lattice.verts_mut() {
        if v.active && !v.valid {
            v.active = false;
            v.was_cleaned = true;
            removed += 1;
        }
    }
    removed
}

/// Alternates classify and clean until no active-invalid points remain.
pub fn clean_to_fixpoint(lattice: &mut Lattice) -> FixpointReport {
    let mut report = FixpointReport::default();
    loop {
        let pass = classify(lattice);
        report.passes += 1;
        if pass.active_invalid == 0 {
            break;
        }
        let removed = clean(lattice);
        report.removed += removed;
        log::debug!(
            "cleaning pass {}: removed {} points, {} active remain",
            report.passes,
            removed,
            lattice.active_count()
        );
    }
    report
}

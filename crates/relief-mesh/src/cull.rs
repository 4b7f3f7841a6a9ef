//! Hidden-face elimination.
//!
//! Runs as an ordered sequence of passes over the cell grid, marking faces to
//! skip in place. All surface queries ignore skip marks; only the explicit
//! "already skipped" checks in the later passes observe them, so the pass
//! order is load-bearing: the upward-propagation and facing-pair passes rely
//! on the marks left by the vertical classification pass.

use relief_geom::IVec3;
use relief_lattice::Lattice;

use crate::cell::CellGrid;
use crate::direction::Direction;

#[derive(Clone, Copy, Debug, Default)]
pub struct CullReport {
    pub skipped: usize,
}

pub fn cull(grid: &mut CellGrid, lattice: &Lattice) -> CullReport {
    let dims = grid.dims();
    let degenerate = dims.is_degenerate();

    // Vertical classification (or duplicate elimination for thin grids)
    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                let cell = IVec3::new(x, y, z);
                if degenerate {
                    cull_degenerate_cell(grid, lattice, cell);
                    continue;
                }
                if y > 0 {
                    let up = grid.has_surface_face(cell, Direction::Up, lattice);
                    let down = grid.has_surface_face(cell, Direction::Down, lattice);
                    if up && !down {
                        cull_up_only_cell(grid, lattice, cell);
                    } else if down && !up {
                        cull_covered_cell(grid, cell);
                    } else if up && down {
                        cull_slab_cell(grid, lattice, cell);
                    }
                } else {
                    cull_ground_cell(grid, lattice, cell);
                }
            }
        }
    }

    // Hollow columns: propagate lateral culls upward through cells exposing
    // neither vertical face
    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                if y <= 1 {
                    continue;
                }
                let cell = IVec3::new(x, y, z);
                if !grid.has_surface_face(cell, Direction::Up, lattice)
                    && !grid.has_surface_face(cell, Direction::Down, lattice)
                {
                    cull_hollow_column_cell(grid, lattice, cell);
                }
            }
        }
    }

    // Facing pairs: mutual elimination of duplicated interior walls
    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                if y == 0 {
                    continue;
                }
                let cell = IVec3::new(x, y, z);
                if grid.has_surface_face(cell, Direction::Up, lattice)
                    && grid.has_surface_face(cell, Direction::Down, lattice)
                {
                    cull_facing_pairs(grid, lattice, cell);
                }
            }
        }
    }

    let skipped = grid.faces().iter().filter(|f| f.skip).count();
    log::debug!("culled {skipped} of {} faces", grid.faces().len());
    CullReport { skipped }
}

/// Thin-grid pass: a face duplicated by a neighboring cell is skipped when
/// that neighbor also exposes a surface face in the step direction.
fn cull_degenerate_cell(grid: &mut CellGrid, lattice: &Lattice, cell: IVec3) {
    for direction in Direction::ALL {
        for step_dir in Direction::ALL {
            let other = cell + step_dir.step();
            if !grid.dims().contains_cell(other) {
                continue;
            }
            let shares = Direction::ALL
                .iter()
                .any(|&od| grid.face(other, od).shares_all_verts(grid.face(cell, direction)));
            if shares && grid.has_surface_face(other, step_dir, lattice) {
                grid.face_mut(cell, direction).skip = true;
            }
        }
    }
}

/// Up exposed, underside buried: skip any face whose equivalent in the
/// neighboring cell is backed by that neighbor's own surface face in the same
/// direction. Down is exempt; it is already non-surface here.
fn cull_up_only_cell(grid: &mut CellGrid, lattice: &Lattice, cell: IVec3) {
    for direction in Direction::ALL {
        for step_dir in Direction::ALL {
            if step_dir == Direction::Down {
                continue;
            }
            let other = cell + step_dir.step();
            if !grid.dims().contains_cell(other) {
                continue;
            }
            let shares = Direction::ALL
                .iter()
                .any(|&od| grid.face(other, od).shares_all_verts(grid.face(cell, direction)));
            if shares && grid.has_surface_face(other, step_dir, lattice) {
                grid.face_mut(cell, direction).skip = true;
            }
        }
    }
}

/// Underside exposed but no top: this cell is the belly of a solid, not an
/// exposed exterior. Nothing of it is drawn.
fn cull_covered_cell(grid: &mut CellGrid, cell: IVec3) {
    for direction in Direction::ALL {
        grid.face_mut(cell, direction).skip = true;
    }
}

/// Both vertical faces exposed: the underside is always dropped, and any face
/// whose neighbor in that direction exposes a surface top is sandwiched.
fn cull_slab_cell(grid: &mut CellGrid, lattice: &Lattice, cell: IVec3) {
    grid.face_mut(cell, Direction::Down).skip = true;
    for step_dir in [
        Direction::Up,
        Direction::Right,
        Direction::Left,
        Direction::Forward,
        Direction::Back,
    ] {
        let other = cell + step_dir.step();
        if grid.dims().contains_cell(other)
            && grid.has_surface_face(other, Direction::Up, lattice)
        {
            grid.face_mut(cell, step_dir).skip = true;
        }
    }
}

/// Ground level: interior lateral faces are determined by position alone
/// (only outer-boundary walls are kept), and the top is dropped when the cell
/// above exposes its own top.
fn cull_ground_cell(grid: &mut CellGrid, lattice: &Lattice, cell: IVec3) {
    let dims = grid.dims();
    if cell.x == 0 {
        grid.face_mut(cell, Direction::Right).skip = true;
    } else if cell.x == dims.x - 1 {
        grid.face_mut(cell, Direction::Left).skip = true;
    } else {
        grid.face_mut(cell, Direction::Left).skip = true;
        grid.face_mut(cell, Direction::Right).skip = true;
    }
    if cell.z == 0 {
        grid.face_mut(cell, Direction::Forward).skip = true;
    } else if cell.z == dims.z - 1 {
        grid.face_mut(cell, Direction::Back).skip = true;
    } else {
        grid.face_mut(cell, Direction::Forward).skip = true;
        grid.face_mut(cell, Direction::Back).skip = true;
    }
    let above = cell + Direction::Up.step();
    if dims.contains_cell(above) && grid.has_surface_face(above, Direction::Up, lattice) {
        grid.face_mut(cell, Direction::Up).skip = true;
    }
}

/// Air column interior: a lateral face is skipped once the same face one
/// level below has been skipped, walking the cull up the column.
fn cull_hollow_column_cell(grid: &mut CellGrid, lattice: &Lattice, cell: IVec3) {
    let below = cell + Direction::Down.step();
    for direction in Direction::LATERAL {
        if grid.has_surface_face(cell, direction, lattice) && grid.face(below, direction).skip {
            grid.face_mut(cell, direction).skip = true;
        }
    }
}

/// Two cells exposing the same interior wall from both sides drop both
/// copies, unless an earlier pass already settled either one.
fn cull_facing_pairs(grid: &mut CellGrid, lattice: &Lattice, cell: IVec3) {
    for direction in Direction::LATERAL {
        let other = cell + direction.step();
        if !grid.dims().contains_cell(other) {
            continue;
        }
        let opposite = direction.opposite();
        if grid.has_surface_face(other, opposite, lattice)
            && !grid.face(other, opposite).skip
            && !grid.face(cell, direction).skip
        {
            grid.face_mut(other, opposite).skip = true;
            grid.face_mut(cell, direction).skip = true;
        }
    }
}

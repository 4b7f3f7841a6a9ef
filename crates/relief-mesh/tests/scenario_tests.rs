use relief_field::{NoiseSpec, ScalarField};
use relief_geom::{IVec3, Vec3};
use relief_lattice::{Lattice, LatticeDims, validity};
use relief_mesh::{CellGrid, Direction, collect_triangles, compact, cull};

fn build(dims: LatticeDims, field: &dyn ScalarField) -> (Lattice, CellGrid, Vec<u32>) {
    let mut lattice = Lattice::generate(
        dims,
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::ZERO,
        field,
        &NoiseSpec::default(),
    );
    validity::clean_to_fixpoint(&mut lattice);
    let mut grid = CellGrid::build(&lattice);
    cull(&mut grid, &lattice);
    let triangles = collect_triangles(&grid, &lattice);
    (lattice, grid, triangles)
}

fn solid(_p: Vec3, _s: f32) -> f32 {
    1.0
}

fn assert_no_duplicate_live_faces(grid: &CellGrid, lattice: &Lattice) {
    let live: Vec<_> = grid.faces().iter().filter(|f| f.is_live(lattice)).collect();
    for (i, a) in live.iter().enumerate() {
        for b in &live[i + 1..] {
            assert!(
                !a.shares_all_verts(b),
                "two live faces cover the same quad: {a:?} / {b:?}"
            );
        }
    }
}

#[test]
fn single_cell_emits_a_full_cube() {
    let (lattice, grid, triangles) = build(LatticeDims::new(1, 1, 1), &solid);
    assert_eq!(lattice.surface_count(), 8);
    // No neighbor exists, so nothing can be culled
    assert!(grid.faces().iter().all(|f| !f.skip));
    let mesh = compact(&lattice, &triangles);
    assert_eq!(mesh.positions.len(), 8);
    assert_eq!(mesh.indices.len(), 36);
    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < 8));
    // Remapping preserves positions
    for (lat, dense) in triangles.iter().zip(mesh.indices.iter()) {
        assert_eq!(
            lattice.vert(*lat as usize).position,
            mesh.positions[*dense as usize]
        );
    }
}

#[test]
fn thin_slab_drops_interior_walls_once() {
    // 3x1x3 is degenerate in y; interior walls are duplicated between
    // neighboring cells and both copies must go.
    let (lattice, grid, triangles) = build(LatticeDims::new(3, 1, 3), &solid);
    assert_eq!(lattice.surface_count(), 32);
    let live = grid
        .faces()
        .iter()
        .filter(|f| f.is_live(&lattice))
        .count();
    // 9 tops + 9 bottoms + 12 outer boundary walls
    assert_eq!(live, 30);
    let mesh = compact(&lattice, &triangles);
    assert_eq!(mesh.positions.len(), 32);
    assert_eq!(mesh.indices.len(), 180);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < 32));
    assert_no_duplicate_live_faces(&grid, &lattice);
}

#[test]
fn stacked_tower_keeps_only_the_outward_shell() {
    // A 1-cell tower, two cells tall, standing on the forced base slab of a
    // 3x3x3 lattice. The tower occupies the cell column (1, *, 1).
    let tower = |p: Vec3, _s: f32| {
        if (1.0..=2.0).contains(&p.x) && (1.0..=2.0).contains(&p.z) {
            1.0
        } else {
            0.0
        }
    };
    let (lattice, grid, triangles) = build(LatticeDims::new(3, 3, 3), &tower);
    // slab (4*4*2) plus tower points (2*2*2), nothing cleaned
    assert_eq!(lattice.surface_count(), 40);

    let lower = IVec3::new(1, 1, 1);
    let upper = IVec3::new(1, 2, 1);
    // The lower cell of the stacked pair loses its underside and the shared
    // boundary face toward the upper cell...
    assert!(grid.face(lower, Direction::Down).skip);
    assert!(grid.face(lower, Direction::Up).skip);
    // ...but keeps its four outward walls.
    for dir in Direction::LATERAL {
        assert!(!grid.face(lower, dir).skip, "lower tower wall {dir:?}");
        assert!(grid.face(lower, dir).is_live(&lattice));
    }
    // The upper cell keeps its cap and walls, dropping only its underside.
    assert!(grid.face(upper, Direction::Down).skip);
    assert!(!grid.face(upper, Direction::Up).skip);
    assert!(grid.face(upper, Direction::Up).is_live(&lattice));
    for dir in Direction::LATERAL {
        assert!(!grid.face(upper, dir).skip, "upper tower wall {dir:?}");
    }

    // Air sitting on the slab contributes nothing
    for dir in Direction::ALL {
        assert!(grid.face(IVec3::new(0, 1, 1), dir).skip);
    }
    // The air cell hugging the tower wall had its duplicate of that wall
    // culled by upward propagation
    assert!(grid.face(IVec3::new(2, 2, 1), Direction::Left).skip);

    // Ground under the tower shows only its bottom
    let under = IVec3::new(1, 0, 1);
    assert!(!grid.face(under, Direction::Down).skip);
    for dir in [
        Direction::Up,
        Direction::Right,
        Direction::Left,
        Direction::Forward,
        Direction::Back,
    ] {
        assert!(grid.face(under, dir).skip, "ground face {dir:?}");
    }
    // Ground corners keep their outer boundary walls and exposed top
    let corner = IVec3::new(0, 0, 0);
    assert!(grid.face(corner, Direction::Right).skip);
    assert!(grid.face(corner, Direction::Forward).skip);
    assert!(!grid.face(corner, Direction::Left).skip);
    assert!(!grid.face(corner, Direction::Back).skip);
    assert!(!grid.face(corner, Direction::Up).skip);
    assert!(!grid.face(corner, Direction::Down).skip);

    assert_no_duplicate_live_faces(&grid, &lattice);

    // Every emitted corner survives compaction in bounds
    let mesh = compact(&lattice, &triangles);
    assert_eq!(mesh.positions.len(), 40);
    assert!(
        mesh.indices
            .iter()
            .all(|&i| (i as usize) < mesh.positions.len())
    );
}

use relief_field::NoiseSpec;
use relief_geom::Vec3;
use relief_pipeline::{GenState, GeneratorConfig, MeshPipeline, PipelineError};

fn cube_config() -> GeneratorConfig {
    let mut cfg = GeneratorConfig::default();
    cfg.lattice.size_x = 1;
    cfg.lattice.size_y = 1;
    cfg.lattice.size_z = 1;
    cfg
}

fn sized_config(x: i32, y: i32, z: i32) -> GeneratorConfig {
    let mut cfg = GeneratorConfig::default();
    cfg.lattice.size_x = x;
    cfg.lattice.size_y = y;
    cfg.lattice.size_z = z;
    cfg
}

fn solid_pipeline(cfg: GeneratorConfig) -> MeshPipeline {
    MeshPipeline::new(cfg, Box::new(|_p: Vec3, _s: f32| 1.0f32)).unwrap()
}

#[test]
fn happy_path_walks_every_state() {
    let mut pipeline = solid_pipeline(cube_config());
    assert_eq!(pipeline.state(), GenState::ReadyToGenerate);
    pipeline.generate().unwrap();
    assert_eq!(pipeline.state(), GenState::VerticesGenerated);
    pipeline.modify_noise().unwrap();
    assert_eq!(pipeline.state(), GenState::VerticesModified);
    pipeline.clean_to_fixpoint().unwrap();
    assert_eq!(pipeline.state(), GenState::ReadyToTriangulate);
    pipeline.triangulate().unwrap();
    assert_eq!(pipeline.state(), GenState::TrianglesGenerated);
    let mesh = pipeline.finalize().unwrap();
    assert_eq!(mesh.positions.len(), 8);
    assert_eq!(mesh.indices.len(), 36);
    assert_eq!(pipeline.state(), GenState::Finalized);
}

#[test]
fn stage_operations_reject_out_of_order_calls() {
    let mut pipeline = solid_pipeline(cube_config());

    // Nothing but generate works from the initial state
    assert!(matches!(
        pipeline.modify_noise(),
        Err(PipelineError::InvalidState { op: "modify_noise", .. })
    ));
    assert!(matches!(
        pipeline.clean_to_fixpoint(),
        Err(PipelineError::InvalidState { .. })
    ));
    assert!(matches!(
        pipeline.triangulate(),
        Err(PipelineError::InvalidState { .. })
    ));
    assert!(matches!(
        pipeline.finalize(),
        Err(PipelineError::InvalidState { .. })
    ));

    pipeline.generate().unwrap();
    // Re-generating without a reset is rejected
    assert!(matches!(
        pipeline.generate(),
        Err(PipelineError::InvalidState { op: "generate", .. })
    ));
    // Triangulation cannot start before the fixpoint is reached
    assert!(matches!(
        pipeline.triangulate(),
        Err(PipelineError::InvalidState { .. })
    ));

    pipeline.clean_to_fixpoint().unwrap();
    // Modification is sealed once cleaning has finished
    assert!(matches!(
        pipeline.modify_noise(),
        Err(PipelineError::InvalidState { .. })
    ));
    // Compaction cannot start before triangulation
    assert!(matches!(
        pipeline.finalize(),
        Err(PipelineError::InvalidState { .. })
    ));

    pipeline.triangulate().unwrap();
    pipeline.finalize().unwrap();
    // The run is sealed after finalization
    assert!(matches!(
        pipeline.triangulate(),
        Err(PipelineError::InvalidState { .. })
    ));
}

#[test]
fn manual_cleaning_steps_compose() {
    let mut pipeline = solid_pipeline(sized_config(2, 3, 2));
    pipeline.generate().unwrap();
    // clean_invalid needs a preceding classify pass
    assert!(matches!(
        pipeline.clean_invalid(),
        Err(PipelineError::InvalidState { .. })
    ));
    // A fully solid 2x3x2 block buries its two center points
    let invalid = pipeline.classify_invalid().unwrap();
    assert_eq!(invalid, 2);
    assert_eq!(pipeline.state(), GenState::VerticesCleaned);
    assert_eq!(pipeline.clean_invalid().unwrap(), 2);
    // Fixpoint from the manual state converges with nothing left to do
    pipeline.clean_to_fixpoint().unwrap();
    assert_eq!(pipeline.state(), GenState::ReadyToTriangulate);
    let lattice = pipeline.lattice().unwrap();
    assert_eq!(lattice.surface_count(), lattice.active_count());
}

#[test]
fn set_noise_drives_remodulation() {
    let mut cfg = sized_config(2, 2, 2);
    cfg.noise.threshold = 0.5;
    let mut pipeline = MeshPipeline::new(cfg, Box::new(|_p: Vec3, _s: f32| 0.8f32)).unwrap();
    pipeline.generate().unwrap();
    assert_eq!(pipeline.lattice().unwrap().active_count(), 27);

    pipeline.set_noise(NoiseSpec {
        threshold: 0.9,
        ..NoiseSpec::default()
    });
    pipeline.modify_noise().unwrap();
    // The y == 2 plane no longer meets the threshold; the base slab stays
    assert_eq!(pipeline.lattice().unwrap().active_count(), 18);
}

#[test]
fn clip_on_modify_false_never_deactivates() {
    let mut cfg = sized_config(2, 2, 2);
    cfg.behavior.clip_on_modify = false;
    let mut pipeline = MeshPipeline::new(cfg, Box::new(|_p: Vec3, _s: f32| 0.8f32)).unwrap();
    pipeline.generate().unwrap();
    pipeline.set_noise(NoiseSpec {
        threshold: 0.9,
        ..NoiseSpec::default()
    });
    pipeline.modify_noise().unwrap();
    assert_eq!(pipeline.lattice().unwrap().active_count(), 27);
}

#[test]
fn reset_sheds_or_destroys_the_mesh() {
    let mut pipeline = solid_pipeline(cube_config());
    pipeline.generate().unwrap();
    pipeline.clean_to_fixpoint().unwrap();
    pipeline.triangulate().unwrap();
    pipeline.finalize().unwrap();

    // Shedding hands the product back and restarts the pipeline
    let mesh = pipeline.reset(false).expect("shed returns the mesh");
    assert_eq!(mesh.positions.len(), 8);
    assert_eq!(pipeline.state(), GenState::ReadyToGenerate);
    assert!(pipeline.lattice().is_none());

    // A fresh run works after reset, and destroy drops the product
    pipeline.generate().unwrap();
    pipeline.clean_to_fixpoint().unwrap();
    pipeline.triangulate().unwrap();
    pipeline.finalize().unwrap();
    assert!(pipeline.reset(true).is_none());
    assert_eq!(pipeline.state(), GenState::ReadyToGenerate);
}

#[test]
fn invalid_configs_fail_before_allocation() {
    let mut cfg = GeneratorConfig::default();
    cfg.lattice.size_x = 0;
    assert!(MeshPipeline::new(cfg, Box::new(|_p: Vec3, _s: f32| 1.0f32)).is_err());

    let mut cfg = GeneratorConfig::default();
    cfg.lattice.spacing_y = 0.0;
    assert!(MeshPipeline::new(cfg, Box::new(|_p: Vec3, _s: f32| 1.0f32)).is_err());

    let mut cfg = GeneratorConfig::default();
    cfg.noise.scale = -2.0;
    assert!(MeshPipeline::new(cfg, Box::new(|_p: Vec3, _s: f32| 1.0f32)).is_err());
}

#[test]
fn error_messages_name_both_states() {
    let mut pipeline = solid_pipeline(cube_config());
    let err = pipeline.triangulate().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("triangulate"));
    assert!(msg.contains("ReadyToTriangulate"));
    assert!(msg.contains("ReadyToGenerate"));
}

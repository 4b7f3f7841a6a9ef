//! The staged generation pipeline: sampling, cleaning, triangulation,
//! compaction, behind a strict state machine.
#![forbid(unsafe_code)]

mod config;
mod error;

pub use config::{BehaviorConfig, GeneratorConfig, LatticeConfig, load_config_from_path};
pub use error::{ConfigError, PipelineError};
pub use relief_mesh::MeshBuffers;

use std::time::Instant;

use relief_field::{NoiseSpec, ScalarField};
use relief_lattice::{Lattice, validity};
use relief_mesh::{CellGrid, collect_triangles, compact, cull};

/// Pipeline stages, advanced strictly in order. Every stage operation names
/// the states it may be called from and fails otherwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GenState {
    ReadyToGenerate,
    VerticesGenerated,
    VerticesModified,
    VerticesCleaned,
    ReadyToTriangulate,
    TrianglesGenerated,
    Finalized,
}

/// One generation run: owns the lattice, the collected triangle list, and the
/// finalized buffers. Discard or `reset` to start over; there is no partial
/// recovery.
pub struct MeshPipeline {
    config: GeneratorConfig,
    noise: NoiseSpec,
    field: Box<dyn ScalarField>,
    state: GenState,
    lattice: Option<Lattice>,
    triangles: Vec<u32>,
    mesh: Option<MeshBuffers>,
}

impl MeshPipeline {
    /// Validates the configuration up front; a rejected config never
    /// allocates.
    pub fn new(config: GeneratorConfig, field: Box<dyn ScalarField>) -> Result<Self, ConfigError> {
        config.validate()?;
        let noise = config.noise_spec();
        Ok(Self {
            config,
            noise,
            field,
            state: GenState::ReadyToGenerate,
            lattice: None,
            triangles: Vec::new(),
            mesh: None,
        })
    }

    #[inline]
    pub fn state(&self) -> GenState {
        self.state
    }

    #[inline]
    pub fn lattice(&self) -> Option<&Lattice> {
        self.lattice.as_ref()
    }

    /// Replaces the noise parameters used by later `generate`/`modify_noise`
    /// calls. Legal in any state; it only affects future sampling.
    pub fn set_noise(&mut self, noise: NoiseSpec) {
        self.noise = noise;
    }

    fn require(
        &self,
        op: &'static str,
        expected: &'static str,
        allowed: &[GenState],
    ) -> Result<(), PipelineError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(PipelineError::InvalidState {
                op,
                expected,
                actual: self.state,
            })
        }
    }

    fn lattice_mut(&mut self, op: &'static str) -> Result<&mut Lattice, PipelineError> {
        let actual = self.state;
        self.lattice.as_mut().ok_or(PipelineError::InvalidState {
            op,
            expected: "a generated lattice",
            actual,
        })
    }

    /// Allocates the lattice and samples activation for every point.
    pub fn generate(&mut self) -> Result<(), PipelineError> {
        self.require(
            "generate",
            "ReadyToGenerate",
            &[GenState::ReadyToGenerate],
        )?;
        let t0 = Instant::now();
        let lattice = Lattice::generate(
            self.config.lattice_dims(),
            self.config.spacing(),
            self.config.origin(),
            self.field.as_ref(),
            &self.noise,
        );
        log::info!(
            target: "perf",
            "ms={} generate points={} active={}",
            t0.elapsed().as_millis(),
            lattice.verts().len(),
            lattice.active_count()
        );
        self.lattice = Some(lattice);
        self.state = GenState::VerticesGenerated;
        Ok(())
    }

    /// Re-evaluates activation against the current noise parameters without
    /// moving any point.
    pub fn modify_noise(&mut self) -> Result<(), PipelineError> {
        self.require(
            "modify_noise",
            "VerticesGenerated or VerticesModified",
            &[GenState::VerticesGenerated, GenState::VerticesModified],
        )?;
        let noise = self.noise.clone();
        let clip = self.config.behavior.clip_on_modify;
        // Field and lattice are both owned by self; split the borrows by
        // taking the lattice out for the duration of the pass.
        let mut lattice = self.lattice.take().ok_or(PipelineError::InvalidState {
            op: "modify_noise",
            expected: "a generated lattice",
            actual: self.state,
        })?;
        lattice.remodulate(self.field.as_ref(), &noise, clip);
        log::info!(
            target: "perf",
            "modify_noise active={}",
            lattice.active_count()
        );
        self.lattice = Some(lattice);
        self.state = GenState::VerticesModified;
        Ok(())
    }

    /// One classify pass: recomputes neighbor masks and validity, removing
    /// nothing. Exposed for manual stepping; `clean_to_fixpoint` is the
    /// normal path.
    pub fn classify_invalid(&mut self) -> Result<usize, PipelineError> {
        self.require(
            "classify_invalid",
            "VerticesGenerated, VerticesModified or VerticesCleaned",
            &[
                GenState::VerticesGenerated,
                GenState::VerticesModified,
                GenState::VerticesCleaned,
            ],
        )?;
        let lattice = self.lattice_mut("classify_invalid")?;
        let report = validity::classify(lattice);
        self.state = GenState::VerticesCleaned;
        Ok(report.active_invalid)
    }

    /// One apply pass deactivating whatever the last classify flagged.
    pub fn clean_invalid(&mut self) -> Result<usize, PipelineError> {
        self.require(
            "clean_invalid",
            "VerticesCleaned",
            &[GenState::VerticesCleaned],
        )?;
        let lattice = self.lattice_mut("clean_invalid")?;
        Ok(validity::clean(lattice))
    }

    /// Alternates classify and clean until no active-invalid point remains,
    /// then unlocks triangulation.
    pub fn clean_to_fixpoint(&mut self) -> Result<(), PipelineError> {
        self.require(
            "clean_to_fixpoint",
            "VerticesGenerated, VerticesModified or VerticesCleaned",
            &[
                GenState::VerticesGenerated,
                GenState::VerticesModified,
                GenState::VerticesCleaned,
            ],
        )?;
        let t0 = Instant::now();
        let lattice = self.lattice_mut("clean_to_fixpoint")?;
        let report = validity::clean_to_fixpoint(lattice);
        log::info!(
            target: "perf",
            "ms={} clean_to_fixpoint passes={} removed={} surface={}",
            t0.elapsed().as_millis(),
            report.passes,
            report.removed,
            lattice.surface_count()
        );
        self.state = GenState::ReadyToTriangulate;
        Ok(())
    }

    /// Builds every cell's six faces, runs the hidden-face culler, and
    /// collects the surviving triangles. The cell grid itself is discarded
    /// here; only the triangle list crosses into finalization.
    pub fn triangulate(&mut self) -> Result<(), PipelineError> {
        self.require(
            "triangulate",
            "ReadyToTriangulate",
            &[GenState::ReadyToTriangulate],
        )?;
        let t0 = Instant::now();
        let lattice = self.lattice_mut("triangulate")?;
        let mut grid = CellGrid::build(lattice);
        let culled = cull(&mut grid, lattice);
        let triangles = collect_triangles(&grid, lattice);
        log::info!(
            target: "perf",
            "ms={} triangulate faces={} skipped={} triangles={}",
            t0.elapsed().as_millis(),
            grid.faces().len(),
            culled.skipped,
            triangles.len() / 3
        );
        self.triangles = triangles;
        self.state = GenState::TrianglesGenerated;
        Ok(())
    }

    /// Compacts the surface vertices and remapped indices into dense buffers.
    pub fn finalize(&mut self) -> Result<&MeshBuffers, PipelineError> {
        self.require(
            "finalize",
            "TrianglesGenerated",
            &[GenState::TrianglesGenerated],
        )?;
        let triangles = std::mem::take(&mut self.triangles);
        let lattice = self.lattice_mut("finalize")?;
        let mesh = compact(lattice, &triangles);
        log::info!(
            target: "perf",
            "finalize vertices={} indices={}",
            mesh.positions.len(),
            mesh.indices.len()
        );
        self.state = GenState::Finalized;
        Ok(self.mesh.insert(mesh))
    }

    /// Clears all working arrays and returns to the initial state. With
    /// `destroy` false ("shed") the finalized mesh, if any, is handed back to
    /// the caller; with `destroy` true it is dropped with everything else.
    pub fn reset(&mut self, destroy: bool) -> Option<MeshBuffers> {
        let mesh = self.mesh.take();
        self.lattice = None;
        self.triangles.clear();
        self.state = GenState::ReadyToGenerate;
        if destroy { None } else { mesh }
    }
}

//! Cell and face assembly, hidden-face culling, and mesh compaction.
#![forbid(unsafe_code)]

mod cell;
mod cull;
mod direction;
mod emit;
mod face;

pub use cell::CellGrid;
pub use cull::{CullReport, cull};
pub use direction::Direction;
pub use emit::{MeshBuffers, collect_triangles, compact};
pub use face::Face;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use relief_pipeline::MeshBuffers;

/// Writes the compacted buffers as a Wavefront OBJ. Indices become 1-based
/// face records, three corners per line.
pub fn write_obj(path: &Path, mesh: &MeshBuffers) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "o relief")?;
    for p in &mesh.positions {
        writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for tri in mesh.indices.chunks_exact(3) {
        writeln!(w, "f {} {} {}", tri[0] + 1, tri[1] + 1, tri[2] + 1)?;
    }
    w.flush()
}

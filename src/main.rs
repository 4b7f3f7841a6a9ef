mod export;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use relief_field::SimplexField;
use relief_pipeline::{GeneratorConfig, MeshPipeline, load_config_from_path};

#[derive(Parser, Debug)]
#[command(
    name = "relief",
    about = "Generate a culled surface mesh from a noise-activated lattice"
)]
struct Args {
    /// TOML generation config; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output Wavefront OBJ path
    #[arg(short, long, default_value = "relief.obj")]
    out: PathBuf,

    /// Noise seed
    #[arg(short, long, default_value_t = 1337)]
    seed: i32,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => GeneratorConfig::default(),
    };
    log::info!(
        "generating {}x{}x{} lattice (seed {})",
        config.lattice.size_x,
        config.lattice.size_y,
        config.lattice.size_z,
        args.seed
    );
    let field = SimplexField::with_seed(args.seed);
    let mut pipeline = MeshPipeline::new(config, Box::new(field))?;

    pipeline.generate()?;
    pipeline.clean_to_fixpoint()?;
    pipeline.triangulate()?;
    let mesh = pipeline.finalize()?;

    export::write_obj(&args.out, mesh)?;
    println!(
        "wrote {} ({} vertices, {} triangles)",
        args.out.display(),
        mesh.positions.len(),
        mesh.triangle_count()
    );
    Ok(())
}

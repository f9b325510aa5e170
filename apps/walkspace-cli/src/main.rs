use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use walkspace_assets::{MeshId, MeshLibrary, parse, serialize};

#[derive(Parser)]
#[command(name = "walkspace-cli", about = "CLI tool for walkspace mesh files")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Parse one mesh file and report its dimensions
    Inspect {
        /// Mesh file to inspect
        path: PathBuf,
        /// Floats per vertex record
        #[arg(short, long, default_value = "5")]
        stride: usize,
    },
    /// Load every .mesh file in a directory and summarize the registry
    Scan {
        /// Directory of .mesh files
        dir: PathBuf,
        /// Write a JSON manifest of the scanned registry
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Rewrite a mesh file in canonical text form
    Normalize {
        /// Mesh file to normalize
        path: PathBuf,
        /// Floats per vertex row in the output
        #[arg(short, long, default_value = "5")]
        stride: usize,
        /// Destination file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("walkspace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("assets: {}", walkspace_assets::crate_info());
            println!("camera: {}", walkspace_camera::crate_info());
            println!("input: {}", walkspace_input::crate_info());
        }
        Commands::Inspect { path, stride } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            let data = parse(&text).with_context(|| format!("parse {}", path.display()))?;

            let verts = data.vertex_count(stride);
            println!("Mesh: {}", path.display());
            println!("  id: {}", MeshId::of(&data));
            match verts {
                Some(count) => {
                    println!(
                        "  vertices: {count} ({} floats at stride {stride})",
                        data.vertices.len()
                    );
                }
                None => {
                    println!(
                        "  vertices: {} floats, which do not divide by stride {stride}",
                        data.vertices.len()
                    );
                }
            }
            println!("  triangles: {}", data.triangle_count());

            match (data.max_index(), verts) {
                (Some(max), Some(count)) if (max as usize) < count => {
                    println!("  indices: OK (max {max} of {count} vertices)");
                }
                (Some(max), Some(count)) => {
                    println!("  indices: OUT OF BOUNDS (max {max}, only {count} vertices)");
                }
                (Some(max), None) => println!("  indices: max {max}"),
                (None, _) => println!("  indices: none"),
            }
        }
        Commands::Scan { dir, manifest } => {
            let mut library = MeshLibrary::new();
            library
                .load_dir(&dir)
                .with_context(|| format!("scan {}", dir.display()))?;

            println!(
                "Scanned {}: {} distinct mesh(es), {} name(s)",
                dir.display(),
                library.len(),
                library.names().count()
            );
            for (name, id) in library.names() {
                if let Some(data) = library.get(id) {
                    println!(
                        "  {name}: id={id}, floats={}, indices={}",
                        data.vertices.len(),
                        data.indices.len()
                    );
                }
            }

            if let Some(manifest_path) = manifest {
                library
                    .save_manifest(&manifest_path)
                    .with_context(|| format!("write {}", manifest_path.display()))?;
                println!("Manifest written to {}", manifest_path.display());
            }
        }
        Commands::Normalize {
            path,
            stride,
            output,
        } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            let data = parse(&text).with_context(|| format!("parse {}", path.display()))?;
            let canonical = serialize(&data, stride);
            match output {
                Some(out) => {
                    std::fs::write(&out, canonical)
                        .with_context(|| format!("write {}", out.display()))?;
                    println!("Normalized {} -> {}", path.display(), out.display());
                }
                None => print!("{canonical}"),
            }
        }
    }

    Ok(())
}

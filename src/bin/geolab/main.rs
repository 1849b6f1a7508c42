//! Geolab CLI - inspect meshes and export render buffers.
//!
//! Usage: geolab <COMMAND> [OPTIONS] <INPUT>
//!
//! Set `RUST_LOG=debug` for a trace of each processing stage.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use geolab::algo::{compute_boundaries, compute_halfedge_difference_and_face_area, FlattenOptions};
use geolab::io::{self, LoadOptions};
use geolab::mesh::HalfEdgeMesh;
use geolab::snapshot::MeshSnapshot;

#[derive(Parser)]
#[command(name = "geolab")]
#[command(author, version, about = "Half-edge mesh kernel CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        #[command(flatten)]
        load: LoadArgs,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// List boundary loops, longest first
    Boundaries {
        #[command(flatten)]
        load: LoadArgs,
    },

    /// Write packed vertex and index buffers
    Export {
        #[command(flatten)]
        load: LoadArgs,

        /// Output prefix; writes <PREFIX>.vbo and <PREFIX>.ibo
        prefix: PathBuf,
    },
}

#[derive(Args)]
struct LoadArgs {
    /// Input mesh file (.obj, .stl, .ply)
    input: PathBuf,

    /// Keep the original coordinates
    #[arg(long, conflicts_with = "extent")]
    raw: bool,

    /// Half width of the normalization cube
    #[arg(long, default_value = "1.0")]
    extent: f64,
}

impl LoadArgs {
    fn load(&self) -> Result<HalfEdgeMesh, Box<dyn std::error::Error>> {
        let options = if self.raw {
            LoadOptions::raw()
        } else {
            LoadOptions::default().with_extent(self.extent)?
        };
        Ok(io::load_with_options(&self.input, &options)?)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { load, sequential } => cmd_info(&load, sequential)?,
        Commands::Boundaries { load } => cmd_boundaries(&load)?,
        Commands::Export { load, prefix } => cmd_export(&load, &prefix)?,
    }
    Ok(())
}

fn cmd_info(load: &LoadArgs, sequential: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = load.load()?;

    println!("File: {}", load.input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());
    println!("Edges: {}", mesh.num_edges());
    println!("Half-edges: {}", mesh.num_halfedges());

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    let options = FlattenOptions::default().with_parallel(!sequential);
    compute_halfedge_difference_and_face_area(&mut mesh, &options);
    if let Some(areas) = mesh.prop_face_area() {
        let (min_area, max_area) = areas
            .iter()
            .fold((f64::MAX, 0.0_f64), |(lo, hi), (_, &a)| (lo.min(a), hi.max(a)));
        println!("Surface area: {:.6}", areas.sum());
        println!("Face area range: [{:.6}, {:.6}]", min_area, max_area);
    }

    let loops = compute_boundaries(&mesh);
    if loops.is_empty() {
        println!("Topology: Closed (no boundary)");
    } else {
        let edges: usize = loops.iter().map(|l| l.length).sum();
        println!(
            "Topology: Open ({} boundary loops, {} boundary edges, longest {})",
            loops.len(),
            edges,
            loops[0].length
        );
    }

    Ok(())
}

fn cmd_boundaries(load: &LoadArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load.load()?;
    let loops = compute_boundaries(&mesh);

    if loops.is_empty() {
        println!("No boundary loops");
        return Ok(());
    }

    for (i, hole) in loops.iter().enumerate() {
        println!(
            "Loop {}: {} edges, perimeter {:.6}, starts at vertex {}",
            i,
            hole.length,
            hole.perimeter(&mesh),
            mesh.origin(hole.start).index()
        );
    }

    Ok(())
}

fn cmd_export(load: &LoadArgs, prefix: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load.load()?;
    let snapshot = MeshSnapshot::capture(&mesh);

    let vbo = prefix.with_extension("vbo");
    let ibo = prefix.with_extension("ibo");
    std::fs::write(&vbo, snapshot.vertex_bytes())?;
    std::fs::write(&ibo, snapshot.index_bytes())?;

    println!(
        "Wrote {} vertices to {} and {} triangles to {}",
        snapshot.vertices.len(),
        vbo.display(),
        snapshot.num_triangles(),
        ibo.display()
    );

    Ok(())
}

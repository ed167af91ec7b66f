//! femsurf CLI - surface extraction diagnostics.
//!
//! Usage: femsurf <COMMAND> [OPTIONS]
//!
//! Run `femsurf --help` for available commands.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::info;

use femsurf::mesh::{structured_block, BlockKind, FemMesh};
use femsurf::progress::Progress;
use femsurf::surface::{rebuild_with_progress, DedupStrategy, SurfaceMesh, SurfaceOptions};

#[derive(Parser)]
#[command(name = "femsurf")]
#[command(author, version, about = "FE mesh surface extraction CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the surface of a structured block of elements
    Block {
        /// Element type
        #[arg(short, long, value_enum, default_value = "hex8")]
        kind: Kind,

        /// Number of cells along each axis
        #[arg(short, long, default_value = "10")]
        cells: usize,

        /// Keep faces shared by two elements
        #[arg(long)]
        show_inner: bool,

        /// Compare all face pairs instead of bucketing by signature
        #[arg(long)]
        pairwise: bool,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Kind {
    /// 8-node hexahedra
    Hex8,
    /// 4-node tetrahedra, six per cell
    Tet4,
    /// 10-node tetrahedra, six per cell
    Tet10,
}

impl From<Kind> for BlockKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Hex8 => BlockKind::Hexahedra,
            Kind::Tet4 => BlockKind::Tetrahedra,
            Kind::Tet10 => BlockKind::QuadraticTetrahedra,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Block {
            kind,
            cells,
            show_inner,
            pairwise,
            sequential,
        } => {
            cmd_block(kind, cells, show_inner, pairwise, sequential)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let raw_percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Monotonic: never redraw a smaller value
        let percent = max_percent.fetch_max(raw_percent, Ordering::Relaxed).max(raw_percent);

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        // Pad so a shorter message overwrites a longer one
        eprint!("\r[{}{}] {:3}% {:<28}", bar, space, percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_block(
    kind: Kind,
    cells: usize,
    show_inner: bool,
    pairwise: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mesh: FemMesh = structured_block(kind.into(), cells, cells, cells)?;
    info!("generated block in {:.2?}", start.elapsed());

    println!(
        "Mesh: {} nodes, {} volume elements",
        mesh.num_nodes(),
        mesh.num_volumes()
    );

    let options = SurfaceOptions::default()
        .with_show_inner(show_inner)
        .with_dedup(if pairwise {
            DedupStrategy::Pairwise
        } else {
            DedupStrategy::Bucketed
        })
        .with_parallel(!sequential);

    let mode = if sequential { "sequential" } else { "parallel" };
    let dedup = if pairwise { "pairwise" } else { "bucketed" };
    println!("Extracting surface ({}, {})...", dedup, mode);

    let progress = create_progress();
    let mut surface: SurfaceMesh = SurfaceMesh::new();
    let start = Instant::now();
    let outcome = rebuild_with_progress(&mesh, &options, &mut surface, &progress)?;
    let elapsed = start.elapsed();

    match outcome.stats() {
        Some(stats) => {
            println!("Faces: {} ({} hidden)", stats.faces, stats.hidden_faces);
            println!("Vertices: {}", stats.vertices);
            println!("Triangles: {}", stats.triangles);
            println!("Indices: {}", surface.num_indices());
        }
        None => println!("Mesh is empty, nothing extracted"),
    }

    if let Some((min, max)) = surface.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }
    if !surface.is_valid() {
        return Err("extracted index stream is malformed".into());
    }
    println!("Elapsed: {:.2?}", elapsed);

    Ok(())
}

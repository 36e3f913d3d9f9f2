use std::fs::{self, File};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use itertools::Itertools;
use memmap2::Mmap;
use rootcause::prelude::*;
use tracing_subscriber::EnvFilter;

use scenemesh::mesh::{MeshRecord, RendererHint, decode_mesh};
use scenemesh::scene::{SceneDescription, SceneMeshes, decompress_blob, load_scene_meshes};

/// Inspect chunked binary scene meshes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides this.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a single mesh slice out of a blob
    Inspect {
        /// Mesh blob, raw or gzip-compressed
        blob: PathBuf,
        /// Byte offset of the mesh within the decompressed blob
        #[clap(long, default_value_t = 0)]
        offset: usize,
        /// Byte length of the mesh. Defaults to the rest of the blob.
        #[clap(long)]
        length: Option<usize>,
        /// Lightmap scale/offset as `sx,sy,ox,oy`
        #[clap(long, value_parser = parse_scale_offset)]
        lightmap: Option<[f32; 4]>,
        /// Print the full decoded record as JSON
        #[clap(long)]
        json: bool,
    },
    /// Decode every mesh referenced by a scene description
    Scene {
        /// Scene description JSON
        scene: PathBuf,
        /// Mesh blob, raw or gzip-compressed
        blob: PathBuf,
        /// Print loaded geometry as JSON
        #[clap(long)]
        json: bool,
    },
}

fn parse_scale_offset(value: &str) -> Result<[f32; 4], String> {
    let parts: Vec<f32> = value
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<_, _>>()?;
    <[f32; 4]>::try_from(parts).map_err(|parts| {
        format!("expected 4 comma-separated values, got {}", parts.len())
    })
}

fn map_file(path: &Path) -> Result<Mmap, Report> {
    let file = File::open(path).context("failed to open blob")?;
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(mmap)
}

fn print_record(record: &MeshRecord) {
    let name = if record.name.is_empty() {
        "<unnamed>"
    } else {
        record.name.as_str()
    };
    println!("mesh {name}");
    println!("  vertices: {}", record.vertex_count);
    let channels = record
        .uv
        .iter()
        .enumerate()
        .filter_map(|(channel, set)| {
            set.as_ref()
                .map(|set| format!("uv{channel}x{}", set.components))
        })
        .join(", ");
    println!("  uv channels: [{channels}]");
    println!("  indices: {}", record.indexes.len());
    for (i, range) in record.submeshes.iter().enumerate() {
        println!(
            "  submesh {i}: start={} count={} topology={}",
            range.start, range.count, range.topology
        );
    }
}

fn print_scene(scene: &SceneDescription, meshes: &SceneMeshes) {
    for mesh in meshes.loaded() {
        let groups = mesh
            .geometry
            .groups
            .iter()
            .map(|g| format!("{}+{}", g.start, g.count))
            .join(" ");
        println!(
            "[{}] {} ({:?}): {} indices, groups [{}]",
            mesh.node_index,
            mesh.node_name,
            mesh.kind,
            mesh.geometry.index.len(),
            groups
        );
    }
    for failure in &meshes.failures {
        println!(
            "[{}] {} FAILED: {}",
            failure.node_index, failure.node_name, failure.error
        );
    }
    println!(
        "{} nodes, {} meshes loaded, {} failed",
        scene.nodes.len(),
        meshes.loaded().count(),
        meshes.failures.len()
    );
}

fn main() -> Result<(), Report> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Inspect {
            blob,
            offset,
            length,
            lightmap,
            json,
        } => {
            let mmap = map_file(&blob)?;
            let data = decompress_blob(&mmap).context("failed to read mesh blob")?;
            let length = length.unwrap_or_else(|| data.len().saturating_sub(offset));
            let hint = lightmap.map(RendererHint::with_lightmap);

            let record = decode_mesh(&data, offset, length, hint.as_ref())
                .context("failed to decode mesh")?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&record).context("failed to serialize mesh")?
                );
            } else {
                print_record(&record);
            }
        }
        Command::Scene { scene, blob, json } => {
            let scene_json = fs::read(&scene).context("failed to read scene description")?;
            let description = SceneDescription::from_json(&scene_json)
                .context("failed to parse scene description")?;

            let mmap = map_file(&blob)?;
            let data = decompress_blob(&mmap).context("failed to read mesh blob")?;
            let meshes = load_scene_meshes(&description, &data);

            if json {
                let geometry: Vec<_> = meshes.loaded().map(|m| &m.geometry).collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&geometry)
                        .context("failed to serialize geometry")?
                );
            } else {
                print_scene(&description, &meshes);
            }
        }
    }

    Ok(())
}

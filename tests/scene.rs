#![cfg(feature = "json")]

mod common;

use std::io::Write;

use common::MeshWriter;
use flate2::Compression;
use flate2::write::GzEncoder;
use scenemesh::MeshError;
use scenemesh::mesh::AttributeSemantic;
use scenemesh::scene::{MeshKind, SceneDescription, decompress_blob, load_scene_meshes};

const TRIANGLE: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

struct Fixture {
    blob: Vec<u8>,
    json: String,
}

fn fixture() -> Fixture {
    let floor = MeshWriter::new(3, 1, &TRIANGLE)
        .name("floor")
        .uv(0, 2, &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0])
        .submesh(0, 1, &[0, 1, 2])
        .finish();
    let broken = MeshWriter::new(3, 1, &TRIANGLE).u8(200).finish();
    let collider = MeshWriter::new(3, 1, &TRIANGLE)
        .submesh(0, 2, &[2, 1, 0])
        .finish();

    let mut blob = Vec::new();
    let floor_at = blob.len();
    blob.extend_from_slice(&floor);
    let broken_at = blob.len();
    blob.extend_from_slice(&broken);
    let collider_at = blob.len();
    blob.extend_from_slice(&collider);

    let json = format!(
        r#"{{
            "meshUrl": "scene.bin",
            "nodes": [
                {{
                    "name": "Floor",
                    "trans": {{"position": {{"x": 4, "y": 5, "z": 6}}}},
                    "meshrenderer": [{{
                        "materialGuids": ["tiles"],
                        "lightmapscaleoffset": {{"x": 0.5, "y": 0.5, "z": 0.25, "w": 0.0}}
                    }}],
                    "meshBufferOffset": {floor_at},
                    "meshBufferLength": {floor_len}
                }},
                {{
                    "name": "Broken",
                    "meshrenderer": [{{"materialGuids": []}}],
                    "meshBufferOffset": {broken_at},
                    "meshBufferLength": {broken_len}
                }},
                {{
                    "name": "Sign",
                    "text": [{{"text": "exit"}}]
                }},
                {{
                    "name": "Ground",
                    "tag": "Walkable",
                    "meshcollider": [{{}}],
                    "meshBufferOffset": {collider_at},
                    "meshBufferLength": {collider_len}
                }},
                {{
                    "name": "Orphan",
                    "meshrenderer": [{{}}]
                }}
            ]
        }}"#,
        floor_len = floor.len(),
        broken_len = broken.len(),
        collider_len = collider.len(),
    );

    Fixture { blob, json }
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn failed_nodes_are_skipped_and_reported() {
    let Fixture { blob, json } = fixture();
    let scene = SceneDescription::from_json(json.as_bytes()).unwrap();
    let meshes = load_scene_meshes(&scene, &blob);

    assert_eq!(meshes.meshes.len(), 5);
    let loaded: Vec<usize> = meshes.loaded().map(|m| m.node_index).collect();
    assert_eq!(loaded, vec![0, 3]);

    let failed: Vec<(usize, &str)> = meshes
        .failures
        .iter()
        .map(|f| (f.node_index, f.node_name.as_str()))
        .collect();
    assert_eq!(failed, vec![(1, "Broken"), (4, "Orphan")]);
    assert!(matches!(
        meshes.failures[0].error,
        MeshError::UnknownChunkTag { tag: 200, .. }
    ));
    assert!(matches!(meshes.failures[1].error, MeshError::MissingSlice));
    assert!(meshes.get(2).is_none());
}

#[test]
fn rendered_node_uses_its_renderer_hint() {
    let Fixture { blob, json } = fixture();
    let scene = SceneDescription::from_json(json.as_bytes()).unwrap();
    let meshes = load_scene_meshes(&scene, &blob);

    let floor = meshes.get(0).unwrap();
    assert_eq!(floor.kind, MeshKind::Rendered);
    assert_eq!(floor.node_name, "Floor");
    assert_eq!(floor.geometry.name, "floor");
    assert_eq!(floor.material_guids, vec!["tiles".to_string()]);
    assert_eq!(floor.transform.unwrap().position.x, 4.0);

    let lightmap = floor
        .geometry
        .attribute(AttributeSemantic::TexCoord1)
        .unwrap();
    assert_eq!(lightmap.data, vec![0.25, 0.0, 0.75, 0.0, 0.25, 0.5]);
}

#[test]
fn collider_node_decodes_without_hint() {
    let Fixture { blob, json } = fixture();
    let scene = SceneDescription::from_json(json.as_bytes()).unwrap();
    let meshes = load_scene_meshes(&scene, &blob);

    let ground = meshes.get(3).unwrap();
    assert_eq!(ground.kind, MeshKind::Collider);
    assert_eq!(ground.tag.as_deref(), Some("Walkable"));
    assert!(ground.material_guids.is_empty());
    assert_eq!(ground.geometry.index, vec![2, 1, 0]);
}

#[test]
fn gzip_blob_round_trips_through_loader() {
    let Fixture { blob, json } = fixture();
    let compressed = gzip(&blob);
    let raw = decompress_blob(&compressed).unwrap();
    assert_eq!(&*raw, blob.as_slice());

    let scene = SceneDescription::from_json(json.as_bytes()).unwrap();
    let meshes = load_scene_meshes(&scene, &raw);
    assert_eq!(meshes.loaded().count(), 2);
}

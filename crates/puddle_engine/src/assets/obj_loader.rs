//! OBJ file loader for 3D models

use std::fs;
use std::path::{Path, PathBuf};

use super::{AssetError, AssetLoader, MeshData, Vertex};

/// Loads Wavefront OBJ meshes relative to an asset root
#[derive(Debug, Clone)]
pub struct ObjLoader {
    root: PathBuf,
}

impl ObjLoader {
    /// Create a loader resolving paths against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory asset paths are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parse OBJ source text
    ///
    /// Supports `v`, `vn`, `vt` and polygonal `f` records (fan-triangulated);
    /// everything else is ignored. `path` is only used in error messages.
    pub fn parse(path: &str, source: &str) -> Result<MeshData, AssetError> {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();
        let mut tex_coords: Vec<[f32; 2]> = Vec::new();
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for (number, line) in source.lines().enumerate() {
            let line_number = number + 1;
            let parse_error = |message: &str| AssetError::Parse {
                path: path.to_string(),
                line: line_number,
                message: message.to_string(),
            };

            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("v") => {
                    positions.push(parse_floats(&mut parts).ok_or_else(|| parse_error("invalid vertex"))?);
                }
                Some("vn") => {
                    normals.push(parse_floats(&mut parts).ok_or_else(|| parse_error("invalid normal"))?);
                }
                Some("vt") => {
                    let tex_coord = parse_floats(&mut parts)
                        .ok_or_else(|| parse_error("invalid texture coordinate"))?;
                    tex_coords.push(tex_coord);
                }
                Some("f") => {
                    let mut face = Vec::new();
                    for corner in parts {
                        let mut refs = corner.split('/');
                        let position = refs
                            .next()
                            .and_then(|index| resolve_index(index, positions.len()))
                            .and_then(|index| positions.get(index))
                            .ok_or_else(|| parse_error("face references a missing vertex"))?;
                        let tex_coord = refs
                            .next()
                            .and_then(|index| resolve_index(index, tex_coords.len()))
                            .and_then(|index| tex_coords.get(index))
                            .copied()
                            .unwrap_or([0.0, 0.0]);
                        let normal = refs
                            .next()
                            .and_then(|index| resolve_index(index, normals.len()))
                            .and_then(|index| normals.get(index))
                            .copied()
                            .unwrap_or([0.0, 1.0, 0.0]);

                        face.push(vertices.len() as u32);
                        vertices.push(Vertex {
                            position: *position,
                            normal,
                            tex_coord,
                        });
                    }

                    if face.len() < 3 {
                        return Err(parse_error("face needs at least three corners"));
                    }
                    for i in 1..face.len() - 1 {
                        indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
                    }
                }
                _ => {}
            }
        }

        if vertices.is_empty() {
            return Err(AssetError::InvalidFormat {
                path: path.to_string(),
                message: "no faces found".to_string(),
            });
        }

        Ok(MeshData::new(vertices, indices))
    }
}

impl AssetLoader for ObjLoader {
    type Output = MeshData;

    fn load(&mut self, path: &str) -> Result<MeshData, AssetError> {
        let full_path = self.root.join(path);
        if !full_path.exists() {
            return Err(AssetError::NotFound(full_path.display().to_string()));
        }
        let source = fs::read_to_string(&full_path)?;
        let mesh = Self::parse(path, &source)?;
        log::debug!(
            "Loaded {} ({} vertices, {} triangles)",
            full_path.display(),
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

fn parse_floats<'a, I, const N: usize>(parts: &mut I) -> Option<[f32; N]>
where
    I: Iterator<Item = &'a str>,
{
    let mut values = [0.0; N];
    for value in &mut values {
        *value = parts.next()?.parse().ok()?;
    }
    Some(values)
}

/// OBJ indices are 1-based; negative indices count back from the end
fn resolve_index(raw: &str, len: usize) -> Option<usize> {
    let index: i64 = raw.parse().ok()?;
    match index {
        0 => None,
        i if i > 0 => usize::try_from(i - 1).ok(),
        i => len.checked_sub(usize::try_from(-i).ok()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 0 1
v 0 0 1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 1 0
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn test_parse_quad_is_fan_triangulated() {
        let mesh = ObjLoader::parse("quad.obj", QUAD).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertices[2].tex_coord, [1.0, 1.0]);
        assert_eq!(mesh.vertices[3].position, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_negative_indices_count_from_end() {
        let mesh = ObjLoader::parse("tri.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_malformed_vertex_reports_line() {
        let error = ObjLoader::parse("bad.obj", "v 0 0 0\nv 1 nope 0\n").unwrap_err();
        assert!(matches!(error, AssetError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_vertex_reference_fails() {
        assert!(ObjLoader::parse("bad.obj", "v 0 0 0\nf 1 2 3\n").is_err());
    }

    #[test]
    fn test_empty_source_is_invalid() {
        assert!(matches!(
            ObjLoader::parse("empty.obj", "# nothing here\n"),
            Err(AssetError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let mut loader = ObjLoader::new(std::env::temp_dir().join("puddle_engine_missing_assets"));
        assert!(matches!(loader.load("nope.obj"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let root = std::env::temp_dir().join(format!("puddle_engine_obj_{}", std::process::id()));
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("quad.obj"), QUAD).unwrap();

        let mut loader = ObjLoader::new(&root);
        let mesh = loader.load("quad.obj").unwrap();
        assert_eq!(mesh.triangle_count(), 2);

        fs::remove_dir_all(&root).unwrap();
    }
}

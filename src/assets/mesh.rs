//! Mesh resources
//!
//! A mesh resource is geometry plus the *recipe* that produced it: either an
//! OBJ file path or a list of primitive build parameters. Only the recipe is
//! serialized into the asset manifest; geometry is reloaded or regenerated on
//! manifest load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::{self, GeometryData};

use super::AssetError;

/// One primitive shape contributing to a generated mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PrimitiveParam {
    Plane {
        size: [f32; 2],
        /// Texture repeats across the full plane
        uv_tiling: [f32; 2],
    },
    Cube {
        center: [f32; 3],
        size: [f32; 3],
    },
    IcoSphere {
        center: [f32; 3],
        radius: f32,
        tessellation: u32,
    },
    Cylinder {
        radius: f32,
        height: f32,
        segments: u32,
    },
}

impl PrimitiveParam {
    /// A flat plane with untiled UVs
    pub fn plane(size: [f32; 2]) -> Self {
        PrimitiveParam::Plane {
            size,
            uv_tiling: [1.0, 1.0],
        }
    }

    fn build(&self) -> GeometryData {
        match *self {
            PrimitiveParam::Plane { size, uv_tiling } => {
                geometry::generate_plane(size[0], size[1], 1, 1, uv_tiling)
            }
            PrimitiveParam::Cube { center, size } => {
                let mut data = geometry::generate_cube(size);
                translate(&mut data, center);
                data
            }
            PrimitiveParam::IcoSphere {
                center,
                radius,
                tessellation,
            } => {
                let mut data = geometry::generate_ico_sphere(tessellation);
                for p in &mut data.positions {
                    for axis in 0..3 {
                        p[axis] = p[axis] * radius + center[axis];
                    }
                }
                data
            }
            PrimitiveParam::Cylinder {
                radius,
                height,
                segments,
            } => geometry::generate_cylinder(radius, height, segments),
        }
    }
}

fn translate(data: &mut GeometryData, offset: [f32; 3]) {
    for p in &mut data.positions {
        p[0] += offset[0];
        p[1] += offset[1];
        p[2] += offset[2];
    }
}

/// Where a mesh's geometry comes from; this is what the manifest records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MeshSource {
    /// Loaded from an OBJ file on disk
    Obj { path: PathBuf },
    /// Built from a list of primitive parameters
    Primitives { params: Vec<PrimitiveParam> },
}

/// Geometry plus the recipe to rebuild it
#[derive(Debug, Clone)]
pub struct MeshResource {
    source: MeshSource,
    geometry: Option<GeometryData>,
}

impl Default for MeshResource {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshResource {
    /// Creates an empty generated mesh; add parameters then call [`generate`].
    ///
    /// [`generate`]: MeshResource::generate
    pub fn new() -> Self {
        Self {
            source: MeshSource::Primitives { params: Vec::new() },
            geometry: None,
        }
    }

    /// Loads a mesh from an OBJ file, triangulated with a single index
    /// stream. Normals are taken from the file when present and averaged
    /// from face normals otherwise.
    pub fn from_obj(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|source| AssetError::ObjLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let mut geometry = GeometryData::new();
        for model in &models {
            let mesh = &model.mesh;

            let mut part = GeometryData::new();
            part.positions = mesh
                .positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect();
            part.tex_coords = if mesh.texcoords.len() == part.positions.len() * 2 {
                mesh.texcoords.chunks_exact(2).map(|t| [t[0], t[1]]).collect()
            } else {
                vec![[0.0, 0.0]; part.positions.len()]
            };
            part.normals = if mesh.normals.len() == mesh.positions.len() {
                mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect()
            } else {
                geometry::averaged_normals(&part.positions, &mesh.indices)
            };
            part.indices = mesh.indices.clone();

            geometry.append(part);
        }

        log::debug!(
            "loaded OBJ '{}': {} vertices, {} triangles",
            path.display(),
            geometry.vertex_count(),
            geometry.triangle_count()
        );

        Ok(Self {
            source: MeshSource::Obj {
                path: path.to_path_buf(),
            },
            geometry: Some(geometry),
        })
    }

    /// Rebuilds a mesh from a manifest recipe
    pub fn from_source(source: MeshSource) -> Result<Self, AssetError> {
        match source {
            MeshSource::Obj { path } => Self::from_obj(path),
            MeshSource::Primitives { params } => {
                let mut mesh = Self {
                    source: MeshSource::Primitives { params },
                    geometry: None,
                };
                mesh.generate();
                Ok(mesh)
            }
        }
    }

    /// Appends a primitive build parameter. Only valid for generated meshes;
    /// parameters added to an OBJ-backed mesh are ignored.
    pub fn add_param(&mut self, param: PrimitiveParam) -> &mut Self {
        if let MeshSource::Primitives { params } = &mut self.source {
            params.push(param);
            self.geometry = None;
        } else {
            log::warn!("add_param called on an OBJ-backed mesh; ignored");
        }
        self
    }

    /// Realizes the primitive parameters into geometry
    pub fn generate(&mut self) -> &mut Self {
        if let MeshSource::Primitives { params } = &self.source {
            let mut data = GeometryData::new();
            for param in params {
                data.append(param.build());
            }
            self.geometry = Some(data);
        }
        self
    }

    /// The recipe this mesh was built from
    pub fn source(&self) -> &MeshSource {
        &self.source
    }

    /// The realized geometry
    pub fn geometry(&self) -> Result<&GeometryData, AssetError> {
        self.geometry.as_ref().ok_or(AssetError::EmptyMesh)
    }

    /// Axis-aligned bounds of the geometry, if generated and non-empty
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        self.geometry.as_ref().and_then(|g| g.bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn generated_mesh_combines_params() {
        let mut mesh = MeshResource::new();
        mesh.add_param(PrimitiveParam::plane([2.0, 2.0]))
            .add_param(PrimitiveParam::Cube {
                center: [0.0, 0.0, 1.0],
                size: [1.0, 1.0, 1.0],
            })
            .generate();

        let geometry = mesh.geometry().unwrap();
        assert_eq!(geometry.vertex_count(), 4 + 24);
        assert_eq!(geometry.triangle_count(), 2 + 12);
    }

    #[test]
    fn geometry_before_generate_is_an_error() {
        let mut mesh = MeshResource::new();
        mesh.add_param(PrimitiveParam::plane([1.0, 1.0]));
        assert!(matches!(mesh.geometry(), Err(AssetError::EmptyMesh)));
    }

    #[test]
    fn sphere_param_applies_center_and_radius() {
        let mut mesh = MeshResource::new();
        mesh.add_param(PrimitiveParam::IcoSphere {
            center: [1.0, 2.0, 3.0],
            radius: 0.5,
            tessellation: 1,
        })
        .generate();

        let (min, max) = mesh.bounds().unwrap();
        for axis in 0..3 {
            let center = [1.0, 2.0, 3.0][axis];
            assert!((min[axis] - (center - 0.5)).abs() < 1e-4);
            assert!((max[axis] - (center + 0.5)).abs() < 1e-4);
        }
    }

    #[test]
    fn obj_load_computes_missing_normals() {
        let path = std::env::temp_dir().join("haar_mesh_test_triangle.obj");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "o Triangle").unwrap();
        writeln!(file, "v 0.0 0.0 0.0").unwrap();
        writeln!(file, "v 1.0 0.0 0.0").unwrap();
        writeln!(file, "v 0.0 1.0 0.0").unwrap();
        writeln!(file, "f 1 2 3").unwrap();
        drop(file);

        let mesh = MeshResource::from_obj(&path).unwrap();
        let geometry = mesh.geometry().unwrap();
        assert_eq!(geometry.vertex_count(), 3);
        assert_eq!(geometry.triangle_count(), 1);
        // Counter-clockwise in XY means the averaged normal faces +Z
        assert!((geometry.normals[0][2] - 1.0).abs() < 1e-5);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_obj_file_is_an_error() {
        let result = MeshResource::from_obj("does/not/exist.obj");
        assert!(matches!(result, Err(AssetError::ObjLoad { .. })));
    }

    #[test]
    fn source_round_trips_through_json() {
        let mut mesh = MeshResource::new();
        mesh.add_param(PrimitiveParam::Cylinder {
            radius: 3.0,
            height: 1.0,
            segments: 16,
        })
        .generate();

        let json = serde_json::to_string(mesh.source()).unwrap();
        let source: MeshSource = serde_json::from_str(&json).unwrap();
        let rebuilt = MeshResource::from_source(source).unwrap();

        assert_eq!(
            rebuilt.geometry().unwrap().vertex_count(),
            mesh.geometry().unwrap().vertex_count()
        );
    }
}

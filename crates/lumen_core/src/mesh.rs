//! Triangle mesh geometry and OBJ loading.
//!
//! Meshes are read from the wavefront subset used by the Cornell box assets:
//! `v x y z` vertex lines and `f i j k` face lines with 1-based indices.
//! Parsing goes through `tobj`, which also triangulates polygons and turns
//! the indices 0-based.

use std::io::BufReader;
use std::path::Path;

use lumen_math::Vec3;
use thiserror::Error;

/// Errors that can occur while loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("No faces found in OBJ data")]
    Empty,

    #[error("Face {face} references vertex {index}, but the mesh has {count} vertices")]
    InvalidIndex {
        face: usize,
        index: usize,
        count: usize,
    },
}

/// Result type for mesh loading.
pub type MeshResult<T> = Result<T, MeshError>;

/// An indexed triangle mesh: a shared vertex array plus index triples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    pub positions: Vec<Vec3>,

    /// Triangles as 0-based indices into `positions`
    pub faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Create a mesh from positions and faces, checking every index.
    pub fn new(positions: Vec<Vec3>, faces: Vec<[usize; 3]>) -> MeshResult<Self> {
        let mesh = Self { positions, faces };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Check that the mesh has faces and every face index is in range.
    pub fn validate(&self) -> MeshResult<()> {
        if self.faces.is_empty() {
            return Err(MeshError::Empty);
        }

        let count = self.positions.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= count) {
                return Err(MeshError::InvalidIndex { face, index, count });
            }
        }

        Ok(())
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Vertex positions of one face.
    #[inline]
    pub fn triangle(&self, face: usize) -> [Vec3; 3] {
        let [a, b, c] = self.faces[face];
        [self.positions[a], self.positions[b], self.positions[c]]
    }

    /// Iterate over the vertex positions of every face.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        (0..self.faces.len()).map(move |face| self.triangle(face))
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Load a mesh from an OBJ file.
///
/// Every object in the file is merged into one mesh.
pub fn load_obj<P: AsRef<Path>>(path: P) -> MeshResult<Mesh> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let mesh = merge_models(models)?;

    log::debug!(
        "Loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Parse a mesh from OBJ text.
///
/// Material libraries are ignored.
pub fn parse_obj(source: &str) -> MeshResult<Mesh> {
    let mut reader = BufReader::new(source.as_bytes());
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    merge_models(models)
}

fn merge_models(models: Vec<tobj::Model>) -> MeshResult<Mesh> {
    let mut positions = Vec::new();
    let mut faces = Vec::new();

    for model in models {
        let base = positions.len();

        positions.extend(
            model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );

        faces.extend(model.mesh.indices.chunks_exact(3).map(|f| {
            [
                base + f[0] as usize,
                base + f[1] as usize,
                base + f[2] as usize,
            ]
        }));
    }

    Mesh::new(positions, faces)
}

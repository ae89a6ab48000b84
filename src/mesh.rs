//! Triangle mesh storage, OBJ loading, and vertex adjacency.
//!
//! # Winding contract
//!
//! Triangles index the vertex list in clockwise order as written in the mesh
//! file; [`crate::geometry::surface_normal`] relies on that order for the
//! sign of its result, so the loader preserves indices exactly as authored.

use std::fmt;
use std::path::Path;

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// Three indices into a mesh's vertex list, in clockwise winding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Triangle {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

/// Error loading a mesh from disk.
#[derive(Debug)]
pub enum LoadError {
    /// The OBJ file could not be read or parsed.
    Obj(tobj::LoadError),
    /// The file parsed but contained no triangles.
    Empty(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "failed reading polygon data file: {e}"),
            LoadError::Empty(path) => write!(f, "no triangles in polygon data file {path}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            LoadError::Empty(_) => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

/// An ordered list of vertices and triangles, plus the derived
/// vertex -> triangle adjacency map.
///
/// Adjacency is built once at construction and read-only afterward; it is
/// the sole input to vertex-normal averaging. Per-vertex normals are not
/// stored: shading strategies derive them on demand via [`Mesh::vertex_normals`].
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    triangles: Vec<Triangle>,
    adjacency: Vec<Vec<usize>>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<Triangle>) -> Self {
        let mut adjacency = vec![Vec::new(); vertices.len()];
        for (i, triangle) in triangles.iter().enumerate() {
            for v in triangle.indices() {
                adjacency[v].push(i);
            }
        }
        Self {
            vertices,
            triangles,
            adjacency,
        }
    }

    /// Loads a mesh from an OBJ file.
    ///
    /// All models in the file are merged into one mesh. Faces are
    /// triangulated; position indices come through exactly as authored so
    /// the winding contract holds.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let (models, _) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: false,
                ignore_points: true,
                ignore_lines: true,
            },
        )?;

        let mut vertices = Vec::new();
        let mut triangles = Vec::new();
        for model in &models {
            let base = vertices.len();
            let mesh = &model.mesh;
            for chunk in mesh.positions.chunks_exact(3) {
                vertices.push(Vec3::new(chunk[0], chunk[1], chunk[2]));
            }
            for face in mesh.indices.chunks_exact(3) {
                triangles.push(Triangle::new(
                    base + face[0] as usize,
                    base + face[1] as usize,
                    base + face[2] as usize,
                ));
            }
        }

        if triangles.is_empty() {
            return Err(LoadError::Empty(path.display().to_string()));
        }

        println!("Trig {} vertices {}", triangles.len(), vertices.len());

        Ok(Self::new(vertices, triangles))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertex(&self, index: usize) -> Vec3 {
        self.vertices[index]
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// The three vertex positions of triangle `index`, as copies.
    pub fn triangle_vertices(&self, index: usize) -> [Vec3; 3] {
        let t = self.triangles[index];
        [self.vertices[t.a], self.vertices[t.b], self.vertices[t.c]]
    }

    /// The three vertex indices of triangle `index`.
    pub fn triangle_indices(&self, index: usize) -> [usize; 3] {
        self.triangles[index].indices()
    }

    /// Indices of every triangle containing vertex `index`.
    pub fn triangles_for_vertex(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// Per-vertex normals: the unweighted arithmetic mean of the surface
    /// normals of all triangles adjacent to each vertex.
    ///
    /// A vertex referenced by no triangle averages over nothing and yields
    /// NaN components, which propagate through shading without panicking.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let triangle_normals: Vec<Vec3> = (0..self.triangle_count())
            .map(|i| {
                let [p1, p2, p3] = self.triangle_vertices(i);
                crate::geometry::surface_normal(p1, p2, p3)
            })
            .collect();

        self.adjacency
            .iter()
            .map(|adjacent| {
                let mut normal = Vec3::ZERO;
                for &t in adjacent {
                    normal = normal + triangle_normals[t];
                }
                normal / adjacent.len() as f32
            })
            .collect()
    }

    /// Centers the mesh on its vertex mean and scales the dominant x/y
    /// extent to `range` units. Used once at load time to normalize object
    /// size before scene placement.
    pub fn fit_to_range(&mut self, range: f32) {
        if self.vertices.is_empty() {
            return;
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        let mut mean = Vec3::ZERO;
        for v in &self.vertices {
            mean = mean + *v;
            for i in 0..3 {
                if v[i] < min[i] {
                    min[i] = v[i];
                }
                if v[i] > max[i] {
                    max[i] = v[i];
                }
            }
        }
        mean = mean / self.vertices.len() as f32;

        let extent = (max.x - min.x).max(max.y - min.y);
        for v in &mut self.vertices {
            *v = (*v - mean) / extent * range;
        }
    }

    /// Applies a homogeneous transformation about the mesh's centroid.
    ///
    /// The mesh is moved to the origin, transformed (with perspective divide
    /// by w), and moved back, so rotations and scales act in place rather
    /// than around the world origin.
    pub fn apply_transform(&mut self, transformation: &Mat4) {
        if self.vertices.is_empty() {
            return;
        }

        let mut middle = Vec3::ZERO;
        for v in &self.vertices {
            middle = middle + *v;
        }
        middle = middle / self.vertices.len() as f32;

        for v in &mut self.vertices {
            *v = *transformation * (*v - middle) + middle;
        }
    }
}

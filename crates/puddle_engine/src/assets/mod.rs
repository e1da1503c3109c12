//! Asset management system
//!
//! Loading is done by an [`AssetLoader`] collaborator; [`ResourceCache`]
//! wraps it so that each path is loaded at most once per session.

pub mod obj_loader;
pub mod resource_manager;

pub use obj_loader::ObjLoader;
pub use resource_manager::ResourceCache;

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed asset contents
    #[error("Parse error in {path} line {line}: {message}")]
    Parse {
        /// Asset path
        path: String,
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Structurally invalid asset
    #[error("Invalid format in {path}: {message}")]
    InvalidFormat {
        /// Asset path
        path: String,
        /// What went wrong
        message: String,
    },
}

/// Loads one kind of asset from a path
pub trait AssetLoader {
    /// Loaded asset type
    type Output;

    /// Load the asset at `path`
    fn load(&mut self, path: &str) -> Result<Self::Output, AssetError>;
}

/// Mesh vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Surface normal
    pub normal: [f32; 3],
    /// Texture coordinate
    pub tex_coord: [f32; 2],
}

/// CPU-side triangle mesh, immutable once loaded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create a mesh from vertices and triangle indices
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

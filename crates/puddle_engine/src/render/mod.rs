//! Render hand-off
//!
//! The engine does not draw. It hands each visible entity's world matrix, the
//! camera's view-projection and the entity's render payload to a
//! [`RenderTarget`] supplied by the host.

pub mod camera;

pub use camera::Camera;

use std::fmt;
use std::rc::Rc;

use crate::assets::MeshData;
use crate::foundation::math::Mat4;

/// Shared handle to a loaded mesh
pub type MeshHandle = Rc<MeshData>;

/// Opaque texture reference, resolved by the rendering collaborator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle(String);

impl TextureHandle {
    /// Reference a texture by asset path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Asset path of the texture
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What to draw for an entity
#[derive(Debug, Clone)]
pub struct RenderPayload {
    /// Geometry
    pub mesh: MeshHandle,
    /// Surface texture
    pub texture: TextureHandle,
}

impl RenderPayload {
    /// Pair a mesh with a texture
    pub fn new(mesh: MeshHandle, texture: TextureHandle) -> Self {
        Self { mesh, texture }
    }
}

/// Receiver of draw submissions
pub trait RenderTarget {
    /// Called once per frame before the frame's submissions
    fn begin_frame(&mut self) {}

    /// Draw `payload` with the given world and view-projection matrices
    fn submit(&mut self, world_matrix: &Mat4, view_projection: &Mat4, payload: &RenderPayload);
}

/// One recorded submission
#[derive(Debug, Clone)]
pub struct DrawCall {
    /// World matrix supplied with the draw
    pub world_matrix: Mat4,
    /// Camera view-projection supplied with the draw
    pub view_projection: Mat4,
    /// Texture that was bound
    pub texture: TextureHandle,
    /// Number of indices in the mesh
    pub index_count: usize,
}

/// Render target that records submissions instead of drawing
///
/// Holds the current frame's submissions only; each
/// [`RenderTarget::begin_frame`] discards the previous frame. Used for
/// headless runs and tests.
#[derive(Debug, Default)]
pub struct DrawRecorder {
    calls: Vec<DrawCall>,
    total_submissions: u64,
}

impl DrawRecorder {
    /// Submissions since the last [`DrawRecorder::clear`]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Submissions since creation
    pub fn total_submissions(&self) -> u64 {
        self.total_submissions
    }

    /// Forget recorded submissions (the running total is kept)
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderTarget for DrawRecorder {
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn submit(&mut self, world_matrix: &Mat4, view_projection: &Mat4, payload: &RenderPayload) {
        self.total_submissions += 1;
        self.calls.push(DrawCall {
            world_matrix: *world_matrix,
            view_projection: *view_projection,
            texture: payload.texture.clone(),
            index_count: payload.mesh.indices.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_running_total_across_clears() {
        let payload = RenderPayload::new(Rc::new(MeshData::default()), TextureHandle::new("a.png"));
        let mut recorder = DrawRecorder::default();

        recorder.submit(&Mat4::identity(), &Mat4::identity(), &payload);
        recorder.submit(&Mat4::identity(), &Mat4::identity(), &payload);
        assert_eq!(recorder.calls().len(), 2);
        assert_eq!(recorder.calls()[0].texture.path(), "a.png");

        recorder.clear();
        recorder.submit(&Mat4::identity(), &Mat4::identity(), &payload);
        assert_eq!(recorder.calls().len(), 1);
        assert_eq!(recorder.total_submissions(), 3);
    }

    #[test]
    fn test_begin_frame_drops_previous_frame() {
        let payload = RenderPayload::new(Rc::new(MeshData::default()), TextureHandle::new("a.png"));
        let mut recorder = DrawRecorder::default();

        for _ in 0..3 {
            recorder.begin_frame();
            recorder.submit(&Mat4::identity(), &Mat4::identity(), &payload);
            recorder.submit(&Mat4::identity(), &Mat4::identity(), &payload);
        }
        assert_eq!(recorder.calls().len(), 2);
        assert_eq!(recorder.total_submissions(), 6);
    }
}

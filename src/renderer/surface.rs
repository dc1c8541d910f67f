//! Render surface contract
//!
//! The game never talks to a graphics API directly. A surface receives the
//! frame's camera, one `submit` per draw item and a final `present`.

use std::collections::HashMap;
use std::fmt;

use glam::Mat4;

use super::scene::{Camera, DrawList};
use super::shapes::{Mesh, MeshId, build_all};
use crate::error::StartupError;

/// Errors a surface can report while presenting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Surface must be reconfigured; the frame is dropped
    Lost,
    /// Unrecoverable
    OutOfMemory,
    Other(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lost => write!(f, "render surface lost"),
            Self::OutOfMemory => write!(f, "render surface out of memory"),
            Self::Other(msg) => write!(f, "render surface error: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Something that can draw the game's meshes
pub trait RenderSurface {
    /// Start a frame with the camera's view-projection
    fn begin_frame(&mut self, view_projection: Mat4);
    /// Draw `mesh` with the given world transform
    fn submit(&mut self, mesh: MeshId, model: &Mat4);
    /// Finish the frame (blocks on vsync for real surfaces)
    fn present(&mut self) -> Result<(), SurfaceError>;
    /// Recover after `SurfaceError::Lost`
    fn reconfigure(&mut self) {}
}

/// Submit a whole draw list to `surface` and present it
pub fn draw_frame<S: RenderSurface + ?Sized>(
    surface: &mut S,
    camera: &Camera,
    list: &DrawList,
) -> Result<(), SurfaceError> {
    surface.begin_frame(camera.view_projection());
    for item in list.items() {
        surface.submit(item.mesh, &item.model);
    }
    surface.present()
}

/// Surface that draws nothing and keeps per-frame statistics
#[derive(Debug)]
pub struct HeadlessSurface {
    /// Backbuffer size in pixels
    pub size: (u32, u32),
    pub frames_presented: u64,
    /// Submissions per mesh in the last presented frame
    pub last_frame: HashMap<MeshId, usize>,
    /// Triangles covered by the last presented frame
    pub last_frame_triangles: usize,
    pending: HashMap<MeshId, usize>,
    /// Errors to return from upcoming `present` calls, in order
    pub scripted_errors: Vec<SurfaceError>,
    meshes: HashMap<MeshId, Mesh>,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self {
            size: (800, 800),
            frames_presented: 0,
            last_frame: HashMap::new(),
            last_frame_triangles: 0,
            pending: HashMap::new(),
            scripted_errors: Vec::new(),
            meshes: build_all().into_iter().map(|m| (m.id, m)).collect(),
        }
    }
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a surface with a `width` x `height` backbuffer
    pub fn open(width: u32, height: u32) -> Result<Self, StartupError> {
        if width == 0 || height == 0 {
            return Err(StartupError::Surface(format!(
                "cannot create a {width}x{height} backbuffer"
            )));
        }
        log::info!("Headless surface {}x{}", width, height);
        Ok(Self {
            size: (width, height),
            ..Self::default()
        })
    }

    /// A surface whose next `present` calls fail with `errors`, in order
    pub fn with_errors(errors: impl IntoIterator<Item = SurfaceError>) -> Self {
        Self {
            scripted_errors: errors.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn last_frame_count(&self, mesh: MeshId) -> usize {
        self.last_frame.get(&mesh).copied().unwrap_or(0)
    }

    /// Vertex bytes a GPU surface would upload for `mesh`
    pub fn mesh_bytes(&self, mesh: MeshId) -> &[u8] {
        self.meshes.get(&mesh).map(Mesh::as_bytes).unwrap_or_default()
    }
}

impl RenderSurface for HeadlessSurface {
    fn begin_frame(&mut self, _view_projection: Mat4) {
        self.pending.clear();
    }

    fn submit(&mut self, mesh: MeshId, _model: &Mat4) {
        *self.pending.entry(mesh).or_insert(0) += 1;
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        if !self.scripted_errors.is_empty() {
            return Err(self.scripted_errors.remove(0));
        }
        self.last_frame = std::mem::take(&mut self.pending);
        self.last_frame_triangles = self
            .last_frame
            .iter()
            .map(|(id, n)| n * self.meshes.get(id).map_or(0, Mesh::triangle_count))
            .sum();
        self.frames_presented += 1;
        Ok(())
    }
}

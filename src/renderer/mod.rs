//! Rendering module
//!
//! Builds the static meshes and the per-frame draw list. Actual drawing is
//! delegated to a `RenderSurface`.

pub mod scene;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use scene::{Camera, DrawItem, DrawList, render};
pub use shapes::{FillMode, Mesh, MeshId};
pub use surface::{HeadlessSurface, RenderSurface, SurfaceError, draw_frame};
pub use vertex::Vertex;

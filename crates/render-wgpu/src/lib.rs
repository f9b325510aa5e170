//! wgpu render backend: textured mesh instances seen through the first-person
//! camera.
//!
//! # Invariants
//! - The renderer never mutates camera or library state.
//! - Mesh payloads are validated against the five-float stride at upload;
//!   frame rendering itself cannot fail on asset data.
//! - A missing or undecodable texture degrades to a generated checkerboard,
//!   never to a stopped frame loop.

mod gpu;
mod mesh;
mod shaders;
mod texture;

pub use gpu::WgpuRenderer;
pub use mesh::{MeshBuffers, MeshPlacement, MeshUploadError, Vertex};
pub use texture::SceneTexture;

use bytemuck::{Pod, Zeroable};
use walkspace_assets::{MeshData, MeshId, POSITION_UV_FLOATS};
use walkspace_common::Transform;
use wgpu::util::DeviceExt;

/// GPU vertex layout: position xyz + uv, matching the mesh text format's
/// five-float stride convention.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// One mesh occurrence in the scene.
#[derive(Debug, Clone, Copy)]
pub struct MeshPlacement {
    pub mesh: MeshId,
    pub transform: Transform,
}

/// Errors turning mesh payloads into GPU buffers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshUploadError {
    #[error("vertex floats ({floats}) are not a multiple of the {stride}-float stride")]
    UnevenStride { floats: usize, stride: usize },
    #[error("index {index} exceeds vertex count {vertices}")]
    IndexOutOfBounds { index: u32, vertices: usize },
}

/// Uploaded GPU mesh: vertex and index buffers ready to draw.
pub struct MeshBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffers {
    /// Validates the payload against the five-float stride and uploads it.
    /// The parser leaves stride to its callers, so this is where a file with
    /// the wrong row width surfaces.
    pub fn upload(
        device: &wgpu::Device,
        label: &str,
        data: &MeshData,
    ) -> Result<Self, MeshUploadError> {
        let vertices = convert_vertices(data)?;
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        })
    }
}

fn convert_vertices(data: &MeshData) -> Result<Vec<Vertex>, MeshUploadError> {
    let stride = POSITION_UV_FLOATS;
    let count = data
        .vertex_count(stride)
        .ok_or(MeshUploadError::UnevenStride {
            floats: data.vertices.len(),
            stride,
        })?;
    if let Some(max) = data.max_index() {
        if max as usize >= count {
            return Err(MeshUploadError::IndexOutOfBounds {
                index: max,
                vertices: count,
            });
        }
    }
    Ok(data
        .vertices
        .chunks_exact(stride)
        .map(|v| Vertex {
            position: [v[0], v[1], v[2]],
            uv: [v[3], v[4]],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_cube_vertices() {
        let verts = convert_vertices(&MeshData::unit_cube()).unwrap();
        assert_eq!(verts.len(), 24);
        assert_eq!(verts[0].position, [-0.5, -0.5, 0.5]);
        assert_eq!(verts[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn rejects_uneven_stride() {
        let data = MeshData {
            vertices: vec![1.0, 2.0, 3.0],
            indices: vec![0],
        };
        assert_eq!(
            convert_vertices(&data),
            Err(MeshUploadError::UnevenStride {
                floats: 3,
                stride: POSITION_UV_FLOATS,
            })
        );
    }

    #[test]
    fn rejects_out_of_bounds_indices() {
        let data = MeshData {
            vertices: vec![0.0; POSITION_UV_FLOATS * 2],
            indices: vec![0, 1, 2],
        };
        assert_eq!(
            convert_vertices(&data),
            Err(MeshUploadError::IndexOutOfBounds {
                index: 2,
                vertices: 2,
            })
        );
    }
}

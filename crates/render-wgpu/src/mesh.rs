use bytemuck::{Pod, Zeroable};
use tidewater_render::WaterMesh;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
}

/// A rectangle in the XY plane centred on the origin, facing +Z,
/// subdivided into `width_segments` x `height_segments` quads.
#[derive(Debug, Clone)]
pub struct PlaneGeometry {
    pub vertices: Vec<PlaneVertex>,
    pub indices: Vec<u32>,
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let gx = width_segments.max(1);
        let gy = height_segments.max(1);
        let seg_w = width / gx as f32;
        let seg_h = height / gy as f32;
        let half_w = width * 0.5;
        let half_h = height * 0.5;

        let mut vertices = Vec::with_capacity(((gx + 1) * (gy + 1)) as usize);
        for iy in 0..=gy {
            let y = iy as f32 * seg_h - half_h;
            for ix in 0..=gx {
                let x = ix as f32 * seg_w - half_w;
                // Rows run top to bottom.
                vertices.push(PlaneVertex {
                    position: [x, -y, 0.0],
                });
            }
        }

        let row = gx + 1;
        let mut indices = Vec::with_capacity((gx * gy * 6) as usize);
        for iy in 0..gy {
            for ix in 0..gx {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = (ix + 1) + row * (iy + 1);
                let d = (ix + 1) + row * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    pub fn for_mesh(mesh: &WaterMesh) -> Self {
        Self::new(
            mesh.width,
            mesh.height,
            mesh.width_segments,
            mesh.height_segments,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn single_quad() {
        let g = PlaneGeometry::new(2.0, 2.0, 1, 1);
        assert_eq!(g.vertices.len(), 4);
        assert_eq!(g.indices, vec![0, 2, 1, 2, 3, 1]);
        assert_eq!(g.vertices[0].position, [-1.0, 1.0, 0.0]);
        assert_eq!(g.vertices[3].position, [1.0, -1.0, 0.0]);
    }

    #[test]
    fn counts_match_water_mesh() {
        let mesh = WaterMesh {
            width_segments: 16,
            height_segments: 8,
            ..WaterMesh::default()
        };
        let g = PlaneGeometry::for_mesh(&mesh);
        assert_eq!(g.vertices.len() as u32, mesh.vertex_count());
        assert_eq!(g.indices.len() as u32, mesh.index_count());
        let max = *g.indices.iter().max().unwrap();
        assert!((max as usize) < g.vertices.len());
    }

    #[test]
    fn triangles_face_positive_z() {
        let g = PlaneGeometry::new(10.0, 10.0, 3, 3);
        for tri in g.indices.chunks(3) {
            let p = |i: u32| Vec3::from(g.vertices[i as usize].position);
            let n = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            assert!(n.z > 0.0);
        }
    }

    #[test]
    fn vertices_span_full_extent() {
        let g = PlaneGeometry::new(10.0, 10.0, 4, 4);
        let xs: Vec<f32> = g.vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = g.vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::INFINITY, f32::min), -5.0);
        assert_eq!(xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 5.0);
        assert_eq!(ys.iter().cloned().fold(f32::INFINITY, f32::min), -5.0);
        assert_eq!(ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 5.0);
    }
}

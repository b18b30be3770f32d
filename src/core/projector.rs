use crate::core::mesh::Mesh;
use crate::geometry::triangle::{TexturedTriangle, Triangle};
use crate::geometry::vector::Vector3H;

/// 投影前允许的最小深度；近平面裁剪之后仍低于该值属于不变量被破坏
pub const MIN_PROJECTION_DEPTH: f32 = 1e-6;

/// 透视投影参数（相机空间 -> 屏幕像素坐标）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub half_width: f32,
    pub half_height: f32,
    /// 高 / 宽
    pub aspect_ratio: f32,
    /// 1 / tan(fov / 2)
    pub fov_factor: f32,
}

impl Projection {
    pub fn new(width: usize, height: usize, fov_rad: f32) -> Self {
        Self {
            half_width: width as f32 * 0.5,
            half_height: height as f32 * 0.5,
            aspect_ratio: height as f32 / width as f32,
            fov_factor: 1.0 / (fov_rad * 0.5).tan(),
        }
    }

    fn guarded_depth(z: f32) -> f32 {
        debug_assert!(
            z >= MIN_PROJECTION_DEPTH,
            "投影时深度 {} 不为正，近平面裁剪未生效",
            z
        );
        z.max(MIN_PROJECTION_DEPTH)
    }

    /// 屏幕 y 轴向下，相机空间 +Y 向上，因此 y 项取反。
    /// 返回值：x、y 为像素坐标，z 保留相机空间深度，w 为倒数深度 1/z。
    pub fn project_vertex(&self, v: Vector3H) -> Vector3H {
        let z = Self::guarded_depth(v.z);
        let inv_z = 1.0 / z;
        Vector3H::with_w(
            v.x * self.aspect_ratio * self.fov_factor * self.half_width * inv_z + self.half_width,
            self.half_height - v.y * self.fov_factor * self.half_height * inv_z,
            z,
            inv_z,
        )
    }

    /// 纹理坐标预除深度：(u/z, v/z, 1/z)
    pub fn project_texcoord(&self, uv: Vector3H, z: f32) -> Vector3H {
        let inv_z = 1.0 / Self::guarded_depth(z);
        Vector3H::new(uv.x * inv_z, uv.y * inv_z, inv_z)
    }

    pub fn project_triangle(&self, triangle: &TexturedTriangle) -> TexturedTriangle {
        let g = &triangle.geometry.vertices;
        let t = &triangle.texcoords.vertices;
        TexturedTriangle::new(
            triangle.geometry.map_vertices(|v| self.project_vertex(v)),
            Triangle::new(
                self.project_texcoord(t[0], g[0].z),
                self.project_texcoord(t[1], g[1].z),
                self.project_texcoord(t[2], g[2].z),
            ),
        )
    }

    pub fn project(&self, mesh: &Mesh) -> Mesh {
        mesh.with_triangles(
            mesh.triangles()
                .iter()
                .map(|t| self.project_triangle(t))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn center_projects_to_screen_center() {
        let p = Projection::new(200, 100, FRAC_PI_2);
        let s = p.project_vertex(Vector3H::new(0.0, 0.0, 3.0));
        assert!((s.x - 100.0).abs() < 1e-4);
        assert!((s.y - 50.0).abs() < 1e-4);
        assert!((s.w - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn ninety_degree_fov_edges() {
        // fov = 90°：x = z 落在右边缘（宽高比修正后按高度缩放）
        let p = Projection::new(100, 100, FRAC_PI_2);
        let right = p.project_vertex(Vector3H::new(2.0, 0.0, 2.0));
        assert!((right.x - 100.0).abs() < 1e-3);
        let top = p.project_vertex(Vector3H::new(0.0, 2.0, 2.0));
        assert!(top.y.abs() < 1e-3);
    }

    #[test]
    fn texcoords_are_divided_by_depth() {
        let p = Projection::new(100, 100, FRAC_PI_2);
        let t = p.project_texcoord(Vector3H::new(0.5, 1.0, 1.0), 4.0);
        assert!(t.approx_eq(Vector3H::new(0.125, 0.25, 0.25), 1e-6));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn zero_depth_trips_debug_assertion() {
        let p = Projection::new(100, 100, FRAC_PI_2);
        p.project_vertex(Vector3H::new(1.0, 1.0, 0.0));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn zero_depth_is_clamped_in_release() {
        let p = Projection::new(100, 100, FRAC_PI_2);
        let s = p.project_vertex(Vector3H::new(1.0, 1.0, 0.0));
        assert_eq!(s.z, MIN_PROJECTION_DEPTH);
        assert_eq!(s.w, 1.0 / MIN_PROJECTION_DEPTH);
        assert!(s.x.is_finite() && s.y.is_finite());
        let t = p.project_texcoord(Vector3H::new(0.5, 0.5, 1.0), 0.0);
        assert!(t.x.is_finite() && t.z.is_finite());
    }
}

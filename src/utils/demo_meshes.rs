use crate::core::mesh::Mesh;
use crate::geometry::triangle::{TexturedTriangle, Triangle};
use crate::geometry::vector::Vector3H;
use crate::materials::color::rgb;
use crate::materials::texture::Texture;
use std::sync::Arc;

/// 没有指定纹理时使用的棋盘格
pub fn default_checkerboard() -> Texture {
    Texture::checkerboard(64, 64, 8, rgb(230, 230, 230), rgb(40, 90, 200))
}

/// 以原点为中心、边长为 `size` 的立方体，每个面铺满整张纹理
///
/// 每个面的顶点按 `(v1 - v0) × (v2 - v0)` 指向外侧的顺序排列。
pub fn textured_cube(size: f32, texture: Arc<Texture>) -> Mesh {
    let h = size * 0.5;
    let p = |x: f32, y: f32, z: f32| Vector3H::new(x * h, y * h, z * h);

    let faces: [[Vector3H; 4]; 6] = [
        // 前 (+z)
        [p(-1.0, -1.0, 1.0), p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0), p(-1.0, 1.0, 1.0)],
        // 后 (-z)
        [p(-1.0, -1.0, -1.0), p(-1.0, 1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, -1.0, -1.0)],
        // 上 (+y)
        [p(-1.0, 1.0, -1.0), p(-1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, -1.0)],
        // 下 (-y)
        [p(-1.0, -1.0, -1.0), p(1.0, -1.0, -1.0), p(1.0, -1.0, 1.0), p(-1.0, -1.0, 1.0)],
        // 右 (+x)
        [p(1.0, -1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, 1.0, 1.0), p(1.0, -1.0, 1.0)],
        // 左 (-x)
        [p(-1.0, -1.0, -1.0), p(-1.0, -1.0, 1.0), p(-1.0, 1.0, 1.0), p(-1.0, 1.0, -1.0)],
    ];

    // 纹理行自上而下存储，v = 0 为图像顶部
    let uvs = [
        Vector3H::new(0.0, 1.0, 1.0),
        Vector3H::new(1.0, 1.0, 1.0),
        Vector3H::new(1.0, 0.0, 1.0),
        Vector3H::new(0.0, 0.0, 1.0),
    ];

    let mut triangles = Vec::with_capacity(12);
    for quad in &faces {
        for [a, b, c] in [[0, 1, 2], [0, 2, 3]] {
            triangles.push(TexturedTriangle::new(
                Triangle::new(quad[a], quad[b], quad[c]),
                Triangle::new(uvs[a], uvs[b], uvs[c]),
            ));
        }
    }

    Mesh::new(triangles, texture)
}

use crate::geometry::plane::Plane;
use crate::geometry::vector::Vector3H;
use std::cell::OnceCell;

/// 三角形面，顶点顺序即绕序；法线在第一次读取时计算并缓存
///
/// 三角形从不原地修改（裁剪、变换都产生新值），所以缓存无需失效逻辑。
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vector3H; 3],
    normal: OnceCell<Vector3H>,
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}

impl Triangle {
    pub fn new(v0: Vector3H, v1: Vector3H, v2: Vector3H) -> Self {
        Self::from_vertices([v0, v1, v2])
    }

    pub fn from_vertices(vertices: [Vector3H; 3]) -> Self {
        Self {
            vertices,
            normal: OnceCell::new(),
        }
    }

    /// 未单位化的面法线 `(v1 - v0) × (v2 - v0)`
    pub fn normal(&self) -> Vector3H {
        *self.normal.get_or_init(|| {
            let [v0, v1, v2] = self.vertices;
            (v1 - v0).cross(v2 - v0)
        })
    }

    /// 背面剔除测试：相机位于局部原点时，法线指向原点的面可见
    pub fn is_front_facing(&self) -> bool {
        self.normal().dot(self.vertices[0]) < 0.0
    }

    pub fn area(&self) -> f32 {
        self.normal().length() * 0.5
    }

    pub fn map_vertices<F>(&self, f: F) -> Triangle
    where
        F: FnMut(Vector3H) -> Vector3H,
    {
        Triangle::from_vertices(self.vertices.map(f))
    }

    /// 用平面裁剪三角形，得到 0~2 个三角形
    pub fn clip(&self, plane: &Plane) -> Clipped<Triangle> {
        ClipPlan::new(self, plane).apply(self)
    }
}

/// 几何三角形与纹理坐标三角形的结构化配对
///
/// 两者的第 i 个顶点一一对应；所有裁剪/剔除操作都以这个整体为单位，
/// 对应关系因此无法被破坏。
#[derive(Debug, Clone, PartialEq)]
pub struct TexturedTriangle {
    pub geometry: Triangle,
    pub texcoords: Triangle,
}

impl TexturedTriangle {
    pub fn new(geometry: Triangle, texcoords: Triangle) -> Self {
        Self {
            geometry,
            texcoords,
        }
    }

    /// 成对裁剪：插值参数只由几何顶点的距离计算，纹理坐标复用同一参数
    pub fn clip(&self, plane: &Plane) -> Clipped<TexturedTriangle> {
        let plan = ClipPlan::new(&self.geometry, plane);
        match plan {
            ClipPlan::Keep => Clipped::one(self.clone()),
            ClipPlan::Discard => Clipped::none(),
            _ => {
                let mut geometry = plan.apply(&self.geometry).into_iter();
                let mut texcoords = plan.apply(&self.texcoords).into_iter();
                let mut out = Clipped::none();
                while let (Some(g), Some(t)) = (geometry.next(), texcoords.next()) {
                    out.push(TexturedTriangle::new(g, t));
                }
                out
            }
        }
    }
}

/// 裁剪结果，最多两个
#[derive(Debug, Clone)]
pub struct Clipped<T>([Option<T>; 2]);

impl<T> Clipped<T> {
    pub fn none() -> Self {
        Self([None, None])
    }

    pub fn one(a: T) -> Self {
        Self([Some(a), None])
    }

    pub fn two(a: T, b: T) -> Self {
        Self([Some(a), Some(b)])
    }

    fn push(&mut self, item: T) {
        if self.0[0].is_none() {
            self.0[0] = Some(item);
        } else {
            self.0[1] = Some(item);
        }
    }

    pub fn len(&self) -> usize {
        self.0.iter().filter(|t| t.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> IntoIterator for Clipped<T> {
    type Item = T;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<T>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter().flatten()
    }
}

/// 三角形相对平面的裁剪方案。
/// 分裂时记录局部顶点索引 (i0, i1, i2) 以及两条边上的交点参数 t0、t1：
/// q0 位于边 i0→i1，q1 位于边 i2→i0。
#[derive(Debug, Clone, Copy)]
enum ClipPlan {
    Keep,
    Discard,
    /// i0 是唯一的内侧顶点
    OneInside {
        i: [usize; 3],
        t0: f32,
        t1: f32,
    },
    /// i0 是唯一的外侧顶点
    TwoInside {
        i: [usize; 3],
        t0: f32,
        t1: f32,
    },
}

impl ClipPlan {
    fn new(triangle: &Triangle, plane: &Plane) -> Self {
        let v = &triangle.vertices;
        let d = v.map(|p| plane.signed_distance(p));

        // 先判断整体保留：三点都在平面上的三角形保持原样
        if d.iter().all(|&x| x >= 0.0) {
            return ClipPlan::Keep;
        }
        if d.iter().all(|&x| x <= 0.0) {
            return ClipPlan::Discard;
        }

        let inside = d.iter().filter(|&&x| x > 0.0).count();
        let pivot = if inside == 1 {
            d.iter().position(|&x| x > 0.0)
        } else {
            d.iter().position(|&x| x <= 0.0)
        }
        .unwrap_or(0);

        let i = [pivot, (pivot + 1) % 3, (pivot + 2) % 3];
        let t0 = plane.intersection_parameter(v[i[0]], v[i[1]]);
        let t1 = plane.intersection_parameter(v[i[2]], v[i[0]]);

        if inside == 1 {
            ClipPlan::OneInside { i, t0, t1 }
        } else {
            ClipPlan::TwoInside { i, t0, t1 }
        }
    }

    fn apply(&self, triangle: &Triangle) -> Clipped<Triangle> {
        let v = &triangle.vertices;
        match *self {
            ClipPlan::Keep => Clipped::one(triangle.clone()),
            ClipPlan::Discard => Clipped::none(),
            ClipPlan::OneInside { i, t0, t1 } => {
                let q0 = v[i[0]].lerp(v[i[1]], t0);
                let q1 = v[i[2]].lerp(v[i[0]], t1);
                Clipped::one(Triangle::new(v[i[0]], q0, q1))
            }
            ClipPlan::TwoInside { i, t0, t1 } => {
                let q0 = v[i[0]].lerp(v[i[1]], t0);
                let q1 = v[i[2]].lerp(v[i[0]], t1);
                Clipped::two(
                    Triangle::new(v[i[1]], v[i[2]], q1),
                    Triangle::new(q1, q0, v[i[1]]),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(
            Vector3H::new(a[0], a[1], a[2]),
            Vector3H::new(b[0], b[1], b[2]),
            Vector3H::new(c[0], c[1], c[2]),
        )
    }

    fn near_plane() -> Plane {
        Plane::new(Vector3H::new(0.0, 0.0, 1.0), Vector3H::k())
    }

    #[test]
    fn normal_is_cached_cross_product() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(t.normal().approx_eq(Vector3H::k(), 1e-6));
        assert!(t.normal.get().is_some());
        assert!((t.area() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn front_facing_when_normal_points_at_origin() {
        let facing = tri([-1.0, -1.0, 5.0], [0.0, 1.0, 5.0], [1.0, -1.0, 5.0]);
        assert!(facing.is_front_facing());
        let away = tri([-1.0, -1.0, 5.0], [1.0, -1.0, 5.0], [0.0, 1.0, 5.0]);
        assert!(!away.is_front_facing());
    }

    #[test]
    fn fully_inside_is_kept_unchanged() {
        let t = tri([0.0, 0.0, 2.0], [1.0, 0.0, 3.0], [0.0, 1.0, 4.0]);
        let out: Vec<_> = t.clip(&near_plane()).into_iter().collect();
        assert_eq!(out, vec![t]);
    }

    #[test]
    fn fully_outside_is_dropped() {
        let t = tri([0.0, 0.0, -2.0], [1.0, 0.0, 0.5], [0.0, 1.0, 1.0]);
        assert!(t.clip(&near_plane()).is_empty());
    }

    #[test]
    fn lying_on_plane_is_kept() {
        let t = tri([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);
        assert_eq!(t.clip(&near_plane()).len(), 1);
    }

    #[test]
    fn one_inside_vertex_gives_one_triangle() {
        let t = tri([0.0, 0.0, 3.0], [2.0, 0.0, -1.0], [0.0, 2.0, -1.0]);
        let out: Vec<_> = t.clip(&near_plane()).into_iter().collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].vertices[0], t.vertices[0]);
        for v in out[0].vertices {
            assert!(v.z >= 1.0 - 1e-5);
        }
        // 交点在两条被截断的边的中点
        assert!(out[0].vertices[1].approx_eq(Vector3H::new(1.0, 0.0, 1.0), 1e-5));
        assert!(out[0].vertices[2].approx_eq(Vector3H::new(0.0, 1.0, 1.0), 1e-5));
    }

    #[test]
    fn two_inside_vertices_give_two_triangles_with_same_winding() {
        let t = tri([0.0, 0.0, -1.0], [2.0, 0.0, 3.0], [0.0, 2.0, 3.0]);
        let out: Vec<_> = t.clip(&near_plane()).into_iter().collect();
        assert_eq!(out.len(), 2);
        let n = t.normal().normalize();
        for piece in &out {
            assert!(piece.vertices.iter().all(|v| v.z >= 1.0 - 1e-5));
            assert!(piece.normal().dot(n) > 0.0);
        }
    }

    #[test]
    fn paired_clip_uses_geometry_parameters_for_texcoords() {
        let geometry = tri([0.0, 0.0, 3.0], [2.0, 0.0, -1.0], [0.0, 2.0, -1.0]);
        let texcoords = tri([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);
        let pair = TexturedTriangle::new(geometry, texcoords);
        let out: Vec<_> = pair.clip(&near_plane()).into_iter().collect();
        assert_eq!(out.len(), 1);
        let t = &out[0].texcoords;
        assert!(t.vertices[0].approx_eq(Vector3H::new(0.0, 0.0, 1.0), 1e-6));
        assert!(t.vertices[1].approx_eq(Vector3H::new(0.5, 0.0, 1.0), 1e-6));
        assert!(t.vertices[2].approx_eq(Vector3H::new(0.0, 0.5, 1.0), 1e-6));
    }
}

//! 平面裁剪的性质测试：恒等、整体丢弃、面积守恒以及近平面跨越场景
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scanline_rasterizer::geometry::plane::Plane;
use scanline_rasterizer::geometry::triangle::{TexturedTriangle, Triangle};
use scanline_rasterizer::geometry::vector::Vector3H;

const Z_NEAR: f32 = 0.1;

fn random_point(rng: &mut StdRng) -> Vector3H {
    Vector3H::new(
        rng.random_range(-5.0..5.0),
        rng.random_range(-5.0..5.0),
        rng.random_range(-5.0..5.0),
    )
}

fn random_plane(rng: &mut StdRng) -> Plane {
    let mut normal = random_point(rng);
    while normal.length() < 0.1 {
        normal = random_point(rng);
    }
    Plane::new(random_point(rng).scale(0.3), normal)
}

/// 平面凸多边形面积（扇形三角剖分）
fn polygon_area(points: &[Vector3H]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let p0 = points[0];
    let mut sum = Vector3H::ZERO;
    for w in points[1..].windows(2) {
        sum = sum + (w[0] - p0).cross(w[1] - p0);
    }
    sum.length() * 0.5
}

/// 独立的多边形裁剪，作为面积的参照值
fn clip_polygon(points: &[Vector3H], plane: &Plane) -> Vec<Vector3H> {
    let mut out = Vec::new();
    for idx in 0..points.len() {
        let a = points[idx];
        let b = points[(idx + 1) % points.len()];
        let da = plane.signed_distance(a);
        let db = plane.signed_distance(b);
        if da >= 0.0 {
            out.push(a);
        }
        if (da > 0.0 && db < 0.0) || (da < 0.0 && db > 0.0) {
            out.push(a.lerp(b, da / (da - db)));
        }
    }
    out
}

fn near_plane() -> Plane {
    Plane::new(Vector3H::new(0.0, 0.0, Z_NEAR), Vector3H::k())
}

#[test]
fn all_non_negative_distances_return_the_triangle_itself() {
    let mut rng = StdRng::seed_from_u64(11);
    let plane = near_plane();
    for _ in 0..200 {
        let t = Triangle::from_vertices([0; 3].map(|_| {
            Vector3H::new(
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(Z_NEAR..50.0),
            )
        }));
        let out: Vec<Triangle> = t.clip(&plane).into_iter().collect();
        assert_eq!(out, vec![t]);
    }
}

#[test]
fn all_non_positive_distances_return_nothing() {
    let mut rng = StdRng::seed_from_u64(12);
    let plane = near_plane();
    for _ in 0..200 {
        let t = Triangle::from_vertices([0; 3].map(|_| {
            Vector3H::new(
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(-50.0..Z_NEAR - 1e-3),
            )
        }));
        assert!(t.clip(&plane).is_empty());
    }
}

#[test]
fn triangle_lying_on_the_plane_is_kept() {
    let plane = near_plane();
    let t = Triangle::new(
        Vector3H::new(0.0, 0.0, Z_NEAR),
        Vector3H::new(1.0, 0.0, Z_NEAR),
        Vector3H::new(0.0, 1.0, Z_NEAR),
    );
    assert_eq!(t.clip(&plane).len(), 1);
}

#[test]
fn split_conserves_area() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut checked = 0;
    for _ in 0..2000 {
        let t = Triangle::from_vertices([0; 3].map(|_| random_point(&mut rng)));
        let plane = random_plane(&mut rng);
        if t.area() < 1e-2 {
            continue;
        }

        let clipped = t.clip(&plane);
        let produced: f32 = clipped.clone().into_iter().map(|c| c.area()).sum();
        let expected = polygon_area(&clip_polygon(&t.vertices, &plane));

        assert!(
            (produced - expected).abs() <= 1e-3 * t.area().max(1.0),
            "面积不守恒: 输出 {} 期望 {}",
            produced,
            expected
        );
        assert!(clipped.len() <= 2);
        for out in clipped {
            for v in out.vertices {
                assert!(plane.signed_distance(v) >= -1e-3);
            }
        }
        checked += 1;
    }
    assert!(checked > 1000);
}

#[test]
fn split_preserves_winding() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..500 {
        let t = Triangle::from_vertices([0; 3].map(|_| random_point(&mut rng)));
        if t.area() < 1e-1 {
            continue;
        }
        let plane = random_plane(&mut rng);
        let n = t.normal();
        for out in t.clip(&plane) {
            if out.area() > 1e-4 {
                assert!(out.normal().dot(n) > 0.0);
            }
        }
    }
}

#[test]
fn single_inside_vertex_yields_exactly_one_triangle() {
    let t = Triangle::new(
        Vector3H::new(0.0, 1.0, Z_NEAR + 1.0),
        Vector3H::new(-1.0, -1.0, Z_NEAR - 1.0),
        Vector3H::new(1.0, -1.0, Z_NEAR - 1.0),
    );
    let out: Vec<Triangle> = t.clip(&near_plane()).into_iter().collect();
    assert_eq!(out.len(), 1);
    assert!(out[0].vertices.iter().all(|v| v.z >= Z_NEAR - 1e-6));
}

#[test]
fn straddling_near_plane_stays_in_front_of_it() {
    // z = [zNear-1, zNear+1, zNear+1]：两个顶点在内侧，得到两个三角形
    let t = Triangle::new(
        Vector3H::new(0.0, 1.0, Z_NEAR - 1.0),
        Vector3H::new(-1.0, -1.0, Z_NEAR + 1.0),
        Vector3H::new(1.0, -1.0, Z_NEAR + 1.0),
    );
    let out: Vec<Triangle> = t.clip(&near_plane()).into_iter().collect();
    assert_eq!(out.len(), 2);
    for tri in &out {
        assert!(tri.vertices.iter().all(|v| v.z >= Z_NEAR - 1e-6));
    }
}

#[test]
fn texcoords_follow_geometry_through_splits() {
    // 纹理坐标取几何坐标的仿射函数，裁剪后这一关系必须保持
    let uv_of = |v: Vector3H| Vector3H::new(0.5 * v.x + 0.1, 0.25 * v.y - 0.3, 1.0);
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..300 {
        let geometry = Triangle::from_vertices([0; 3].map(|_| random_point(&mut rng)));
        let texcoords = geometry.map_vertices(uv_of);
        let paired = TexturedTriangle::new(geometry, texcoords);
        let plane = random_plane(&mut rng);
        for out in paired.clip(&plane) {
            for (g, uv) in out.geometry.vertices.iter().zip(out.texcoords.vertices.iter()) {
                assert!(uv.approx_eq(uv_of(*g), 1e-3));
            }
        }
    }
}

use crate::geometry::vector::Vector3H;

/// 由平面上一点和单位法线定义的半空间，法线指向"内侧"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub position: Vector3H,
    pub normal: Vector3H,
}

impl Plane {
    pub fn new(position: Vector3H, normal: Vector3H) -> Self {
        Self {
            position,
            normal: normal.normalize(),
        }
    }

    /// 有符号距离 `(v - position) · normal`，大于 0 表示在内侧
    pub fn signed_distance(&self, v: Vector3H) -> f32 {
        (v - self.position).dot(self.normal)
    }

    /// 线段 `from -> to` 与平面交点的插值参数
    pub fn intersection_parameter(&self, from: Vector3H, to: Vector3H) -> f32 {
        (self.position - from).dot(self.normal) / (to - from).dot(self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_distance_sign() {
        let near = Plane::new(Vector3H::new(0.0, 0.0, 0.1), Vector3H::k());
        assert!(near.signed_distance(Vector3H::new(0.0, 0.0, 5.0)) > 0.0);
        assert!(near.signed_distance(Vector3H::new(3.0, -2.0, 0.0)) < 0.0);
    }

    #[test]
    fn normal_is_normalized() {
        let p = Plane::new(Vector3H::ZERO, Vector3H::new(0.0, 4.0, 0.0));
        assert!((p.normal.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn intersection_parameter_hits_plane() {
        let p = Plane::new(Vector3H::new(0.0, 0.0, 1.0), Vector3H::k());
        let a = Vector3H::new(0.0, 0.0, 0.0);
        let b = Vector3H::new(0.0, 0.0, 4.0);
        let t = p.intersection_parameter(a, b);
        assert!((t - 0.25).abs() < 1e-6);
        assert!(p.signed_distance(a.lerp(b, t)).abs() < 1e-6);
    }
}

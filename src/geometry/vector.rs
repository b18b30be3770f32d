use crate::geometry::matrix::RotationMatrix;
use nalgebra::Vector3;
use std::ops::{Add, Mul, Neg, Sub};

/// 齐次三维向量 (x, y, z, w)
///
/// 既用作空间点，也在投影之后承载额外的逐顶点标量：
/// 几何顶点在 `w` 中携带倒数深度 `1/z`，纹理坐标顶点则以 `(u/z, v/z, 1/z)`
/// 的形式打包在 x、y、z 中。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3H {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Vector3H {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Vector3H {
    pub const ZERO: Vector3H = Vector3H::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    pub const fn with_w(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn i() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub const fn j() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    pub const fn k() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    pub fn dot(self, other: Vector3H) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vector3H) -> Vector3H {
        Vector3H::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn scale(self, k: f32) -> Vector3H {
        Vector3H::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// 单位化；零向量原样返回零向量
    pub fn normalize(self) -> Vector3H {
        let len = self.length();
        if len <= f32::EPSILON {
            return Vector3H::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// 用旋转矩阵变换（仅作用于 x、y、z）
    pub fn transform(self, matrix: &RotationMatrix) -> Vector3H {
        matrix.apply(self)
    }

    /// 四个分量一起线性插值，保证投影后携带的 `w` 与坐标同步
    pub fn lerp(self, other: Vector3H, t: f32) -> Vector3H {
        Vector3H::with_w(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
            self.w + (other.w - self.w) * t,
        )
    }

    pub fn approx_eq(self, other: Vector3H, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
    }

    pub fn to_nalgebra(self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(v: &Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add for Vector3H {
    type Output = Vector3H;
    fn add(self, other: Vector3H) -> Vector3H {
        Vector3H::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3H {
    type Output = Vector3H;
    fn sub(self, other: Vector3H) -> Vector3H {
        Vector3H::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vector3H {
    type Output = Vector3H;
    fn mul(self, k: f32) -> Vector3H {
        self.scale(k)
    }
}

impl Neg for Vector3H {
    type Output = Vector3H;
    fn neg(self) -> Vector3H {
        self.scale(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_of_basis_follows_right_hand_rule() {
        let k = Vector3H::i().cross(Vector3H::j());
        assert!(k.approx_eq(Vector3H::k(), 1e-6));
        let i = Vector3H::j().cross(Vector3H::k());
        assert!(i.approx_eq(Vector3H::i(), 1e-6));
    }

    #[test]
    fn dot_ignores_w() {
        let a = Vector3H::with_w(1.0, 2.0, 3.0, 10.0);
        let b = Vector3H::with_w(4.0, 5.0, 6.0, -7.0);
        assert!((a.dot(b) - 32.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_stays_zero() {
        assert_eq!(Vector3H::ZERO.normalize(), Vector3H::ZERO);
        let n = Vector3H::new(3.0, 0.0, 4.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_carries_w() {
        let a = Vector3H::with_w(0.0, 0.0, 0.0, 1.0);
        let b = Vector3H::with_w(2.0, 4.0, 6.0, 0.5);
        let m = a.lerp(b, 0.5);
        assert!(m.approx_eq(Vector3H::new(1.0, 2.0, 3.0), 1e-6));
        assert!((m.w - 0.75).abs() < 1e-6);
    }
}

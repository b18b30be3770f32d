use crate::geometry::vector::Vector3H;
use nalgebra::{Matrix3, Rotation3, Unit};

/// 3x3 旋转矩阵
///
/// 只能通过轴角构造、单位矩阵、正交矩阵的组合或正交基列向量得到，
/// 因此始终保持正交（转置即逆）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix(Matrix3<f32>);

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl RotationMatrix {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// 绕单位轴 `axis` 旋转 `angle` 弧度（右手定则）
    pub fn from_axis_angle(axis: Vector3H, angle: f32) -> Self {
        let axis_unit = Unit::new_normalize(axis.to_nalgebra());
        Self(Rotation3::from_axis_angle(&axis_unit, angle).into_inner())
    }

    /// 由三个正交单位基向量作为列构造
    pub fn from_basis(i: Vector3H, j: Vector3H, k: Vector3H) -> Self {
        Self(Matrix3::from_columns(&[
            i.to_nalgebra(),
            j.to_nalgebra(),
            k.to_nalgebra(),
        ]))
    }

    /// 按给定顺序连乘：`m[0] * m[1] * ... * m[n-1]`，空列表得到单位矩阵
    pub fn compose(matrices: &[RotationMatrix]) -> Self {
        matrices
            .iter()
            .fold(Self::identity(), |acc, m| acc.multiply(m))
    }

    pub fn multiply(&self, other: &RotationMatrix) -> Self {
        Self(self.0 * other.0)
    }

    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    pub fn apply(&self, v: Vector3H) -> Vector3H {
        Vector3H::from_nalgebra(&(self.0 * v.to_nalgebra()))
    }

    pub fn column(&self, index: usize) -> Vector3H {
        Vector3H::from_nalgebra(&self.0.column(index).into_owned())
    }

    pub fn approx_eq(&self, other: &RotationMatrix, eps: f32) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    pub fn inner(&self) -> &Matrix3<f32> {
        &self.0
    }
}

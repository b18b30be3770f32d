use crate::geometry::matrix::RotationMatrix;
use crate::geometry::vector::Vector3H;
use std::f32::consts::PI;

/// 每帧旋转步长（弧度）
pub const ROTATION_STEP: f32 = PI / 512.0;
/// 每帧平移步长
pub const TRANSLATION_STEP: f32 = 0.03;

/// 相机局部坐标轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    I,
    J,
    K,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::I, Axis::J, Axis::K];

    pub fn index(self) -> usize {
        match self {
            Axis::I => 0,
            Axis::J => 1,
            Axis::K => 2,
        }
    }

    pub fn from_index(index: usize) -> Axis {
        Self::ALL[index % 3]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Rotate,
    Translate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn value(self) -> f32 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// 单帧的离散相机运动
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Motion {
    pub kind: MotionKind,
    pub axis: Axis,
    pub sign: Sign,
}

impl Motion {
    pub fn rotate(axis: Axis, sign: Sign) -> Self {
        Self {
            kind: MotionKind::Rotate,
            axis,
            sign,
        }
    }

    pub fn translate(axis: Axis, sign: Sign) -> Self {
        Self {
            kind: MotionKind::Translate,
            axis,
            sign,
        }
    }
}

/// 相机的正交基 {i, j, k}
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub i: Vector3H,
    pub j: Vector3H,
    pub k: Vector3H,
}

impl Default for Basis {
    fn default() -> Self {
        Self {
            i: Vector3H::i(),
            j: Vector3H::j(),
            k: Vector3H::k(),
        }
    }
}

impl Basis {
    pub fn get(&self, axis: Axis) -> Vector3H {
        match axis {
            Axis::I => self.i,
            Axis::J => self.j,
            Axis::K => self.k,
        }
    }

    fn set(&mut self, axis: Axis, v: Vector3H) {
        match axis {
            Axis::I => self.i = v,
            Axis::J => self.j = v,
            Axis::K => self.k = v,
        }
    }

    /// 矩阵的三列组成的基
    pub fn from_columns(matrix: &RotationMatrix) -> Self {
        Self {
            i: matrix.column(0),
            j: matrix.column(1),
            k: matrix.column(2),
        }
    }

    /// Gram-Schmidt：k 归一化，j 去掉 k 分量后归一化，i = j × k
    pub fn gram_schmidt(&self) -> Self {
        let k = self.k.normalize();
        let j = (self.j - k.scale(self.j.dot(k))).normalize();
        Self { i: j.cross(k), j, k }
    }

    /// 偏离正交单位基的最大误差
    pub fn orthonormality_error(&self) -> f32 {
        let Basis { i, j, k } = *self;
        [
            (i.length() - 1.0).abs(),
            (j.length() - 1.0).abs(),
            (k.length() - 1.0).abs(),
            i.dot(j).abs(),
            j.dot(k).abs(),
            k.dot(i).abs(),
        ]
        .into_iter()
        .fold(0.0, f32::max)
    }
}

/// 自由飞行相机
///
/// 朝向由正交基 {i, j, k} 表示（i 向右、j 向上、k 向前），
/// `rotation` 是累计旋转矩阵，用于批量变换点。
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vector3H,
    pub basis: Basis,
    pub rotation: RotationMatrix,
    pub rotation_step: f32,
    pub translation_step: f32,
    /// 每隔多少次 update 做一次 Gram-Schmidt 正交化，0 表示关闭
    pub reorthonormalize_interval: u32,
    updates_since_reorthonormalize: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3H::ZERO)
    }
}

impl Camera {
    pub fn new(position: Vector3H) -> Self {
        Self {
            position,
            basis: Basis::default(),
            rotation: RotationMatrix::identity(),
            rotation_step: ROTATION_STEP,
            translation_step: TRANSLATION_STEP,
            reorthonormalize_interval: 0,
            updates_since_reorthonormalize: 0,
        }
    }

    pub fn with_steps(mut self, rotation_step: f32, translation_step: f32) -> Self {
        self.rotation_step = rotation_step;
        self.translation_step = translation_step;
        self
    }

    pub fn with_reorthonormalize_interval(mut self, interval: u32) -> Self {
        self.reorthonormalize_interval = interval;
        self
    }

    /// 消费一帧的运动列表
    ///
    /// 先处理所有旋转：绕当前基向量 a 旋转下一个基向量，第三个基向量用叉积重新推导，
    /// 避免浮点误差累积破坏正交性。之后再沿（可能刚旋转过的）基向量平移。
    pub fn update(&mut self, motions: &[Motion]) {
        let mut increments = Vec::new();

        for motion in motions.iter().filter(|m| m.kind == MotionKind::Rotate) {
            let axis = self.basis.get(motion.axis);
            let rotation =
                RotationMatrix::from_axis_angle(axis, motion.sign.value() * self.rotation_step);

            let next = Axis::from_index(motion.axis.index() + 1);
            let third = Axis::from_index(motion.axis.index() + 2);

            let rotated = self.basis.get(next).transform(&rotation);
            self.basis.set(next, rotated);
            self.basis.set(third, axis.cross(rotated));

            increments.push(rotation);
        }

        if !increments.is_empty() {
            // 按产生顺序相乘后再乘上一帧的累计旋转：R = r_1 * ... * r_n * R_prev
            increments.push(self.rotation);
            self.rotation = RotationMatrix::compose(&increments);
        }

        for motion in motions.iter().filter(|m| m.kind == MotionKind::Translate) {
            let direction = self.basis.get(motion.axis);
            self.position =
                self.position + direction.scale(motion.sign.value() * self.translation_step);
        }

        if self.reorthonormalize_interval > 0 {
            self.updates_since_reorthonormalize += 1;
            if self.updates_since_reorthonormalize >= self.reorthonormalize_interval {
                self.reorthonormalize();
            }
        }
    }

    /// 分别对基向量和累计旋转矩阵的列做 Gram-Schmidt 正交化
    ///
    /// 同一帧内有多个旋转时两者并不逐位相等，互不覆盖。
    pub fn reorthonormalize(&mut self) {
        self.basis = self.basis.gram_schmidt();
        let Basis { i, j, k } = Basis::from_columns(&self.rotation).gram_schmidt();
        self.rotation = RotationMatrix::from_basis(i, j, k);
        self.updates_since_reorthonormalize = 0;
    }

    /// 基向量与累计旋转矩阵中较大的正交性误差
    pub fn orthonormality_error(&self) -> f32 {
        self.basis
            .orthonormality_error()
            .max(Basis::from_columns(&self.rotation).orthonormality_error())
    }

    /// 世界坐标 -> 相机坐标：先平移，再乘累计旋转的转置（即逆）
    pub fn transform(&self, world_point: Vector3H) -> Vector3H {
        (world_point - self.position).transform(&self.rotation.transpose())
    }

    /// 同一帧内批量变换时复用的逆旋转
    pub fn view_rotation(&self) -> RotationMatrix {
        self.rotation.transpose()
    }
}

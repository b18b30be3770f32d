use crate::geometry::camera::Camera;
use crate::geometry::matrix::RotationMatrix;
use crate::geometry::plane::Plane;
use crate::geometry::triangle::{TexturedTriangle, Triangle};
use crate::geometry::vector::Vector3H;
use crate::materials::texture::Texture;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("几何三角形数量 ({geometry}) 与纹理坐标三角形数量 ({texcoords}) 不一致")]
    MismatchedAttributeCount { geometry: usize, texcoords: usize },
}

/// 带纹理的三角网格
///
/// 每个元素把几何三角形和纹理坐标三角形绑在一起，所有操作都返回新的网格，
/// 原网格保持只读。纹理通过 `Arc` 共享。
#[derive(Debug, Clone)]
pub struct Mesh {
    triangles: Vec<TexturedTriangle>,
    texture: Arc<Texture>,
}

impl Mesh {
    pub fn new(triangles: Vec<TexturedTriangle>, texture: Arc<Texture>) -> Self {
        Self { triangles, texture }
    }

    /// 由下标对齐的两个并行列表构造，长度不一致时报错
    pub fn from_parallel(
        geometry: Vec<Triangle>,
        texcoords: Vec<Triangle>,
        texture: Arc<Texture>,
    ) -> Result<Self, MeshError> {
        if geometry.len() != texcoords.len() {
            return Err(MeshError::MismatchedAttributeCount {
                geometry: geometry.len(),
                texcoords: texcoords.len(),
            });
        }
        let triangles = geometry
            .into_iter()
            .zip(texcoords)
            .map(|(g, t)| TexturedTriangle::new(g, t))
            .collect();
        Ok(Self::new(triangles, texture))
    }

    pub fn triangles(&self) -> &[TexturedTriangle] {
        &self.triangles
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// 共享同一纹理的新网格
    pub fn with_triangles(&self, triangles: Vec<TexturedTriangle>) -> Mesh {
        Mesh::new(triangles, Arc::clone(&self.texture))
    }

    /// 只变换几何顶点，纹理坐标原样保留
    pub fn map_geometry<F>(&self, mut f: F) -> Mesh
    where
        F: FnMut(Vector3H) -> Vector3H,
    {
        let triangles = self
            .triangles
            .iter()
            .map(|t| TexturedTriangle::new(t.geometry.map_vertices(&mut f), t.texcoords.clone()))
            .collect();
        self.with_triangles(triangles)
    }

    /// 世界坐标 -> 相机坐标
    pub fn to_camera_space(&self, camera: &Camera) -> Mesh {
        let view = camera.view_rotation();
        let origin = camera.position;
        self.map_geometry(|v| (v - origin).transform(&view))
    }

    /// 背面剔除，仅在相机空间（相机位于原点）中有意义
    pub fn filter_visible(&self) -> Mesh {
        let triangles = self
            .triangles
            .iter()
            .filter(|t| t.geometry.is_front_facing())
            .cloned()
            .collect();
        self.with_triangles(triangles)
    }

    /// 对每个三角形做成对裁剪并拼接结果
    pub fn clip(&self, plane: &Plane) -> Mesh {
        let triangles = self
            .triangles
            .iter()
            .flat_map(|t| t.clip(plane))
            .collect();
        self.with_triangles(triangles)
    }

    pub fn translated(&self, offset: Vector3H) -> Mesh {
        self.map_geometry(|v| v + offset)
    }

    /// 绕过原点的 `axis` 旋转；零长度的轴没有方向，原样返回
    pub fn rotated(&self, axis: Vector3H, angle: f32) -> Mesh {
        if axis.length() <= f32::EPSILON {
            return self.clone();
        }
        let rotation = RotationMatrix::from_axis_angle(axis, angle);
        self.map_geometry(|v| v.transform(&rotation))
    }
}

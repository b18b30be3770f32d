use crate::core::mesh::Mesh;
use crate::core::renderer::Pipeline;
use crate::geometry::camera::Camera;
use crate::io::obj_loader::load_obj_mesh;
use crate::io::render_settings::{MeshSettings, RenderSettings, parse_vec3};
use crate::io::texture_loader::load_texture_or_checkerboard;
use crate::utils::demo_meshes::textured_cube;
use log::info;
use std::path::Path;
use std::time::Instant;

/// 渲染循环开始前的资源准备：网格、纹理、相机和管线
pub struct ResourceLoader;

impl ResourceLoader {
    pub fn load_meshes(settings: &RenderSettings) -> Result<Vec<Mesh>, String> {
        let load_start = Instant::now();
        let meshes = settings
            .meshes
            .iter()
            .map(Self::load_mesh)
            .collect::<Result<Vec<_>, _>>()?;

        let triangles: usize = meshes.iter().map(Mesh::len).sum();
        info!(
            "场景加载完成: {} 个网格, {} 个三角形, 耗时 {:?}",
            meshes.len(),
            triangles,
            load_start.elapsed()
        );
        Ok(meshes)
    }

    /// 先绕自身原点旋转，再平移到指定位置
    pub fn load_mesh(mesh_settings: &MeshSettings) -> Result<Mesh, String> {
        let texture = load_texture_or_checkerboard(mesh_settings.texture.as_deref());

        let mesh = match &mesh_settings.obj {
            Some(obj_path) => {
                if !Path::new(obj_path).exists() {
                    return Err(format!("错误：OBJ 文件未找到：{}", obj_path));
                }
                load_obj_mesh(obj_path, texture)?
            }
            None => textured_cube(2.0, texture),
        };

        let position = parse_vec3(&mesh_settings.position)?;
        let mesh = if mesh_settings.rotation_degrees != 0.0 {
            let axis = parse_vec3(&mesh_settings.rotation_axis)?;
            mesh.rotated(axis, mesh_settings.rotation_degrees.to_radians())
        } else {
            mesh
        };

        Ok(mesh.translated(position))
    }

    pub fn create_camera(settings: &RenderSettings) -> Result<Camera, String> {
        Ok(Camera::new(settings.camera_position_vec()?)
            .with_steps(settings.rotation_step, settings.translation_step)
            .with_reorthonormalize_interval(settings.reorthonormalize_interval))
    }

    pub fn create_pipeline(settings: &RenderSettings) -> Result<Pipeline, String> {
        Pipeline::new(
            settings.width,
            settings.height,
            settings.fov_radians(),
            settings.camera_near,
            settings.camera_far,
        )
    }
}

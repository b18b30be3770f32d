//! OBJ 网格加载
//!
//! OBJ 使用右手系、逆时针为正面；渲染器使用 x 右、y 上、z 向前的坐标系，
//! 正面满足 `(v1 - v0) × (v2 - v0)` 指向外侧。转换方式：z 取反，
//! 并交换每个面的第二、三个顶点（纹理坐标同步交换）。纹理行自上而下存储，
//! 因此 v 翻转为 `1 - v`。

use crate::core::mesh::Mesh;
use crate::geometry::triangle::{TexturedTriangle, Triangle};
use crate::geometry::vector::Vector3H;
use crate::materials::texture::Texture;
use log::{debug, info, warn};
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,   // 将所有面转换为三角形
        single_index: false, // 位置和纹理坐标各自使用独立索引
        ignore_points: true,
        ignore_lines: true,
    }
}

/// 从文件加载 OBJ，所有子模型合并为一个共享 `texture` 的网格
pub fn load_obj_mesh<P: AsRef<Path>>(obj_path: P, texture: Arc<Texture>) -> Result<Mesh, String> {
    let obj_path = obj_path.as_ref();
    info!("加载 OBJ 文件: {:?}", obj_path);

    let (models, _materials) = tobj::load_obj(obj_path, &load_options())
        .map_err(|e| format!("加载 OBJ {:?} 失败: {}", obj_path, e))?;

    let mesh = models_to_mesh(&models, texture)?;
    info!("OBJ 加载完成: {} 个模型, {} 个三角形", models.len(), mesh.len());
    Ok(mesh)
}

/// 从内存中的 OBJ 文本加载，忽略 mtllib
pub fn parse_obj_source(source: &str, texture: Arc<Texture>) -> Result<Mesh, String> {
    let mut reader = BufReader::new(source.as_bytes());
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|e| format!("解析 OBJ 失败: {}", e))?;

    models_to_mesh(&models, texture)
}

fn models_to_mesh(models: &[tobj::Model], texture: Arc<Texture>) -> Result<Mesh, String> {
    let mut triangles = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        if mesh.indices.len() % 3 != 0 {
            return Err(format!(
                "模型 '{}' 的三角形索引数量 ({}) 不是3的倍数",
                model.name,
                mesh.indices.len()
            ));
        }

        let has_texcoords =
            !mesh.texcoords.is_empty() && mesh.texcoord_indices.len() == mesh.indices.len();
        if !has_texcoords {
            debug!("模型 '{}' 没有纹理坐标，使用 (0, 0)", model.name);
        }

        let vertex_count = mesh.positions.len() / 3;
        let texcoord_count = mesh.texcoords.len() / 2;
        let mut skipped = 0;

        for (face, corners) in mesh.indices.chunks_exact(3).enumerate() {
            if corners.iter().any(|&i| i as usize >= vertex_count) {
                skipped += 1;
                continue;
            }
            let position = |i: u32| {
                let i = i as usize * 3;
                Vector3H::new(
                    mesh.positions[i],
                    mesh.positions[i + 1],
                    -mesh.positions[i + 2],
                )
            };

            let uv_corners = if has_texcoords {
                let t = &mesh.texcoord_indices[face * 3..face * 3 + 3];
                if t.iter().any(|&i| i as usize >= texcoord_count) {
                    skipped += 1;
                    continue;
                }
                [t[0], t[1], t[2]].map(|i| {
                    let i = i as usize * 2;
                    Vector3H::new(mesh.texcoords[i], 1.0 - mesh.texcoords[i + 1], 1.0)
                })
            } else {
                [Vector3H::new(0.0, 0.0, 1.0); 3]
            };

            // 交换第二、三个顶点以保持正面朝外
            triangles.push(TexturedTriangle::new(
                Triangle::new(
                    position(corners[0]),
                    position(corners[2]),
                    position(corners[1]),
                ),
                Triangle::new(uv_corners[0], uv_corners[2], uv_corners[1]),
            ));
        }

        if skipped > 0 {
            warn!("模型 '{}' 中有 {} 个面包含越界索引，已跳过", model.name, skipped);
        }
    }

    Ok(Mesh::new(triangles, texture))
}

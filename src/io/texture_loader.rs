use crate::materials::texture::Texture;
use crate::utils::demo_meshes::default_checkerboard;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

/// 解码图像文件为 RGBA8 纹理
pub fn load_texture<P: AsRef<Path>>(texture_path: P) -> Result<Texture, String> {
    let texture_path = texture_path.as_ref();
    let img = image::open(texture_path)
        .map_err(|e| format!("加载纹理 {:?} 失败: {}", texture_path, e))?
        .to_rgba8();

    let texture = Texture::from_rgba_image(&img)
        .map_err(|e| format!("纹理 {:?} 无效: {}", texture_path, e))?;
    info!(
        "纹理已加载: {:?} ({}x{})",
        texture_path,
        texture.width(),
        texture.height()
    );
    Ok(texture)
}

/// 未指定纹理或加载失败时退回到棋盘格
pub fn load_texture_or_checkerboard(texture_path: Option<&str>) -> Arc<Texture> {
    match texture_path {
        Some(path) => match load_texture(path) {
            Ok(texture) => Arc::new(texture),
            Err(e) => {
                warn!("{}，使用棋盘格纹理", e);
                Arc::new(default_checkerboard())
            }
        },
        None => Arc::new(default_checkerboard()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_texture_falls_back_to_checkerboard() {
        assert!(load_texture("no/such/texture.png").is_err());
        let texture = load_texture_or_checkerboard(Some("no/such/texture.png"));
        assert_eq!(texture.width(), 64);
        assert_eq!(texture.height(), 64);
    }
}

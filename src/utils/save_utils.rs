use crate::materials::color::apply_colormap_jet;
use image::ColorType;
use log::debug;
use std::path::Path;

/// 保存 RGBA 图像数据到 PNG 文件，必要时创建父目录
///
/// # 参数
/// * `path` - 输出文件路径
/// * `data` - RGBA 数据，每像素 4 字节
/// * `width` - 图像宽度
/// * `height` - 图像高度
pub fn save_rgba_image(path: &Path, data: &[u8], width: usize, height: usize) -> Result<(), String> {
    if data.len() != width * height * 4 {
        return Err(format!(
            "图像数据长度 {} 与尺寸 {}x{} 不符",
            data.len(),
            width,
            height
        ));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("创建输出目录 {:?} 失败: {}", parent, e))?;
        }
    }

    image::save_buffer(path, data, width as u32, height as u32, ColorType::Rgba8)
        .map_err(|e| format!("保存图像到 {:?} 时出错: {}", path, e))?;
    debug!("图像已保存到 {:?}", path);
    Ok(())
}

/// 把倒数深度缓冲归一化到 [0, 1]
///
/// 缓冲区存的是 1/z（越大越近，0 表示未覆盖）。只在被覆盖的像素上求范围，
/// 最近处为 1，最远处为 0；未覆盖像素返回 NaN，着色时会变成黑色。
pub fn normalize_depth(inv_depth_buffer: &[f32]) -> Vec<f32> {
    let (min, max) = inv_depth_buffer
        .iter()
        .filter(|&&d| d > 0.0 && d.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &d| {
            (lo.min(d), hi.max(d))
        });

    if min > max {
        return vec![f32::NAN; inv_depth_buffer.len()];
    }

    let range = max - min;
    let inv_range = if range > 1e-12 { 1.0 / range } else { 0.0 };

    inv_depth_buffer
        .iter()
        .map(|&d| {
            if d > 0.0 && d.is_finite() {
                if inv_range > 0.0 {
                    (d - min) * inv_range
                } else {
                    1.0
                }
            } else {
                f32::NAN
            }
        })
        .collect()
}

/// 以 JET 伪彩色保存深度图（越近越热）
pub fn save_depth_map(
    path: &Path,
    inv_depth_buffer: &[f32],
    width: usize,
    height: usize,
) -> Result<(), String> {
    let colored = apply_colormap_jet(&normalize_depth(inv_depth_buffer));
    save_rgba_image(path, &colored, width, height)
}

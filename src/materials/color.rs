/// RGBA8 像素
pub type Rgba = [u8; 4];

pub const BLACK: Rgba = [0, 0, 0, 255];
pub const WHITE: Rgba = [255, 255, 255, 255];

pub fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    [r, g, b, 255]
}

/// 将 [0,1] 内的归一化值映射为 JET 伪彩色（蓝 -> 青 -> 绿 -> 黄 -> 红）
///
/// 非有限值映射为黑色。
pub fn jet(value: f32) -> Rgba {
    if !value.is_finite() {
        return BLACK;
    }
    let value = value.clamp(0.0, 1.0);

    let (r, g, b) = if value <= 0.25 {
        (0.0, value * 4.0, 1.0)
    } else if value <= 0.5 {
        (0.0, 1.0, 1.0 - (value - 0.25) * 4.0)
    } else if value <= 0.75 {
        ((value - 0.5) * 4.0, 1.0, 0.0)
    } else {
        (1.0, 1.0 - (value - 0.75) * 4.0, 0.0)
    };

    [to_u8(r), to_u8(g), to_u8(b), 255]
}

fn to_u8(channel: f32) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// 按 JET 色表批量着色，输出紧密排列的 RGBA 字节
pub fn apply_colormap_jet(normalized: &[f32]) -> Vec<u8> {
    normalized.iter().flat_map(|&v| jet(v)).collect()
}

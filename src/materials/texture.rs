use crate::materials::color::Rgba;
use image::RgbaImage;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("纹理尺寸不能为零: {width}x{height}")]
    Empty { width: usize, height: usize },
    #[error("像素数量 {actual} 与尺寸 {width}x{height} 不符")]
    PixelCountMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },
}

/// 不可变的 RGBA8 纹理，像素按行主序存储
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Texture {
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        if pixels.len() != width * height {
            return Err(TextureError::PixelCountMismatch {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn solid(color: Rgba) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    /// 棋盘格纹理，`cell` 为每格边长（像素）
    pub fn checkerboard(width: usize, height: usize, cell: usize, a: Rgba, b: Rgba) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let cell = cell.max(1);
        let pixels = (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| if (x / cell + y / cell) % 2 == 0 { a } else { b })
            })
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgba_image(img: &RgbaImage) -> Result<Self, TextureError> {
        let pixels = img.pixels().map(|p| p.0).collect();
        Self::new(img.width() as usize, img.height() as usize, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y.min(self.height - 1) * self.width + x.min(self.width - 1)]
    }

    /// 最近邻采样：`(round(u·(w-1)), round(v·(h-1)))`，超出 [0,1] 的坐标夹到边缘
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        let x = (u * (self.width - 1) as f32).round();
        let y = (v * (self.height - 1) as f32).round();
        let x = if x.is_finite() { x.max(0.0) as usize } else { 0 };
        let y = if y.is_finite() { y.max(0.0) as usize } else { 0 };
        self.pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::color::{BLACK, WHITE};

    #[test]
    fn rejects_mismatched_pixel_count() {
        let err = Texture::new(2, 2, vec![WHITE; 3]).unwrap_err();
        assert_eq!(
            err,
            TextureError::PixelCountMismatch {
                width: 2,
                height: 2,
                actual: 3
            }
        );
        assert!(Texture::new(0, 4, vec![]).is_err());
    }

    #[test]
    fn sample_rounds_to_nearest_texel() {
        let tex = Texture::new(2, 2, vec![[1, 0, 0, 255], [2, 0, 0, 255], [3, 0, 0, 255], [4, 0, 0, 255]])
            .unwrap();
        assert_eq!(tex.sample(0.0, 0.0)[0], 1);
        assert_eq!(tex.sample(0.6, 0.0)[0], 2);
        assert_eq!(tex.sample(0.4, 0.9)[0], 3);
        assert_eq!(tex.sample(1.0, 1.0)[0], 4);
    }

    #[test]
    fn sample_clamps_out_of_range() {
        let tex = Texture::checkerboard(4, 4, 2, WHITE, BLACK);
        assert_eq!(tex.sample(-3.0, -1.0), tex.pixel(0, 0));
        assert_eq!(tex.sample(7.0, 2.0), tex.pixel(3, 3));
        assert_eq!(tex.sample(f32::NAN, 0.0), tex.pixel(0, 0));
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let tex = Texture::checkerboard(4, 4, 2, WHITE, BLACK);
        assert_eq!(tex.pixel(0, 0), WHITE);
        assert_eq!(tex.pixel(2, 0), BLACK);
        assert_eq!(tex.pixel(2, 2), WHITE);
    }
}

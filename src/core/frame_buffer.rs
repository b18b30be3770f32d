use crate::materials::color::{BLACK, Rgba};

/// 帧缓冲区实现，存储渲染结果
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    /// 存储倒数深度 1/z，数值越大表示越近；清空后为 0（无穷远）
    pub depth_buffer: Vec<f32>,
    /// 存储 RGBA 颜色值，每像素 4 字节
    pub color_buffer: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let num_pixels = width * height;
        let mut frame_buffer = FrameBuffer {
            width,
            height,
            depth_buffer: vec![0.0; num_pixels],
            color_buffer: vec![0; num_pixels * 4],
        };
        frame_buffer.clear();
        frame_buffer
    }

    /// 颜色清为不透明黑色，深度清为 0
    pub fn clear(&mut self) {
        self.depth_buffer.fill(0.0);
        for pixel in self.color_buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&BLACK);
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth_buffer[self.index(x, y)]
    }

    pub fn color_at(&self, x: usize, y: usize) -> Rgba {
        let i = self.index(x, y) * 4;
        [
            self.color_buffer[i],
            self.color_buffer[i + 1],
            self.color_buffer[i + 2],
            self.color_buffer[i + 3],
        ]
    }

    /// 倒数深度测试：新值严格大于已存值才写入
    #[inline]
    pub fn passes_depth_test(&self, index: usize, inv_depth: f32) -> bool {
        inv_depth > self.depth_buffer[index]
    }

    #[inline]
    pub fn write(&mut self, index: usize, inv_depth: f32, color: Rgba) {
        self.depth_buffer[index] = inv_depth;
        self.color_buffer[index * 4..index * 4 + 4].copy_from_slice(&color);
    }

    /// 获取颜色缓冲区的字节数据
    pub fn get_color_buffer_bytes(&self) -> &[u8] {
        &self.color_buffer
    }

    /// 获取深度缓冲区的浮点数据
    pub fn get_depth_buffer_f32(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// 被写入过的像素数量
    pub fn covered_pixels(&self) -> usize {
        self.depth_buffer.iter().filter(|&&d| d > 0.0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::color::WHITE;

    #[test]
    fn clear_resets_color_and_depth() {
        let mut fb = FrameBuffer::new(4, 3);
        let i = fb.index(2, 1);
        fb.write(i, 0.5, WHITE);
        assert_eq!(fb.color_at(2, 1), WHITE);
        fb.clear();
        assert_eq!(fb.color_at(2, 1), BLACK);
        assert_eq!(fb.depth_at(2, 1), 0.0);
        assert_eq!(fb.covered_pixels(), 0);
    }

    #[test]
    fn nearer_reciprocal_depth_wins() {
        let mut fb = FrameBuffer::new(2, 2);
        let i = fb.index(1, 1);
        assert!(fb.passes_depth_test(i, 0.1));
        fb.write(i, 0.5, WHITE);
        assert!(!fb.passes_depth_test(i, 0.2));
        assert!(!fb.passes_depth_test(i, 0.5));
        assert!(fb.passes_depth_test(i, 0.9));
    }
}

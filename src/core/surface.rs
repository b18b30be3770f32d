use crate::core::frame_buffer::FrameBuffer;
use crate::utils::save_utils::{save_depth_map, save_rgba_image};
use log::debug;
use std::path::PathBuf;

/// 帧缓冲区的最终输出目标（画布、窗口、文件序列……）
pub trait OutputSurface {
    fn present(&mut self, frame_index: usize, frame_buffer: &FrameBuffer) -> Result<(), String>;
}

/// 把最近一帧复制到内存中，供测试和嵌入方读取
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
    pub frames_presented: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

impl OutputSurface for MemorySurface {
    fn present(&mut self, _frame_index: usize, frame_buffer: &FrameBuffer) -> Result<(), String> {
        self.width = frame_buffer.width;
        self.height = frame_buffer.height;
        self.rgba.clear();
        self.rgba
            .extend_from_slice(frame_buffer.get_color_buffer_bytes());
        self.frames_presented += 1;
        Ok(())
    }
}

/// 逐帧写出 PNG 序列：`<output_dir>/<prefix>_<帧号>.png`
#[derive(Debug, Clone)]
pub struct PngSequence {
    pub output_dir: PathBuf,
    pub prefix: String,
    /// 每隔多少帧写一次（至少为 1）
    pub save_every: usize,
    pub save_depth: bool,
}

impl PngSequence {
    pub fn new(output_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
            save_every: 1,
            save_depth: false,
        }
    }

    pub fn with_save_every(mut self, save_every: usize) -> Self {
        self.save_every = save_every.max(1);
        self
    }

    pub fn with_depth(mut self, save_depth: bool) -> Self {
        self.save_depth = save_depth;
        self
    }

    pub fn frame_path(&self, frame_index: usize, suffix: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{:04}{}.png", self.prefix, frame_index, suffix))
    }
}

impl OutputSurface for PngSequence {
    fn present(&mut self, frame_index: usize, frame_buffer: &FrameBuffer) -> Result<(), String> {
        if frame_index % self.save_every != 0 {
            return Ok(());
        }

        let color_path = self.frame_path(frame_index, "");
        save_rgba_image(
            &color_path,
            frame_buffer.get_color_buffer_bytes(),
            frame_buffer.width,
            frame_buffer.height,
        )?;
        debug!("第 {} 帧已写入 {:?}", frame_index, color_path);

        if self.save_depth {
            let depth_path = self.frame_path(frame_index, "_depth");
            save_depth_map(
                &depth_path,
                frame_buffer.get_depth_buffer_f32(),
                frame_buffer.width,
                frame_buffer.height,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::color::WHITE;

    #[test]
    fn memory_surface_copies_frame() {
        let mut fb = FrameBuffer::new(3, 2);
        let i = fb.index(1, 1);
        fb.write(i, 1.0, WHITE);
        let mut surface = MemorySurface::new();
        surface.present(0, &fb).unwrap();
        assert_eq!(surface.pixel(1, 1), WHITE);
        assert_eq!(surface.rgba.len(), 3 * 2 * 4);
        assert_eq!(surface.frames_presented, 1);
    }

    #[test]
    fn png_sequence_names_frames() {
        let seq = PngSequence::new("out", "frame").with_save_every(0);
        assert_eq!(seq.save_every, 1);
        assert_eq!(seq.frame_path(7, "_depth"), PathBuf::from("out").join("frame_0007_depth.png"));
    }
}

use crate::core::frame_buffer::FrameBuffer;
use crate::core::mesh::Mesh;
use crate::core::projector::Projection;
use crate::core::rasterizer::fill;
use crate::core::surface::OutputSurface;
use crate::geometry::camera::Camera;
use crate::geometry::plane::Plane;
use crate::geometry::vector::Vector3H;
use log::debug;
use std::ops::AddAssign;
use std::time::Instant;

/// 单帧统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// 提交的三角形数
    pub submitted: usize,
    /// 背面剔除掉的三角形数
    pub culled: usize,
    /// 近/远平面裁剪后剩余的三角形数
    pub clipped_camera: usize,
    /// 屏幕边界裁剪后剩余的三角形数
    pub clipped_screen: usize,
    /// 至少写入了一个像素的三角形数
    pub rasterized: usize,
    pub pixels_written: usize,
}

impl AddAssign for FrameStats {
    fn add_assign(&mut self, other: FrameStats) {
        self.submitted += other.submitted;
        self.culled += other.culled;
        self.clipped_camera += other.clipped_camera;
        self.clipped_screen += other.clipped_screen;
        self.rasterized += other.rasterized;
        self.pixels_written += other.pixels_written;
    }
}

/// 渲染管线：持有帧缓冲区、投影参数以及六个裁剪平面
///
/// 平面顺序固定：先在相机空间按近、远平面裁剪（保证投影时 z 为正），
/// 投影后再按上、下、左、右四个屏幕边界裁剪。
pub struct Pipeline {
    pub frame_buffer: FrameBuffer,
    projection: Projection,
    near_plane: Plane,
    far_plane: Plane,
    screen_planes: [Plane; 4],
}

impl Pipeline {
    pub fn new(
        width: usize,
        height: usize,
        fov_rad: f32,
        z_near: f32,
        z_far: f32,
    ) -> Result<Self, String> {
        if width < 2 || height < 2 {
            return Err(format!("画布尺寸过小: {}x{}", width, height));
        }
        if !(z_near > 0.0) {
            return Err(format!("近平面距离必须为正数，当前为 {}", z_near));
        }
        if !(z_far > z_near) {
            return Err(format!(
                "远平面距离 ({}) 必须大于近平面距离 ({})",
                z_far, z_near
            ));
        }
        if !(fov_rad > 0.0 && fov_rad < std::f32::consts::PI) {
            return Err(format!("视场角超出范围: {} 弧度", fov_rad));
        }

        let max_x = (width - 1) as f32;
        let max_y = (height - 1) as f32;
        let screen_planes = [
            // 上
            Plane::new(Vector3H::ZERO, Vector3H::j()),
            // 下
            Plane::new(Vector3H::new(0.0, max_y, 0.0), -Vector3H::j()),
            // 左
            Plane::new(Vector3H::ZERO, Vector3H::i()),
            // 右
            Plane::new(Vector3H::new(max_x, 0.0, 0.0), -Vector3H::i()),
        ];

        Ok(Self {
            frame_buffer: FrameBuffer::new(width, height),
            projection: Projection::new(width, height, fov_rad),
            near_plane: Plane::new(Vector3H::new(0.0, 0.0, z_near), Vector3H::k()),
            far_plane: Plane::new(Vector3H::new(0.0, 0.0, z_far), -Vector3H::k()),
            screen_planes,
        })
    }

    pub fn width(&self) -> usize {
        self.frame_buffer.width
    }

    pub fn height(&self) -> usize {
        self.frame_buffer.height
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// 清空帧缓冲区并绘制所有网格，网格之间通过共享深度缓冲互相遮挡
    pub fn draw(&mut self, camera: &Camera, meshes: &[&Mesh]) -> FrameStats {
        self.frame_buffer.clear();
        let mut stats = FrameStats::default();
        for mesh in meshes {
            stats += self.draw_mesh(camera, mesh);
        }
        stats
    }

    fn draw_mesh(&mut self, camera: &Camera, mesh: &Mesh) -> FrameStats {
        let mut stats = FrameStats {
            submitted: mesh.len(),
            ..FrameStats::default()
        };

        let visible = mesh.to_camera_space(camera).filter_visible();
        stats.culled = mesh.len() - visible.len();

        let in_frustum = visible.clip(&self.near_plane).clip(&self.far_plane);
        stats.clipped_camera = in_frustum.len();
        if in_frustum.is_empty() {
            return stats;
        }

        let mut on_screen = self.projection.project(&in_frustum);
        for plane in &self.screen_planes {
            on_screen = on_screen.clip(plane);
        }
        stats.clipped_screen = on_screen.len();

        for triangle in on_screen.triangles() {
            let written = fill(triangle, on_screen.texture(), &mut self.frame_buffer);
            if written > 0 {
                stats.rasterized += 1;
                stats.pixels_written += written;
            }
        }

        stats
    }

    /// 绘制一帧并交给输出表面
    pub fn render(
        &mut self,
        frame_index: usize,
        camera: &Camera,
        meshes: &[&Mesh],
        surface: &mut dyn OutputSurface,
    ) -> Result<FrameStats, String> {
        let start_time = Instant::now();
        let stats = self.draw(camera, meshes);
        surface.present(frame_index, &self.frame_buffer)?;
        debug!(
            "第 {} 帧: 提交 {} / 剔除 {} / 视锥内 {} / 屏幕内 {} / 光栅化 {}，写入 {} 像素，耗时 {:?}",
            frame_index,
            stats.submitted,
            stats.culled,
            stats.clipped_camera,
            stats.clipped_screen,
            stats.rasterized,
            stats.pixels_written,
            start_time.elapsed()
        );
        Ok(stats)
    }
}

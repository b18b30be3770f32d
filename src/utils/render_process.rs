use crate::core::mesh::Mesh;
use crate::core::renderer::{FrameStats, Pipeline};
use crate::core::surface::OutputSurface;
use crate::geometry::camera::Camera;
use crate::io::controller::InputState;
use crate::io::render_settings::RenderSettings;
use log::info;
use std::time::Instant;

/// 一次完整运行的汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    pub totals: FrameStats,
}

/// 按运动脚本逐帧更新相机、渲染并输出
///
/// 第 0 帧使用初始相机；之后每帧先把脚本中的按键交给 `InputState`，
/// 再用得到的运动列表更新相机。
pub fn render_animation(
    settings: &RenderSettings,
    pipeline: &mut Pipeline,
    camera: &mut Camera,
    meshes: &[Mesh],
    surface: &mut dyn OutputSurface,
) -> Result<RunSummary, String> {
    let run_start = Instant::now();
    let mesh_refs: Vec<&Mesh> = meshes.iter().collect();
    let mut input = InputState::new();
    let mut summary = RunSummary::default();

    info!(
        "开始渲染 {} 帧 ({}x{})，运动脚本覆盖 {} 帧",
        settings.frames,
        pipeline.width(),
        pipeline.height(),
        settings.scripted_frames()
    );

    for frame in 0..settings.frames {
        if frame > 0 {
            input.hold_exactly(settings.keys_at_frame(frame - 1));
            camera.update(&input.motions());
        }

        let stats = pipeline.render(frame, camera, &mesh_refs, surface)?;
        summary.totals += stats;
        summary.frames += 1;
    }

    info!(
        "渲染完成: {} 帧，共光栅化 {} 个三角形、写入 {} 像素，耗时 {:?}",
        summary.frames,
        summary.totals.rasterized,
        summary.totals.pixels_written,
        run_start.elapsed()
    );
    info!(
        "相机最终位置 ({:.3}, {:.3}, {:.3})，基向量正交误差 {:.2e}",
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera.orthonormality_error()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::MemorySurface;
    use crate::io::render_settings::MotionSegment;
    use crate::io::resource_loader::ResourceLoader;

    #[test]
    fn motion_script_moves_camera() {
        let settings = RenderSettings {
            width: 48,
            height: 32,
            frames: 11,
            motions: vec![MotionSegment {
                keys: "w".to_string(),
                frames: 10,
            }],
            ..RenderSettings::default()
        };
        let meshes = ResourceLoader::load_meshes(&settings).unwrap();
        let mut pipeline = ResourceLoader::create_pipeline(&settings).unwrap();
        let mut camera = ResourceLoader::create_camera(&settings).unwrap();
        let start_z = camera.position.z;
        let mut surface = MemorySurface::new();

        let summary =
            render_animation(&settings, &mut pipeline, &mut camera, &meshes, &mut surface)
                .unwrap();

        assert_eq!(summary.frames, 11);
        assert_eq!(surface.frames_presented, 11);
        assert!(summary.totals.pixels_written > 0);
        let moved = camera.position.z - start_z;
        assert!((moved - 10.0 * settings.translation_step).abs() < 1e-4);
    }
}

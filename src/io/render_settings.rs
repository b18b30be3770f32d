use crate::geometry::camera::{ROTATION_STEP, TRANSLATION_STEP};
use crate::geometry::vector::Vector3H;

/// 场景中的一个网格
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSettings {
    /// OBJ 文件路径；为空时使用内置立方体
    pub obj: Option<String>,
    /// 纹理路径；为空或加载失败时使用棋盘格
    pub texture: Option<String>,
    /// 平移，格式为 "x,y,z"
    pub position: String,
    /// 旋转轴，格式为 "x,y,z"
    pub rotation_axis: String,
    /// 绕旋转轴旋转的角度（度）
    pub rotation_degrees: f32,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            obj: None,
            texture: None,
            position: "0,0,0".to_string(),
            rotation_axis: "0,1,0".to_string(),
            rotation_degrees: 0.0,
        }
    }
}

/// 运动脚本中的一段：按住 `keys` 持续 `frames` 帧
///
/// `keys` 中的字符从左到右依次按下，越靠右越"新"。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionSegment {
    pub keys: String,
    pub frames: usize,
}

/// 所有可通过 TOML 配置的渲染参数
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    // ===== 文件路径设置 =====
    /// 输出文件的基础名称
    pub output: String,
    /// 输出图像的目录
    pub output_dir: String,

    // ===== 渲染基础设置 =====
    pub width: usize,
    pub height: usize,
    /// 渲染的总帧数
    pub frames: usize,
    /// 同时保存深度图
    pub save_depth: bool,
    /// 每隔多少帧保存一次
    pub save_every: usize,

    // ===== 相机参数 =====
    /// 相机初始位置，格式为 "x,y,z"
    pub camera_position: String,
    /// 视场角（度）
    pub camera_fov: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    /// 每帧旋转量（弧度）
    pub rotation_step: f32,
    /// 每帧平移量
    pub translation_step: f32,
    /// 每隔多少帧做一次基向量正交化，0 表示关闭
    pub reorthonormalize_interval: u32,

    // ===== 场景 =====
    pub meshes: Vec<MeshSettings>,
    pub motions: Vec<MotionSegment>,
}

pub fn parse_vec3(s: &str) -> Result<Vector3H, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("'{}' 需要3个逗号分隔的值", s));
    }
    let mut values = [0.0_f32; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .trim()
            .parse::<f32>()
            .map_err(|e| format!("无效数字 '{}': {}", part, e))?;
    }
    Ok(Vector3H::new(values[0], values[1], values[2]))
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            output: "frame".to_string(),
            output_dir: "output_rust".to_string(),

            width: 640,
            height: 480,
            frames: 120,
            save_depth: false,
            save_every: 1,

            camera_position: "0,0,-4".to_string(),
            camera_fov: 90.0,
            camera_near: 0.1,
            camera_far: 1000.0,
            rotation_step: ROTATION_STEP,
            translation_step: TRANSLATION_STEP,
            reorthonormalize_interval: 600,

            meshes: vec![MeshSettings::default()],
            motions: Vec::new(),
        }
    }
}

impl RenderSettings {
    pub fn camera_position_vec(&self) -> Result<Vector3H, String> {
        parse_vec3(&self.camera_position)
    }

    pub fn fov_radians(&self) -> f32 {
        self.camera_fov.to_radians()
    }

    /// 运动脚本覆盖的帧数
    pub fn scripted_frames(&self) -> usize {
        self.motions.iter().map(|m| m.frames).sum()
    }

    /// 第 `frame` 帧按住的按键；脚本结束后不再有输入
    pub fn keys_at_frame(&self, frame: usize) -> &str {
        let mut start = 0;
        for segment in &self.motions {
            if frame < start + segment.frames {
                return &segment.keys;
            }
            start += segment.frames;
        }
        ""
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.width < 2 || self.height < 2 {
            return Err(format!(
                "错误: 图像尺寸至少为 2x2，当前为 {}x{}",
                self.width, self.height
            ));
        }
        if self.frames == 0 {
            return Err("错误: 帧数必须大于 0".to_string());
        }
        if self.save_every == 0 {
            return Err("错误: save_every 必须大于 0".to_string());
        }
        if !(self.camera_near > 0.0) {
            return Err(format!(
                "错误: 近平面距离必须为正数，当前为 {}",
                self.camera_near
            ));
        }
        if !(self.camera_far > self.camera_near) {
            return Err(format!(
                "错误: 远平面距离 ({}) 必须大于近平面距离 ({})",
                self.camera_far, self.camera_near
            ));
        }
        if !(self.camera_fov > 0.0 && self.camera_fov < 180.0) {
            return Err(format!(
                "错误: 视场角必须在 (0, 180) 度之间，当前为 {}",
                self.camera_fov
            ));
        }
        if self.camera_position_vec().is_err() {
            return Err("错误: 相机位置格式不正确，应为 x,y,z 格式".to_string());
        }

        for (index, mesh) in self.meshes.iter().enumerate() {
            if parse_vec3(&mesh.position).is_err() {
                return Err(format!(
                    "错误: 第 {} 个网格的位置格式不正确，应为 x,y,z 格式",
                    index
                ));
            }
            let axis = parse_vec3(&mesh.rotation_axis).map_err(|_| {
                format!(
                    "错误: 第 {} 个网格的旋转轴格式不正确，应为 x,y,z 格式",
                    index
                )
            })?;
            if mesh.rotation_degrees != 0.0 && axis.length() <= f32::EPSILON {
                return Err(format!("错误: 第 {} 个网格的旋转轴为零向量", index));
            }
        }

        Ok(())
    }
}

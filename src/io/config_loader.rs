use crate::io::render_settings::{MeshSettings, MotionSegment, RenderSettings};
use log::warn;
use std::path::Path;
use toml::Value;

/// TOML 场景配置的读写
pub struct TomlConfigLoader;

impl TomlConfigLoader {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RenderSettings, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("读取配置文件 {:?} 失败: {}", path.as_ref(), e))?;

        Self::load_from_content(&content)
    }

    pub fn load_from_content(content: &str) -> Result<RenderSettings, String> {
        let toml_value: Value =
            toml::from_str(content).map_err(|e| format!("解析TOML失败: {}", e))?;

        Self::parse_toml_to_settings(toml_value)
    }

    pub fn save_to_file<P: AsRef<Path>>(settings: &RenderSettings, path: P) -> Result<(), String> {
        let toml_content = Self::settings_to_toml(settings);
        std::fs::write(path, toml_content).map_err(|e| format!("写入配置文件失败: {}", e))
    }

    /// 内置立方体 + 一段简短的运动脚本
    pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<(), String> {
        Self::save_to_file(&Self::example_settings(), path)
            .map_err(|e| format!("创建示例配置失败: {}", e))
    }

    pub fn example_settings() -> RenderSettings {
        RenderSettings {
            frames: 240,
            meshes: vec![
                MeshSettings {
                    rotation_axis: "1,1,0".to_string(),
                    rotation_degrees: 30.0,
                    ..MeshSettings::default()
                },
                MeshSettings {
                    position: "2.5,0,3".to_string(),
                    ..MeshSettings::default()
                },
            ],
            motions: vec![
                MotionSegment {
                    keys: "w".to_string(),
                    frames: 60,
                },
                MotionSegment {
                    keys: "l".to_string(),
                    frames: 60,
                },
                MotionSegment {
                    keys: "dj".to_string(),
                    frames: 60,
                },
                MotionSegment {
                    keys: "o".to_string(),
                    frames: 60,
                },
            ],
            ..RenderSettings::default()
        }
    }

    // ===== TOML -> RenderSettings 转换 =====

    fn parse_toml_to_settings(toml: Value) -> Result<RenderSettings, String> {
        let mut settings = RenderSettings::default();

        // [files] 部分
        if let Some(files) = toml.get("files").and_then(|v| v.as_table()) {
            Self::parse_files_section(&mut settings, files)?;
        }

        // [render] 部分
        if let Some(render) = toml.get("render").and_then(|v| v.as_table()) {
            Self::parse_render_section(&mut settings, render)?;
        }

        // [camera] 部分
        if let Some(camera) = toml.get("camera").and_then(|v| v.as_table()) {
            Self::parse_camera_section(&mut settings, camera)?;
        }

        // [[mesh]] 数组；缺省时保留默认的单个立方体
        if let Some(meshes) = toml.get("mesh").and_then(|v| v.as_array()) {
            settings.meshes = meshes
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    value
                        .as_table()
                        .ok_or_else(|| format!("第{}个网格不是表", i + 1))
                        .and_then(Self::parse_single_mesh)
                        .map_err(|e| format!("第{}个网格解析失败: {}", i + 1, e))
                })
                .collect::<Result<_, _>>()?;
        }

        // [[motion]] 数组
        if let Some(motions) = toml.get("motion").and_then(|v| v.as_array()) {
            settings.motions = motions
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    value
                        .as_table()
                        .ok_or_else(|| format!("第{}段运动不是表", i + 1))
                        .and_then(Self::parse_single_motion)
                        .map_err(|e| format!("第{}段运动解析失败: {}", i + 1, e))
                })
                .collect::<Result<_, _>>()?;
        }

        Ok(settings)
    }

    // ===== 各个section的解析方法 =====

    fn parse_files_section(
        settings: &mut RenderSettings,
        files: &toml::Table,
    ) -> Result<(), String> {
        if let Some(output) = files.get("output").and_then(|v| v.as_str()) {
            settings.output = output.to_string();
        }
        if let Some(output_dir) = files.get("output_dir").and_then(|v| v.as_str()) {
            settings.output_dir = output_dir.to_string();
        }
        Ok(())
    }

    fn parse_render_section(
        settings: &mut RenderSettings,
        render: &toml::Table,
    ) -> Result<(), String> {
        if let Some(width) = get_usize(render, "width")? {
            settings.width = width;
        }
        if let Some(height) = get_usize(render, "height")? {
            settings.height = height;
        }
        if let Some(frames) = get_usize(render, "frames")? {
            settings.frames = frames;
        }
        if let Some(save_depth) = render.get("save_depth").and_then(|v| v.as_bool()) {
            settings.save_depth = save_depth;
        }
        if let Some(save_every) = get_usize(render, "save_every")? {
            if save_every == 0 {
                warn!("save_every 不能为 0，使用 1");
                settings.save_every = 1;
            } else {
                settings.save_every = save_every;
            }
        }
        Ok(())
    }

    fn parse_camera_section(
        settings: &mut RenderSettings,
        camera: &toml::Table,
    ) -> Result<(), String> {
        if let Some(position) = camera.get("position").and_then(|v| v.as_str()) {
            settings.camera_position = position.to_string();
        }
        if let Some(fov) = get_f32(camera, "fov") {
            settings.camera_fov = fov;
        }
        if let Some(near) = get_f32(camera, "near") {
            settings.camera_near = near;
        }
        if let Some(far) = get_f32(camera, "far") {
            settings.camera_far = far;
        }
        if let Some(step) = get_f32(camera, "rotation_step") {
            settings.rotation_step = step;
        }
        if let Some(step) = get_f32(camera, "translation_step") {
            settings.translation_step = step;
        }
        if let Some(interval) = get_usize(camera, "reorthonormalize_interval")? {
            settings.reorthonormalize_interval = u32::try_from(interval)
                .map_err(|_| format!("reorthonormalize_interval 过大: {}", interval))?;
        }
        Ok(())
    }

    fn parse_single_mesh(table: &toml::Table) -> Result<MeshSettings, String> {
        let mut mesh = MeshSettings::default();
        if let Some(obj) = table.get("obj").and_then(|v| v.as_str()) {
            mesh.obj = Some(obj.to_string());
        }
        if let Some(texture) = table.get("texture").and_then(|v| v.as_str()) {
            mesh.texture = Some(texture.to_string());
        }
        if let Some(position) = table.get("position").and_then(|v| v.as_str()) {
            mesh.position = position.to_string();
        }
        if let Some(axis) = table.get("rotation_axis").and_then(|v| v.as_str()) {
            mesh.rotation_axis = axis.to_string();
        }
        if let Some(degrees) = get_f32(table, "rotation_degrees") {
            mesh.rotation_degrees = degrees;
        }
        Ok(mesh)
    }

    fn parse_single_motion(table: &toml::Table) -> Result<MotionSegment, String> {
        let keys = table
            .get("keys")
            .and_then(|v| v.as_str())
            .ok_or("运动段缺少keys字段")?;
        let frames = get_usize(table, "frames")?.ok_or("运动段缺少frames字段")?;
        Ok(MotionSegment {
            keys: keys.to_string(),
            frames,
        })
    }

    // ===== RenderSettings -> TOML 转换 =====

    pub fn settings_to_toml(settings: &RenderSettings) -> String {
        let mut content = String::new();

        content.push_str("# 扫描线光栅化渲染器配置文件\n\n");

        // [files] 部分
        content.push_str("[files]\n");
        content.push_str(&format!("output = {}\n", quote(&settings.output)));
        content.push_str(&format!("output_dir = {}\n", quote(&settings.output_dir)));
        content.push('\n');

        // [render] 部分
        content.push_str("[render]\n");
        content.push_str(&format!("width = {}\n", settings.width));
        content.push_str(&format!("height = {}\n", settings.height));
        content.push_str(&format!("frames = {}\n", settings.frames));
        content.push_str(&format!("save_depth = {}\n", settings.save_depth));
        content.push_str(&format!("save_every = {}\n", settings.save_every));
        content.push('\n');

        // [camera] 部分
        content.push_str("[camera]\n");
        content.push_str(&format!(
            "position = {}\n",
            quote(&settings.camera_position)
        ));
        content.push_str(&format!("fov = {:?}\n", settings.camera_fov));
        content.push_str(&format!("near = {:?}\n", settings.camera_near));
        content.push_str(&format!("far = {:?}\n", settings.camera_far));
        content.push_str(&format!("rotation_step = {:?}\n", settings.rotation_step));
        content.push_str(&format!(
            "translation_step = {:?}\n",
            settings.translation_step
        ));
        content.push_str(&format!(
            "reorthonormalize_interval = {}\n",
            settings.reorthonormalize_interval
        ));

        // [[mesh]] 数组
        for mesh in &settings.meshes {
            content.push_str("\n[[mesh]]\n");
            match &mesh.obj {
                Some(obj) => content.push_str(&format!("obj = {}\n", quote(obj))),
                None => content.push_str("# obj = \"path/to/model.obj\"  # 缺省为内置立方体\n"),
            }
            match &mesh.texture {
                Some(texture) => content.push_str(&format!("texture = {}\n", quote(texture))),
                None => content.push_str("# texture = \"path/to/texture.png\"  # 缺省为棋盘格\n"),
            }
            content.push_str(&format!("position = {}\n", quote(&mesh.position)));
            content.push_str(&format!("rotation_axis = {}\n", quote(&mesh.rotation_axis)));
            content.push_str(&format!(
                "rotation_degrees = {:?}\n",
                mesh.rotation_degrees
            ));
        }

        // [[motion]] 数组
        if !settings.motions.is_empty() {
            content.push_str(
                "\n# 运动脚本：平移 a/d e/q s/w，旋转 k/i j/l u/o；同一段内越靠右的键越新\n",
            );
        }
        for motion in &settings.motions {
            content.push_str("\n[[motion]]\n");
            content.push_str(&format!("keys = {}\n", quote(&motion.keys)));
            content.push_str(&format!("frames = {}\n", motion.frames));
        }

        content
    }
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// 整数和浮点数都接受
fn get_f32(table: &toml::Table, key: &str) -> Option<f32> {
    match table.get(key)? {
        Value::Float(f) => Some(*f as f32),
        Value::Integer(i) => Some(*i as f32),
        other => {
            warn!("配置项 {} 的值 {} 不是数字，已忽略", key, other);
            None
        }
    }
}

fn get_usize(table: &toml::Table, key: &str) -> Result<Option<usize>, String> {
    match table.get(key).and_then(|v| v.as_integer()) {
        Some(value) => usize::try_from(value)
            .map(Some)
            .map_err(|_| format!("配置项 {} 不能为负数: {}", key, value)),
        None => Ok(None),
    }
}

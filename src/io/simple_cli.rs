use crate::io::config_loader::TomlConfigLoader;
use crate::io::render_settings::RenderSettings;
use clap::Parser;
use log::info;

/// 命令行参数：场景全部由 TOML 配置描述，这里只做少量覆盖
#[derive(Parser, Debug)]
#[command(name = "scanline-rasterizer")]
#[command(about = "TOML 驱动的扫描线纹理光栅化渲染器")]
pub struct SimpleCli {
    /// 配置文件路径（TOML格式）
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// 写出示例配置并使用它渲染
    #[arg(long)]
    pub use_example_config: bool,

    /// 覆盖渲染帧数
    #[arg(long, value_name = "N")]
    pub frames: Option<usize>,

    /// 覆盖输出目录
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,
}

impl SimpleCli {
    /// 解析命令行并返回已校验的渲染设置
    pub fn process() -> Result<RenderSettings, String> {
        Self::parse().into_settings()
    }

    pub fn into_settings(self) -> Result<RenderSettings, String> {
        let mut settings = if self.use_example_config {
            let example_path = "example_scene.toml";
            TomlConfigLoader::create_example_config(example_path)?;
            info!("已创建示例配置: {}", example_path);
            TomlConfigLoader::load_from_file(example_path)
                .map_err(|e| format!("加载示例配置失败: {}", e))?
        } else if let Some(config_path) = &self.config {
            info!("加载配置文件: {}", config_path);
            TomlConfigLoader::load_from_file(config_path)
                .map_err(|e| format!("配置文件加载失败: {}", e))?
        } else {
            info!("未指定配置文件，使用默认设置");
            RenderSettings::default()
        };

        if let Some(frames) = self.frames {
            settings.frames = frames;
        }
        if let Some(output_dir) = self.output_dir {
            settings.output_dir = output_dir;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let cli = SimpleCli::parse_from(["scanline-rasterizer", "--frames", "3", "-o", "out_dir"]);
        let settings = cli.into_settings().unwrap();
        assert_eq!(settings.frames, 3);
        assert_eq!(settings.output_dir, "out_dir");
    }

    #[test]
    fn zero_frames_fail_validation() {
        let cli = SimpleCli::parse_from(["scanline-rasterizer", "--frames", "0"]);
        assert!(cli.into_settings().is_err());
    }
}

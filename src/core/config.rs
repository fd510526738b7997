//! 配置管理模块
//!
//! 提供外壳配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! 图形后端不在配置文件中选择：后端由编译目标在编译期唯一确定，
//! 详见 `gfx::select` 模块。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [window]
//! title = "PlatShell"
//! width = 800
//! height = 600
//! fullscreen = false
//!
//! [graphics]
//! vsync = true
//! clear_color = [0.1, 0.2, 0.3, 1.0]
//!
//! [audio]
//! sample_rate = 44100
//! channels = 2
//! ring_frames = 8192
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 外壳配置
///
/// 包含了外壳运行所需的所有配置项。
/// 可以从配置文件加载，也可以通过代码构建。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 图形配置
    #[serde(default)]
    pub graphics: GraphicsConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 窗口配置
///
/// 仅在窗口创建时应用一次，之后修改无效。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口标题
    #[serde(default = "default_title")]
    pub title: String,

    /// 窗口宽度
    #[serde(default = "default_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_height")]
    pub height: u32,

    /// 是否全屏（无边框全屏）
    #[serde(default = "default_fullscreen")]
    pub fullscreen: bool,
}

/// 图形配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsConfig {
    /// 垂直同步
    #[serde(default = "default_vsync")]
    pub vsync: bool,

    /// 帧清屏颜色（RGBA，0.0 ~ 1.0）
    #[serde(default = "default_clear_color")]
    pub clear_color: [f32; 4],
}

/// 音频配置
///
/// 输出流以固定采样率和声道数打开，运行期间不变。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// 采样率（Hz）
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// 声道数
    #[serde(default = "default_channels")]
    pub channels: u16,

    /// 提交环形缓冲容量（帧数）
    #[serde(default = "default_ring_frames")]
    pub ring_frames: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_title() -> String { "PlatShell".to_string() }
fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_fullscreen() -> bool { false }
fn default_vsync() -> bool { true }
fn default_clear_color() -> [f32; 4] { [0.1, 0.2, 0.3, 1.0] }
fn default_sample_rate() -> u32 { 44100 }
fn default_channels() -> u16 { 2 }
fn default_ring_frames() -> usize { 8192 }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "platshell.log".to_string() }

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            graphics: GraphicsConfig::default(),
            audio: AudioConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            fullscreen: default_fullscreen(),
        }
    }
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            vsync: default_vsync(),
            clear_color: default_clear_color(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            ring_frames: default_ring_frames(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回 `Config` 实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 从命令行参数覆盖配置
    ///
    /// # 说明
    ///
    /// 支持的参数：
    /// - `--title <value>`: 设置窗口标题
    /// - `--width <value>`: 设置窗口宽度
    /// - `--height <value>`: 设置窗口高度
    /// - `--fullscreen`: 以全屏方式启动
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--fullscreen") {
            self.window.fullscreen = true;
        }

        if let Some(idx) = args.iter().position(|a| a == "--title") {
            if let Some(title) = args.get(idx + 1) {
                self.window.title = title.clone();
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--width") {
            if let Some(width_str) = args.get(idx + 1) {
                if let Ok(width) = width_str.parse() {
                    self.window.width = width;
                }
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--height") {
            if let Some(height_str) = args.get(idx + 1) {
                if let Ok(height) = height_str.parse() {
                    self.window.height = height;
                }
            }
        }
    }

    /// 验证配置的有效性
    ///
    /// # 返回值
    ///
    /// 配置有效返回 `Ok(())`，否则返回错误
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "window.width/height".to_string(),
                reason: "Window dimensions must be greater than 0".to_string(),
            }.into());
        }

        if !(8_000..=192_000).contains(&self.audio.sample_rate) {
            return Err(ConfigError::InvalidValue {
                field: "audio.sample_rate".to_string(),
                reason: "Sample rate must be between 8000 and 192000 Hz".to_string(),
            }.into());
        }

        if self.audio.channels == 0 || self.audio.channels > 8 {
            return Err(ConfigError::InvalidValue {
                field: "audio.channels".to_string(),
                reason: "Channel count must be between 1 and 8".to_string(),
            }.into());
        }

        if self.audio.ring_frames == 0 {
            return Err(ConfigError::InvalidValue {
                field: "audio.ring_frames".to_string(),
                reason: "Ring capacity must be greater than 0".to_string(),
            }.into());
        }

        for component in self.graphics.clear_color {
            if !(0.0..=1.0).contains(&component) {
                return Err(ConfigError::InvalidValue {
                    field: "graphics.clear_color".to_string(),
                    reason: "Color components must be within 0.0 ~ 1.0".to_string(),
                }.into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert!(!config.window.fullscreen);
        assert_eq!(config.audio.sample_rate, 44100);
        assert_eq!(config.audio.channels, 2);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.window.width = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.audio.channels = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.graphics.clear_color = [0.0, 0.0, 2.0, 1.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        // 缺省字段由默认值补齐
        let config: Config = toml::from_str(
            r#"
            [window]
            title = "Demo"
            width = 1280

            [audio]
            sample_rate = 48000
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Demo");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.audio.sample_rate, 48000);
        assert_eq!(config.audio.channels, 2);
        assert!(config.graphics.vsync);
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args(["plat_shell", "--width", "1024", "--height", "768", "--fullscreen"]);

        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 768);
        assert!(config.window.fullscreen);
    }
}

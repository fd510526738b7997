//! 错误处理模块
//!
//! 定义了外壳中使用的统一错误类型。
//!
//! 错误分为两类对外语义：初始化错误（没有可用后端、设备或窗口创建失败）
//! 在任何回调执行之前致命地中止启动；应用回调内部的失败由应用自行负责，
//! 外壳不拦截、不重试。设备丢失没有自动恢复策略。

use std::fmt;

/// 外壳统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, ShellError>;

/// PlatShell 的错误类型
///
/// 包含了外壳启动和运行过程中可能遇到的各种错误情况。
#[derive(Debug)]
pub enum ShellError {
    /// 配置错误
    Config(ConfigError),

    /// 图形后端错误
    Graphics(GraphicsError),

    /// 音频输出错误
    Audio(AudioError),

    /// IO 错误
    Io(std::io::Error),

    /// 初始化错误
    Initialization(String),

    /// 运行时错误
    Runtime(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 图形后端相关的错误
#[derive(Debug)]
pub enum GraphicsError {
    /// 编译目标没有可识别的后端
    UnsupportedPlatform(String),

    /// 设备创建失败
    DeviceCreation(String),

    /// 窗口表面错误
    SurfaceError(String),

    /// 帧呈现失败
    PresentFailure(String),
}

/// 音频输出相关的错误
#[derive(Debug)]
pub enum AudioError {
    /// 找不到输出设备
    DeviceNotFound,

    /// 输出流打开失败
    StreamOpenFailed(String),

    /// 设备不支持请求的采样格式
    UnsupportedFormat(String),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Config(e) => write!(f, "Configuration error: {}", e),
            ShellError::Graphics(e) => write!(f, "Graphics error: {}", e),
            ShellError::Audio(e) => write!(f, "Audio error: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::Initialization(msg) => write!(f, "Initialization error: {}", msg),
            ShellError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::UnsupportedPlatform(target) => {
                write!(f, "No graphics backend recognized for target: {}", target)
            }
            GraphicsError::DeviceCreation(msg) => write!(f, "Device creation failed: {}", msg),
            GraphicsError::SurfaceError(msg) => write!(f, "Surface error: {}", msg),
            GraphicsError::PresentFailure(msg) => write!(f, "Frame presentation failed: {}", msg),
        }
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::DeviceNotFound => write!(f, "No default audio output device found"),
            AudioError::StreamOpenFailed(msg) => write!(f, "Failed to open output stream: {}", msg),
            AudioError::UnsupportedFormat(msg) => write!(f, "Unsupported sample format: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for GraphicsError {}
impl std::error::Error for AudioError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<ConfigError> for ShellError {
    fn from(err: ConfigError) -> Self {
        ShellError::Config(err)
    }
}

impl From<GraphicsError> for ShellError {
    fn from(err: GraphicsError) -> Self {
        ShellError::Graphics(err)
    }
}

impl From<AudioError> for ShellError {
    fn from(err: AudioError) -> Self {
        ShellError::Audio(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: ShellError = GraphicsError::UnsupportedPlatform("android".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Graphics error: No graphics backend recognized for target: android"
        );

        let err: ShellError = AudioError::DeviceNotFound.into();
        assert!(err.to_string().contains("output device"));
    }
}

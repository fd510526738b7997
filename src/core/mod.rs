//! 核心功能模块
//!
//! 本模块提供了外壳的基础功能，包括日志系统、配置管理、错误处理和事件模型。
//! 这些模块独立于具体的图形 API 和音频设备，可以在任何后端中使用。
//!
//! # 模块组织
//!
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件加载外壳设置
//! - `error`：错误处理，定义统一的错误类型
//! - `event`：事件模型，定义派发给应用回调的事件类型

pub mod log;
pub mod config;
pub mod error;
pub mod event;

// 重新导出常用类型，方便使用
pub use config::Config;
pub use error::{Result, ShellError};
pub use event::{
    Event, EventType,
    WindowResizeEvent, CloseRequestEvent,
    KeyEvent, KeyCode,
    PointerButtonEvent, PointerMoveEvent, ScrollEvent, PointerButton,
    FocusEvent,
};

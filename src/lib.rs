//! PlatShell - 跨平台应用外壳
//!
//! PlatShell 是一个最小化的跨平台应用外壳：按编译目标选择图形后端
//! （Direct3D 11 / Metal / GLES2 / OpenGL core），创建窗口、图形上下文
//! 和音频输出流，然后驱动平台运行循环，把生命周期回调派发给嵌入的应用。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理、事件模型）
//! - `gfx`: 图形后端抽象层（编译期选择，每个构建一个后端）
//! - `audio`: 音频输出（提交环形缓冲 + 平台输出流）
//! - `shell`: 平台外壳（上下文、生命周期驱动、运行循环）
//!
//! # 使用示例
//!
//! ```no_run
//! use plat_shell::core::Config;
//! use plat_shell::shell::{AppContext, Application, Shell};
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn on_frame(&mut self, ctx: &mut dyn AppContext) {
//!         // 每帧逻辑
//!     }
//! }
//!
//! let config = Config::from_file_or_default("config.toml");
//! Shell::new(config).run(MyApp).unwrap();
//! ```

pub mod core;
pub mod gfx;
pub mod audio;
pub mod shell;

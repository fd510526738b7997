//! OpenGL core 后端模块
//!
//! Linux / BSD 桌面平台的默认后端，通过 wgpu 的 GL 后端
//! 建立 OpenGL core 3.3 级别的上下文。

pub mod context;

pub use context::GlCoreContext;

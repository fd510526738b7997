//! OpenGL ES 2 后端模块
//!
//! Emscripten / Web 构建的默认后端，通过 wgpu 的 GL 后端
//! 建立 WebGL 级别的上下文。

pub mod context;

pub use context::Gles2Context;

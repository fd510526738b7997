//! Metal 后端模块
//!
//! macOS 平台的默认后端。

pub mod context;

pub use context::MetalContext;

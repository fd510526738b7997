//! Direct3D 11 后端模块
//!
//! Windows 平台的默认后端。

pub mod context;

pub use context::D3d11Context;

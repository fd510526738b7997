//! 图形后端模块
//!
//! 本模块封装了不同图形 API 的底层实现，包括：
//! - Direct3D 11：Windows 平台
//! - Metal：macOS 平台
//! - OpenGL ES 2：Emscripten / Web 构建
//! - OpenGL core 3.3：其余桌面平台
//!
//! 后端由编译目标在编译期唯一确定（见 `select` 模块），
//! 每次构建只编译并实例化其中一个。所有后端都实现统一的
//! `GraphicsContext` trait。

pub mod backend;
pub mod select;

#[cfg(target_os = "windows")]
pub mod d3d11;
#[cfg(target_os = "macos")]
pub mod metal;
#[cfg(any(target_os = "emscripten", target_family = "wasm"))]
pub mod gles2;
#[cfg(not(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "emscripten",
    target_family = "wasm"
)))]
pub mod glcore;

use tracing::info;
use winit::event_loop::EventLoop;
use winit::window::Window;

use crate::core::error::Result;
use crate::core::Config;

pub use backend::GraphicsContext;
pub use select::{active_backend, BackendSelection, Platform};

#[cfg(target_os = "windows")]
use d3d11::D3d11Context;
#[cfg(target_os = "macos")]
use metal::MetalContext;
#[cfg(any(target_os = "emscripten", target_family = "wasm"))]
use gles2::Gles2Context;
#[cfg(not(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "emscripten",
    target_family = "wasm"
)))]
use glcore::GlCoreContext;

/// 图形后端枚举
///
/// 每个构建目标只编译一个变体，这是编译期后端选择的载体：
/// 没有运行时分支可以切换到其他后端。
enum Backend {
    #[cfg(target_os = "windows")]
    D3d11(D3d11Context),
    #[cfg(target_os = "macos")]
    Metal(MetalContext),
    #[cfg(any(target_os = "emscripten", target_family = "wasm"))]
    Gles2(Gles2Context),
    #[cfg(not(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "emscripten",
        target_family = "wasm"
    )))]
    GlCore(GlCoreContext),
}

/// 统一的图形外观
///
/// 对外提供一致的 API，内部分发到当前构建激活的后端。
pub struct Graphics {
    backend: Backend,
    selection: BackendSelection,
}

impl Graphics {
    /// 创建图形外观
    ///
    /// 先确认当前编译目标有可识别的后端，再构建该后端的上下文。
    /// 任一步失败都是致命的初始化错误。
    ///
    /// # 参数
    ///
    /// * `event_loop` - winit 事件循环引用
    /// * `config` - 外壳配置
    pub fn new(event_loop: &EventLoop<()>, config: &Config) -> Result<Self> {
        let selection = active_backend()?;
        info!(backend = selection.name(), "Graphics backend selected");

        #[cfg(target_os = "windows")]
        let backend = Backend::D3d11(D3d11Context::new(event_loop, config)?);
        #[cfg(target_os = "macos")]
        let backend = Backend::Metal(MetalContext::new(event_loop, config)?);
        #[cfg(any(target_os = "emscripten", target_family = "wasm"))]
        let backend = Backend::Gles2(Gles2Context::new(event_loop, config)?);
        #[cfg(not(any(
            target_os = "windows",
            target_os = "macos",
            target_os = "emscripten",
            target_family = "wasm"
        )))]
        let backend = Backend::GlCore(GlCoreContext::new(event_loop, config)?);

        Ok(Self { backend, selection })
    }

    /// 当前激活的后端
    pub fn selection(&self) -> BackendSelection {
        self.selection
    }

    /// 获取窗口引用
    pub fn window(&self) -> &Window {
        match &self.backend {
            #[cfg(target_os = "windows")]
            Backend::D3d11(c) => c.window(),
            #[cfg(target_os = "macos")]
            Backend::Metal(c) => c.window(),
            #[cfg(any(target_os = "emscripten", target_family = "wasm"))]
            Backend::Gles2(c) => c.window(),
            #[cfg(not(any(
                target_os = "windows",
                target_os = "macos",
                target_os = "emscripten",
                target_family = "wasm"
            )))]
            Backend::GlCore(c) => c.window(),
        }
    }

    /// 获取后端名称
    pub fn backend_name(&self) -> &str {
        match &self.backend {
            #[cfg(target_os = "windows")]
            Backend::D3d11(c) => c.backend_name(),
            #[cfg(target_os = "macos")]
            Backend::Metal(c) => c.backend_name(),
            #[cfg(any(target_os = "emscripten", target_family = "wasm"))]
            Backend::Gles2(c) => c.backend_name(),
            #[cfg(not(any(
                target_os = "windows",
                target_os = "macos",
                target_os = "emscripten",
                target_family = "wasm"
            )))]
            Backend::GlCore(c) => c.backend_name(),
        }
    }

    /// 调整表面尺寸
    pub fn resize(&mut self, width: u32, height: u32) {
        match &mut self.backend {
            #[cfg(target_os = "windows")]
            Backend::D3d11(c) => c.resize(width, height),
            #[cfg(target_os = "macos")]
            Backend::Metal(c) => c.resize(width, height),
            #[cfg(any(target_os = "emscripten", target_family = "wasm"))]
            Backend::Gles2(c) => c.resize(width, height),
            #[cfg(not(any(
                target_os = "windows",
                target_os = "macos",
                target_os = "emscripten",
                target_family = "wasm"
            )))]
            Backend::GlCore(c) => c.resize(width, height),
        }
    }

    /// 呈现一帧
    pub fn present(&mut self, clear_color: [f32; 4]) -> Result<()> {
        match &mut self.backend {
            #[cfg(target_os = "windows")]
            Backend::D3d11(c) => c.present(clear_color),
            #[cfg(target_os = "macos")]
            Backend::Metal(c) => c.present(clear_color),
            #[cfg(any(target_os = "emscripten", target_family = "wasm"))]
            Backend::Gles2(c) => c.present(clear_color),
            #[cfg(not(any(
                target_os = "windows",
                target_os = "macos",
                target_os = "emscripten",
                target_family = "wasm"
            )))]
            Backend::GlCore(c) => c.present(clear_color),
        }
    }
}

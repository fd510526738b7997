//! Metal 图形后端实现
//!
//! 创建系统默认 Metal 设备和命令队列，并把 CAMetalLayer
//! 绑定到 winit 窗口的 NSView 上。呈现时在下一个 drawable
//! 上录制一个仅清屏的渲染通道。

use std::sync::Arc;
use tracing::{debug, info};
use core_graphics_types::geometry::CGSize;
use metal::{
    CommandQueue, Device, MTLClearColor, MTLLoadAction, MTLPixelFormat, MTLStoreAction,
    MetalLayer, RenderPassDescriptor,
};
use objc::rc::autoreleasepool;
use objc::runtime::YES;
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Fullscreen, Window, WindowBuilder};

use crate::core::error::{GraphicsError, Result};
use crate::core::Config;
use crate::gfx::backend::GraphicsContext;

/// Metal 图形后端
pub struct MetalContext {
    /// Metal 设备
    pub device: Device,
    /// 命令队列
    pub command_queue: CommandQueue,
    /// 绑定到窗口的 CAMetalLayer
    pub layer: MetalLayer,
    /// 窗口引用
    window: Arc<Window>,
}

impl MetalContext {
    /// 创建 Metal 后端实例
    ///
    /// # 参数
    ///
    /// * `event_loop` - winit 事件循环引用
    /// * `config` - 外壳配置
    ///
    /// # 返回值
    ///
    /// 返回初始化完成的 `MetalContext` 实例，任一步失败都返回错误
    pub fn new(event_loop: &EventLoop<()>, config: &Config) -> Result<Self> {
        info!("Initializing Metal backend");

        let fullscreen = if config.window.fullscreen {
            Some(Fullscreen::Borderless(None))
        } else {
            None
        };
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&config.window.title)
                .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
                .with_fullscreen(fullscreen)
                .build(event_loop)
                .map_err(|e| GraphicsError::DeviceCreation(format!("Failed to create window: {}", e)))?,
        );

        // 获取系统默认 Metal 设备
        let device = Device::system_default()
            .ok_or_else(|| GraphicsError::DeviceCreation("No Metal device available".to_string()))?;
        info!("Metal device: {}", device.name());

        let command_queue = device.new_command_queue();

        // 创建并配置 CAMetalLayer
        let layer = MetalLayer::new();
        layer.set_device(&device);
        layer.set_pixel_format(MTLPixelFormat::BGRA8Unorm);
        layer.set_presents_with_transaction(false);
        layer.set_display_sync_enabled(config.graphics.vsync);

        // 三重缓冲，避免 next_drawable 在高帧率下阻塞过久
        layer.set_maximum_drawable_count(3);

        // 将 Layer 绑定到窗口的 NSView
        let window_handle = window
            .window_handle()
            .map_err(|e| GraphicsError::SurfaceError(format!("Failed to get window handle: {}", e)))?;
        match window_handle.as_raw() {
            RawWindowHandle::AppKit(handle) => unsafe {
                use cocoa::appkit::NSView;
                let view = handle.ns_view.as_ptr() as cocoa::base::id;
                view.setWantsLayer(YES);
                view.setLayer(layer.as_ref() as *const _ as _);
            },
            _ => {
                return Err(GraphicsError::SurfaceError(
                    "Expected AppKit window handle on macOS platform".to_string(),
                )
                .into());
            }
        }

        let size = window.inner_size();
        layer.set_drawable_size(CGSize::new(size.width as f64, size.height as f64));

        debug!(width = size.width, height = size.height, "CAMetalLayer attached");
        info!("Metal backend initialized successfully");

        Ok(Self {
            device,
            command_queue,
            layer,
            window,
        })
    }
}

impl GraphicsContext for MetalContext {
    fn window(&self) -> &Window {
        &self.window
    }

    fn backend_name(&self) -> &str {
        "Metal"
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.layer
            .set_drawable_size(CGSize::new(width as f64, height as f64));
    }

    fn present(&mut self, clear_color: [f32; 4]) -> Result<()> {
        autoreleasepool(|| {
            let drawable = match self.layer.next_drawable() {
                Some(drawable) => drawable,
                // 窗口暂时没有可用的 drawable（如最小化），跳过这一帧
                None => return Ok(()),
            };

            let descriptor = RenderPassDescriptor::new();
            let attachment = descriptor
                .color_attachments()
                .object_at(0)
                .ok_or_else(|| {
                    GraphicsError::PresentFailure("Missing color attachment slot".to_string())
                })?;
            attachment.set_texture(Some(drawable.texture()));
            attachment.set_load_action(MTLLoadAction::Clear);
            attachment.set_clear_color(MTLClearColor::new(
                clear_color[0] as f64,
                clear_color[1] as f64,
                clear_color[2] as f64,
                clear_color[3] as f64,
            ));
            attachment.set_store_action(MTLStoreAction::Store);

            let command_buffer = self.command_queue.new_command_buffer();
            let encoder = command_buffer.new_render_command_encoder(descriptor);
            encoder.end_encoding();

            command_buffer.present_drawable(drawable);
            command_buffer.commit();

            Ok(())
        })
    }
}

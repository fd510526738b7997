//! OpenGL core 图形后端实现
//!
//! 本模块负责桌面 GL 上下文的初始化和管理，包括：
//! - 创建仅含 GL 后端的 wgpu 实例
//! - 创建窗口表面
//! - 选择和创建图形适配器
//! - 创建逻辑设备和命令队列
//! - 配置交换表面

use std::sync::Arc;
use tracing::{debug, info};
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Fullscreen, Window, WindowBuilder};

use crate::core::error::{GraphicsError, Result};
use crate::core::Config;
use crate::gfx::backend::GraphicsContext;

/// OpenGL core 图形后端
///
/// 封装了 GL 上下文的核心设备和表面管理。
pub struct GlCoreContext {
    /// 逻辑设备
    device: wgpu::Device,
    /// 命令队列
    queue: wgpu::Queue,
    /// 窗口表面
    surface: wgpu::Surface<'static>,
    /// 表面配置
    surface_config: wgpu::SurfaceConfiguration,
    /// 窗口引用
    window: Arc<Window>,
}

impl GlCoreContext {
    /// 创建 OpenGL core 后端实例
    ///
    /// # 参数
    ///
    /// * `event_loop` - winit 事件循环引用
    /// * `config` - 外壳配置
    ///
    /// # 返回值
    ///
    /// 返回初始化完成的 GlCoreContext 实例，任一步失败都返回错误，
    /// 不会留下部分初始化的上下文
    pub fn new(event_loop: &EventLoop<()>, config: &Config) -> Result<Self> {
        info!("Initializing OpenGL core backend");

        // 1. 创建 wgpu 实例，只启用 GL 系后端
        debug!("Creating wgpu instance (GL only)");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::GL,
            dx12_shader_compiler: Default::default(),
            flags: wgpu::InstanceFlags::default(),
            gles_minor_version: wgpu::Gles3MinorVersion::Automatic,
        });

        // 2. 创建窗口
        debug!("Creating window");
        let fullscreen = if config.window.fullscreen {
            Some(Fullscreen::Borderless(None))
        } else {
            None
        };
        let window = WindowBuilder::new()
            .with_title(&config.window.title)
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
            .with_fullscreen(fullscreen)
            .build(event_loop)
            .map_err(|e| GraphicsError::DeviceCreation(format!("Failed to create window: {}", e)))?;

        let window = Arc::new(window);

        // 3. 创建表面
        debug!("Creating surface");
        let surface = instance.create_surface(window.clone())
            .map_err(|e| GraphicsError::SurfaceError(format!("Failed to create surface: {}", e)))?;

        // 4. 请求适配器
        debug!("Requesting adapter");
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| GraphicsError::DeviceCreation("Failed to find suitable GL adapter".to_string()))?;

        info!("Selected adapter: {:?}", adapter.get_info());

        // 5. 请求设备和队列
        debug!("Requesting device and queue");
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Shell Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
            },
            None,
        ))
        .map_err(|e| GraphicsError::DeviceCreation(format!("Failed to create device: {}", e)))?;

        // 6. 配置表面
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| matches!(f, wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb))
            .unwrap_or(surface_caps.formats[0]);

        debug!("Surface format: {:?}", surface_format);

        let present_mode = if config.graphics.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::Immediate
        };

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        info!("OpenGL core backend initialized successfully");

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            window,
        })
    }
}

impl GraphicsContext for GlCoreContext {
    fn window(&self) -> &Window {
        &self.window
    }

    fn backend_name(&self) -> &str {
        "OpenGL core 3.3"
    }

    fn resize(&mut self, width: u32, height: u32) {
        // 最小化时宽高为 0，此时不能重配置表面
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    fn present(&mut self, clear_color: [f32; 4]) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                // 表面失效则按当前配置重建，下一帧恢复
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(e) => {
                return Err(GraphicsError::PresentFailure(format!("{:?}", e)).into());
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let _render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear_color[0] as f64,
                            g: clear_color[1] as f64,
                            b: clear_color[2] as f64,
                            a: clear_color[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

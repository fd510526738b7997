//! OpenGL ES 2 图形后端实现
//!
//! 与桌面 GL 后端的差别在于：实例固定请求 GLES 上下文，
//! 设备限制收紧到 WebGL2 可保证的水平。

use std::sync::Arc;
use tracing::{debug, info};
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use crate::core::error::{GraphicsError, Result};
use crate::core::Config;
use crate::gfx::backend::GraphicsContext;

/// OpenGL ES 2 图形后端
pub struct Gles2Context {
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

impl Gles2Context {
    /// 创建 OpenGL ES 2 后端实例
    ///
    /// # 参数
    ///
    /// * `event_loop` - winit 事件循环引用
    /// * `config` - 外壳配置
    pub fn new(event_loop: &EventLoop<()>, config: &Config) -> Result<Self> {
        info!("Initializing OpenGL ES 2 backend");

        debug!("Creating wgpu instance (GLES only)");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::GL,
            dx12_shader_compiler: Default::default(),
            flags: wgpu::InstanceFlags::default(),
            gles_minor_version: wgpu::Gles3MinorVersion::Automatic,
        });

        debug!("Creating window");
        let window = WindowBuilder::new()
            .with_title(&config.window.title)
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
            .build(event_loop)
            .map_err(|e| GraphicsError::DeviceCreation(format!("Failed to create window: {}", e)))?;

        let window = Arc::new(window);

        debug!("Creating surface");
        let surface = instance.create_surface(window.clone())
            .map_err(|e| GraphicsError::SurfaceError(format!("Failed to create surface: {}", e)))?;

        debug!("Requesting adapter");
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| GraphicsError::DeviceCreation("Failed to find suitable GLES adapter".to_string()))?;

        info!("Selected adapter: {:?}", adapter.get_info());

        debug!("Requesting device and queue");
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Shell Device"),
                required_features: wgpu::Features::empty(),
                // WebGL 没有完整的 downlevel 能力集
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            },
            None,
        ))
        .map_err(|e| GraphicsError::DeviceCreation(format!("Failed to create device: {}", e)))?;

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

        info!("OpenGL ES 2 backend initialized successfully");

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            window,
        })
    }
}

impl GraphicsContext for Gles2Context {
    fn window(&self) -> &Window {
        &self.window
    }

    fn backend_name(&self) -> &str {
        "OpenGL ES 2"
    }

    fn resize(&mut self, width: u32, height: u32) {
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

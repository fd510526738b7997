//! Direct3D 11 图形后端实现
//!
//! 本模块提供了基于 Direct3D 11 API 的图形后端实现。
//!
//! # 初始化流程
//!
//! 1. 创建窗口并取得 HWND
//! 2. 一次调用创建 D3D11 设备、立即上下文和 DXGI 交换链
//! 3. 取出后缓冲并创建渲染目标视图（RTV）

use std::sync::Arc;
use tracing::{debug, info};
use windows::{
    Win32::Foundation::HMODULE,
    Win32::Graphics::Direct3D::{D3D_DRIVER_TYPE_HARDWARE, D3D_FEATURE_LEVEL_11_0},
    Win32::Graphics::Direct3D11::{
        D3D11CreateDeviceAndSwapChain, ID3D11Device, ID3D11DeviceContext,
        ID3D11RenderTargetView, ID3D11Texture2D, D3D11_CREATE_DEVICE_BGRA_SUPPORT,
        D3D11_SDK_VERSION,
    },
    Win32::Graphics::Dxgi::Common::{
        DXGI_FORMAT_B8G8R8A8_UNORM, DXGI_FORMAT_UNKNOWN, DXGI_MODE_DESC, DXGI_RATIONAL,
        DXGI_SAMPLE_DESC,
    },
    Win32::Graphics::Dxgi::{
        IDXGISwapChain, DXGI_PRESENT, DXGI_SWAP_CHAIN_DESC, DXGI_SWAP_CHAIN_FLAG,
        DXGI_SWAP_EFFECT_DISCARD, DXGI_USAGE_RENDER_TARGET_OUTPUT,
    },
};
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::{Fullscreen, Window, WindowBuilder};

use crate::core::error::{GraphicsError, Result};
use crate::core::Config;
use crate::gfx::backend::GraphicsContext;

/// Direct3D 11 图形后端
///
/// 封装了 D3D11 设备、立即上下文、交换链和后缓冲的渲染目标视图。
pub struct D3d11Context {
    /// D3D11 设备
    device: ID3D11Device,
    /// 立即设备上下文
    device_context: ID3D11DeviceContext,
    /// DXGI 交换链
    swap_chain: IDXGISwapChain,
    /// 后缓冲的渲染目标视图
    render_target: Option<ID3D11RenderTargetView>,
    /// 垂直同步间隔（1 = 开启，0 = 关闭）
    sync_interval: u32,
    /// 窗口引用
    window: Arc<Window>,
}

impl D3d11Context {
    /// 创建 Direct3D 11 后端实例
    ///
    /// # 参数
    ///
    /// * `event_loop` - winit 事件循环引用
    /// * `config` - 外壳配置
    ///
    /// # 返回值
    ///
    /// 返回初始化完成的 `D3d11Context` 实例，任一步失败都返回错误
    pub fn new(event_loop: &EventLoop<()>, config: &Config) -> Result<Self> {
        info!("Initializing Direct3D 11 backend");

        let width = config.window.width;
        let height = config.window.height;

        let fullscreen = if config.window.fullscreen {
            Some(Fullscreen::Borderless(None))
        } else {
            None
        };
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&config.window.title)
                .with_inner_size(LogicalSize::new(width, height))
                .with_fullscreen(fullscreen)
                .build(event_loop)
                .map_err(|e| GraphicsError::DeviceCreation(format!("Failed to create window: {}", e)))?,
        );

        // 从 winit 取得 HWND
        let window_handle = window
            .window_handle()
            .map_err(|e| GraphicsError::SurfaceError(format!("Failed to get window handle: {}", e)))?;
        let hwnd = match window_handle.as_raw() {
            RawWindowHandle::Win32(win32_handle) => windows::Win32::Foundation::HWND(
                win32_handle.hwnd.get() as *mut core::ffi::c_void,
            ),
            _ => {
                return Err(GraphicsError::SurfaceError(
                    "Expected Win32 window handle on Windows platform".to_string(),
                )
                .into());
            }
        };

        unsafe {
            let swap_chain_desc = DXGI_SWAP_CHAIN_DESC {
                BufferDesc: DXGI_MODE_DESC {
                    Width: width,
                    Height: height,
                    RefreshRate: DXGI_RATIONAL {
                        Numerator: 0,
                        Denominator: 1,
                    },
                    Format: DXGI_FORMAT_B8G8R8A8_UNORM,
                    ..Default::default()
                },
                SampleDesc: DXGI_SAMPLE_DESC {
                    Count: 1,
                    Quality: 0,
                },
                BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
                BufferCount: 2,
                OutputWindow: hwnd,
                Windowed: true.into(),
                SwapEffect: DXGI_SWAP_EFFECT_DISCARD,
                ..Default::default()
            };

            let mut device: Option<ID3D11Device> = None;
            let mut device_context: Option<ID3D11DeviceContext> = None;
            let mut swap_chain: Option<IDXGISwapChain> = None;

            D3D11CreateDeviceAndSwapChain(
                None,
                D3D_DRIVER_TYPE_HARDWARE,
                HMODULE::default(),
                D3D11_CREATE_DEVICE_BGRA_SUPPORT,
                Some(&[D3D_FEATURE_LEVEL_11_0]),
                D3D11_SDK_VERSION,
                Some(&swap_chain_desc),
                Some(&mut swap_chain),
                Some(&mut device),
                None,
                Some(&mut device_context),
            )
            .map_err(|e| GraphicsError::DeviceCreation(format!("D3D11CreateDeviceAndSwapChain failed: {}", e)))?;

            let device = device.ok_or_else(|| {
                GraphicsError::DeviceCreation("D3D11 device was not returned".to_string())
            })?;
            let device_context = device_context.ok_or_else(|| {
                GraphicsError::DeviceCreation("D3D11 immediate context was not returned".to_string())
            })?;
            let swap_chain = swap_chain.ok_or_else(|| {
                GraphicsError::DeviceCreation("DXGI swap chain was not returned".to_string())
            })?;

            debug!("D3D11 device and swap chain created");

            let render_target = Some(Self::create_render_target(&device, &swap_chain)?);

            info!(width, height, "Direct3D 11 backend initialized successfully");

            Ok(Self {
                device,
                device_context,
                swap_chain,
                render_target,
                sync_interval: if config.graphics.vsync { 1 } else { 0 },
                window,
            })
        }
    }

    /// 从交换链后缓冲创建渲染目标视图
    fn create_render_target(
        device: &ID3D11Device,
        swap_chain: &IDXGISwapChain,
    ) -> Result<ID3D11RenderTargetView> {
        unsafe {
            let back_buffer: ID3D11Texture2D = swap_chain
                .GetBuffer(0)
                .map_err(|e| GraphicsError::SurfaceError(format!("GetBuffer failed: {}", e)))?;

            let mut render_target: Option<ID3D11RenderTargetView> = None;
            device
                .CreateRenderTargetView(&back_buffer, None, Some(&mut render_target))
                .map_err(|e| {
                    GraphicsError::SurfaceError(format!("CreateRenderTargetView failed: {}", e))
                })?;

            render_target.ok_or_else(|| {
                GraphicsError::SurfaceError("Render target view was not returned".to_string()).into()
            })
        }
    }
}

impl GraphicsContext for D3d11Context {
    fn window(&self) -> &Window {
        &self.window
    }

    fn backend_name(&self) -> &str {
        "Direct3D 11"
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        // 必须先释放后缓冲的所有引用，ResizeBuffers 才能成功
        self.render_target = None;

        unsafe {
            if let Err(e) = self.swap_chain.ResizeBuffers(
                0,
                width,
                height,
                DXGI_FORMAT_UNKNOWN,
                DXGI_SWAP_CHAIN_FLAG(0),
            ) {
                tracing::warn!("ResizeBuffers failed: {}", e);
                return;
            }
        }

        match Self::create_render_target(&self.device, &self.swap_chain) {
            Ok(rtv) => self.render_target = Some(rtv),
            Err(e) => tracing::warn!("Failed to recreate render target: {}", e),
        }
    }

    fn present(&mut self, clear_color: [f32; 4]) -> Result<()> {
        let render_target = match &self.render_target {
            Some(rtv) => rtv,
            // 调整大小失败后没有可用的后缓冲，跳过这一帧
            None => return Ok(()),
        };

        unsafe {
            self.device_context
                .ClearRenderTargetView(render_target, clear_color.as_ptr());

            self.swap_chain
                .Present(self.sync_interval, DXGI_PRESENT(0))
                .ok()
                .map_err(|e| GraphicsError::PresentFailure(format!("Present failed: {}", e)))?;
        }

        Ok(())
    }
}

//! 平台外壳模块
//!
//! 外壳拥有进程级的窗口、图形上下文和音频输出流，并驱动平台的
//! 原生事件循环：每次迭代先同步派发输入事件，再调用一次帧回调，
//! 然后呈现当前帧，最后让出控制权直到下一个节拍（开启垂直同步时
//! 由呈现调用按显示刷新率节流）。
//!
//! 调度是单线程协作式的，外壳自身不创建任何线程；音频输出运行在
//! 平台管理的回调线程上，外壳只通过无锁环形缓冲与其交换数据。
//!
//! # 模块组织
//!
//! - `app`：应用生命周期回调接口
//! - `context`：进程级运行上下文与回调能力集
//! - `driver`：运行循环的生命周期状态机
//! - `translate`：winit 事件到外壳事件的转换

pub mod app;
pub mod context;
pub mod driver;
pub mod translate;

use tracing::{error, info};
use winit::event::{Event as WinitEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use crate::core::error::{Result, ShellError};
use crate::core::event::{CloseRequestEvent, WindowResizeEvent};
use crate::core::Config;

pub use app::Application;
pub use context::{AppContext, RunContext};
pub use driver::LoopDriver;
pub use translate::EventTranslator;

/// 平台外壳
///
/// 持有启动配置，`run` 完成全部初始化并进入运行循环。
///
/// # 示例
///
/// ```no_run
/// use plat_shell::core::Config;
/// use plat_shell::shell::{Application, Shell};
///
/// struct MyApp;
/// impl Application for MyApp {}
///
/// let config = Config::from_file_or_default("config.toml");
/// Shell::new(config).run(MyApp).unwrap();
/// ```
pub struct Shell {
    config: Config,
}

impl Shell {
    /// 创建外壳实例
    ///
    /// 只保存配置，不做任何初始化。
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 初始化并进入运行循环
    ///
    /// 启动是全有或全无的：窗口、图形上下文和音频流任一创建失败，
    /// 本函数在调用任何回调之前返回错误。正常关机（应用请求关机
    /// 或未被消费的关闭请求）返回 `Ok(())`。
    ///
    /// # 参数
    ///
    /// * `app` - 应用生命周期回调集合
    pub fn run<A: Application>(self, app: A) -> Result<()> {
        let event_loop = EventLoop::new()
            .map_err(|e| ShellError::Initialization(format!("Failed to create event loop: {}", e)))?;

        // 全有或全无：上下文创建失败时不会有任何回调被调用
        let mut ctx = RunContext::new(&event_loop, &self.config)?;
        let mut driver = LoopDriver::new(app);
        let mut translator = EventTranslator::new();
        let mut loop_error: Option<ShellError> = None;

        info!("Entering run loop");

        event_loop
            .run(|event, elwt| {
                // 连续渲染：不等待新事件，每轮都进到 AboutToWait
                elwt.set_control_flow(ControlFlow::Poll);

                match event {
                    WinitEvent::Resumed => {
                        driver.startup(&mut ctx);
                    }
                    WinitEvent::WindowEvent { event, .. } => match event {
                        WindowEvent::CloseRequested => {
                            // 应用消费关闭请求即接管本次退出
                            let mut close = CloseRequestEvent::new();
                            let consumed = driver.dispatch(&mut ctx, &mut close);
                            if !consumed {
                                ctx.request_shutdown();
                            }
                        }
                        WindowEvent::Resized(size) => {
                            // 先调整表面，应用看到的事件已是生效后的尺寸
                            ctx.graphics_mut().resize(size.width, size.height);
                            let mut resize = WindowResizeEvent::new(size.width, size.height);
                            driver.dispatch(&mut ctx, &mut resize);
                        }
                        other => {
                            if let Some(mut shell_event) = translator.translate(&other) {
                                driver.dispatch(&mut ctx, shell_event.as_mut());
                            }
                        }
                    },
                    WinitEvent::AboutToWait => {
                        // 事件已全部派发，跑这一帧
                        if !driver.frame(&mut ctx) {
                            driver.finish(&mut ctx);
                            elwt.exit();
                            return;
                        }

                        if let Err(e) = ctx.present() {
                            error!("Frame presentation failed: {}", e);
                            loop_error = Some(e);
                            driver.finish(&mut ctx);
                            elwt.exit();
                        }
                    }
                    WinitEvent::LoopExiting => {
                        // 异常退出路径的兜底，finish 本身幂等
                        driver.finish(&mut ctx);
                    }
                    _ => {}
                }
            })
            .map_err(|e| ShellError::Runtime(format!("Event loop failed: {}", e)))?;

        info!(frames = driver.frames(), "Run loop finished");

        match loop_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

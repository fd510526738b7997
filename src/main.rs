//! PlatShell - 跨平台应用外壳
//!
//! 可执行入口：加载配置、初始化日志、创建外壳并运行演示应用。
//! 演示应用每帧推进清屏颜色、向音频流提交正弦波采样，按 Escape 退出。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件（config.toml，不存在则用默认值）
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- --width 1280 --height 720 --fullscreen
//! ```
//!
//! # 初始化流程
//!
//! 1. 加载外壳配置文件（config.toml）
//! 2. 应用命令行参数覆盖
//! 3. 验证配置
//! 4. 初始化日志系统
//! 5. 创建外壳并进入运行循环
//!
//! # 退出码
//!
//! - `0`: 正常关机
//! - `1`: 致命的初始化失败（无可用后端、设备或窗口创建失败）

use std::f32::consts::TAU;

use tracing::{error, info};

use plat_shell::core::event::{Event, EventType, KeyCode, KeyEvent};
use plat_shell::core::{log, Config};
use plat_shell::shell::{AppContext, Application, Shell};

/// 演示应用
///
/// 展示外壳的三个对外能力：每帧回调里修改清屏颜色、
/// 通过提交接口喂音频流、通过事件回调响应输入。
struct DemoApp {
    /// 颜色相位（弧度），每帧推进
    color_phase: f32,
    /// 正弦波相位（弧度）
    tone_phase: f32,
    /// 正弦波频率（Hz）
    tone_hz: f32,
    /// 采样暂存，避免每帧分配
    sample_buf: Vec<f32>,
}

impl DemoApp {
    fn new() -> Self {
        Self {
            color_phase: 0.0,
            tone_phase: 0.0,
            tone_hz: 440.0,
            sample_buf: Vec::new(),
        }
    }
}

impl Application for DemoApp {
    fn on_init(&mut self, ctx: &mut dyn AppContext) {
        let (width, height) = ctx.surface_size();
        info!(
            backend = ctx.backend().name(),
            width,
            height,
            sample_rate = ctx.sample_rate(),
            channels = ctx.channels(),
            "Demo application initialized"
        );
    }

    fn on_frame(&mut self, ctx: &mut dyn AppContext) {
        // 缓慢推进清屏颜色
        self.color_phase = (self.color_phase + 0.01) % TAU;
        let r = 0.5 + 0.5 * self.color_phase.sin();
        ctx.set_clear_color([r * 0.3, 0.2, 0.3, 1.0]);

        // 向输出流补充一批正弦波采样，环满时由提交接口截断
        let channels = ctx.channels() as usize;
        let step = TAU * self.tone_hz / ctx.sample_rate() as f32;
        let frames = 2048usize;

        self.sample_buf.clear();
        for _ in 0..frames {
            let sample = self.tone_phase.sin() * 0.1;
            self.tone_phase = (self.tone_phase + step) % TAU;
            for _ in 0..channels {
                self.sample_buf.push(sample);
            }
        }
        ctx.submit_audio(&self.sample_buf);
    }

    fn on_event(&mut self, ctx: &mut dyn AppContext, event: &mut dyn Event) -> bool {
        if event.event_type() == EventType::KeyDown {
            if let Some(key) = event.as_any().downcast_ref::<KeyEvent>() {
                if key.key_code == KeyCode::Escape {
                    info!("Escape pressed, requesting shutdown");
                    ctx.request_shutdown();
                    return true;
                }
            }
        }
        false
    }

    fn on_cleanup(&mut self, _ctx: &mut dyn AppContext) {
        info!("Demo application cleaned up");
    }
}

/// 应用程序入口点
///
/// 初始化日志系统、加载配置、创建外壳并启动运行循环。
fn main() {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    config.apply_args(std::env::args());

    // 3. 验证配置
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 4. 初始化日志系统（使用配置中的设置）
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!("PlatShell starting...");
    info!(version = env!("CARGO_PKG_VERSION"), "Application initialized");

    info!(
        width = config.window.width,
        height = config.window.height,
        fullscreen = config.window.fullscreen,
        vsync = config.graphics.vsync,
        "Window configuration"
    );

    // 5. 创建外壳并进入运行循环
    let shell = Shell::new(config);
    if let Err(e) = shell.run(DemoApp::new()) {
        error!("Shell failed: {}", e);
        eprintln!("Shell failed: {}", e);
        std::process::exit(1);
    }

    info!("Clean shutdown");
}

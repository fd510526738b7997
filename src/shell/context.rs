//! 应用上下文
//!
//! `RunContext` 是外壳独占持有的进程级状态：窗口、图形上下文和
//! 音频输出流。它在启动时一次性创建（全部成功或整体失败），
//! 在关机时按获取的相反顺序释放。
//!
//! 应用只通过回调参数中的 `&mut dyn AppContext` 接触上下文，
//! 不允许把引用保留到回调返回之后。

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;
use winit::event_loop::EventLoop;

use crate::audio::{sample_ring, AudioOutput, AudioSubmitter};
use crate::core::error::Result;
use crate::core::Config;
use crate::gfx::{BackendSelection, Graphics};

/// 回调可见的上下文能力集
///
/// 这是应用在回调里能接触到的全部外壳状态。
pub trait AppContext {
    /// 当前构建激活的图形后端
    fn backend(&self) -> BackendSelection;

    /// 当前表面尺寸（像素）
    fn surface_size(&self) -> (u32, u32);

    /// 设置之后每帧的清屏颜色
    fn set_clear_color(&mut self, color: [f32; 4]);

    /// 请求关机
    ///
    /// 协作式取消：标志在每次循环迭代检查一次，
    /// 当前帧结束后循环终止。
    fn request_shutdown(&mut self);

    /// 是否已请求关机
    fn shutdown_requested(&self) -> bool;

    /// 向音频输出流提交交织采样
    ///
    /// 线程安全的提交操作，不阻塞。返回实际接受的采样数，
    /// 余下部分可以在之后的帧重试。
    fn submit_audio(&mut self, samples: &[f32]) -> usize;

    /// 音频输出流的固定采样率（Hz）
    fn sample_rate(&self) -> u32;

    /// 音频输出流的固定声道数
    fn channels(&self) -> u16;
}

/// 进程级运行上下文
///
/// 由外壳独占持有和销毁，应用不能构造或保留它。
pub struct RunContext {
    // 字段按声明顺序析构：音频流最先释放，
    // 然后是图形上下文和窗口（获取顺序的相反）
    audio: AudioOutput,
    gfx: Graphics,
    submitter: AudioSubmitter,
    clear_color: [f32; 4],
    shutdown: AtomicBool,
}

impl RunContext {
    /// 创建运行上下文
    ///
    /// 按顺序获取：窗口 + 图形上下文，然后是音频输出流。
    /// 任一步失败都整体失败，不会暴露部分初始化的上下文。
    pub fn new(event_loop: &EventLoop<()>, config: &Config) -> Result<Self> {
        let gfx = Graphics::new(event_loop, config)?;

        let capacity_samples = config.audio.ring_frames * config.audio.channels as usize;
        let (submitter, consumer) = sample_ring(capacity_samples);
        let audio = AudioOutput::open(&config.audio, consumer)?;

        info!(
            backend = gfx.backend_name(),
            "Application context ready"
        );

        Ok(Self {
            audio,
            gfx,
            submitter,
            clear_color: config.graphics.clear_color,
            shutdown: AtomicBool::new(false),
        })
    }

    /// 图形外观的可变引用（仅外壳内部使用）
    pub(crate) fn graphics_mut(&mut self) -> &mut Graphics {
        &mut self.gfx
    }

    /// 呈现一帧
    pub(crate) fn present(&mut self) -> Result<()> {
        let color = self.clear_color;
        self.gfx.present(color)
    }
}

impl AppContext for RunContext {
    fn backend(&self) -> BackendSelection {
        self.gfx.selection()
    }

    fn surface_size(&self) -> (u32, u32) {
        let size = self.gfx.window().inner_size();
        (size.width, size.height)
    }

    fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }

    fn request_shutdown(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    fn submit_audio(&mut self, samples: &[f32]) -> usize {
        self.submitter.push_interleaved(samples)
    }

    fn sample_rate(&self) -> u32 {
        self.audio.sample_rate()
    }

    fn channels(&self) -> u16 {
        self.audio.channels()
    }
}

//! 应用生命周期回调接口
//!
//! 嵌入外壳的应用实现 `Application` trait，外壳在运行循环中
//! 依次调用这四个回调。回调内部的失败由应用自行处理或传播，
//! 外壳不做拦截。

use crate::core::event::Event;
use crate::shell::context::AppContext;

/// 应用生命周期回调集合
///
/// 外壳保证的调用顺序：
///
/// 1. `on_init` - 上下文创建完成后、第一帧之前，恰好一次
/// 2. `on_event` - 每个输入/窗口事件同步调用一次，按到达顺序，
///    在下一次 `on_frame` 之前
/// 3. `on_frame` - 每次循环迭代一次
/// 4. `on_cleanup` - 最后一帧之后、资源释放之前，恰好一次
///
/// 所有方法都有空的默认实现，应用只需覆盖关心的回调。
///
/// # 示例
///
/// ```
/// use plat_shell::core::event::{Event, EventType};
/// use plat_shell::shell::{AppContext, Application};
///
/// struct MyApp;
///
/// impl Application for MyApp {
///     fn on_frame(&mut self, ctx: &mut dyn AppContext) {
///         // 每帧逻辑；需要退出时调用 ctx.request_shutdown()
///     }
///
///     fn on_event(&mut self, _ctx: &mut dyn AppContext, event: &mut dyn Event) -> bool {
///         matches!(event.event_type(), EventType::KeyDown)
///     }
/// }
/// ```
pub trait Application {
    /// 初始化回调
    ///
    /// 在窗口、图形上下文和音频流全部就绪之后调用，恰好一次。
    fn on_init(&mut self, _ctx: &mut dyn AppContext) {}

    /// 帧回调
    ///
    /// 每次循环迭代调用一次。帧内请求关机会在本帧结束后生效，
    /// 不会再有后续的帧回调。
    fn on_frame(&mut self, _ctx: &mut dyn AppContext) {}

    /// 事件回调
    ///
    /// 对每个事件同步调用。
    ///
    /// # 返回值
    ///
    /// - `true`: 事件已被应用消费。对关闭请求事件而言，
    ///   消费意味着应用接管本次退出（外壳不会自动关机）
    /// - `false`: 事件未被消费
    fn on_event(&mut self, _ctx: &mut dyn AppContext, _event: &mut dyn Event) -> bool {
        false
    }

    /// 清理回调
    ///
    /// 在最后一帧之后、上下文销毁之前调用，恰好一次。
    fn on_cleanup(&mut self, _ctx: &mut dyn AppContext) {}
}

//! 事件模块
//!
//! 定义外壳派发给应用事件回调的各类输入/窗口事件。
//! 每个事件携带一个判别类型（`EventType`）和该类型特有的负载，
//! 通过 `Event` trait 以统一的方式传递给 `Application::on_event`。
//!
//! # 设计原则
//!
//! - **类型安全**：每种事件一个具体结构体，负载字段一目了然
//! - **统一派发**：回调接收 `&mut dyn Event`，按 `event_type()` 匹配
//! - **处理状态**：`is_handled`/`set_handled` 记录事件是否已被消费

use std::any::Any;
use std::fmt;

/// 事件类型枚举
///
/// 定义外壳支持的所有事件类型。
///
/// # 示例
///
/// ```
/// use plat_shell::core::event::EventType;
///
/// let event_type = EventType::WindowResize;
/// assert_eq!(event_type.name(), "WindowResize");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// 窗口调整大小事件
    WindowResize,

    /// 关闭请求事件
    ///
    /// 用户点击关闭按钮或操作系统请求退出时触发。
    /// 回调消费该事件可以取消退出，否则外壳随后请求关机。
    CloseRequest,

    /// 键盘按下事件
    KeyDown,

    /// 键盘释放事件
    KeyUp,

    /// 指针按下事件
    PointerDown,

    /// 指针释放事件
    PointerUp,

    /// 指针移动事件
    PointerMove,

    /// 滚轮事件
    Scroll,

    /// 窗口获得焦点
    FocusGained,

    /// 窗口失去焦点
    FocusLost,
}

impl EventType {
    /// 获取事件类型的名称
    ///
    /// 返回静态字符串切片，主要用于日志记录和调试。
    pub fn name(&self) -> &'static str {
        match self {
            EventType::WindowResize => "WindowResize",
            EventType::CloseRequest => "CloseRequest",
            EventType::KeyDown => "KeyDown",
            EventType::KeyUp => "KeyUp",
            EventType::PointerDown => "PointerDown",
            EventType::PointerUp => "PointerUp",
            EventType::PointerMove => "PointerMove",
            EventType::Scroll => "Scroll",
            EventType::FocusGained => "FocusGained",
            EventType::FocusLost => "FocusLost",
        }
    }
}

/// 指针按钮枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// 左键（主按钮）
    Left,

    /// 右键（次按钮）
    Right,

    /// 中键（滚轮按钮）
    Middle,

    /// 其他按钮
    ///
    /// 参数为平台相关的按钮编号，通常从 3 开始
    Other(u16),
}

/// 键盘按键枚举（简化版本）
///
/// 仅列出外壳直接关心的常用按键，未列出的按键使用 `Other` 变体，
/// 参数为平台相关的扫描序号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// 字母键
    W, A, S, D,

    /// 空格键
    Space,

    /// Escape 键
    Escape,

    /// Enter 键（回车键）
    Enter,

    /// Tab 键
    Tab,

    /// 方向键
    Up, Down, Left, Right,

    /// F1-F12 功能键
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    /// 其他按键
    Other(u32),
}

/// 事件 trait
///
/// 所有事件都必须实现此 trait，外壳以 `&mut dyn Event` 的形式
/// 将事件传递给应用回调。
pub trait Event: fmt::Debug {
    /// 获取事件类型
    fn event_type(&self) -> EventType;

    /// 向下转型支持
    ///
    /// 回调按 `event_type()` 判别后，用 `as_any().downcast_ref`
    /// 取回具体事件以读取负载。
    fn as_any(&self) -> &dyn Any;

    /// 获取事件详细信息（用于调试和日志）
    ///
    /// 默认实现使用 `Debug` 输出，具体事件可以覆盖此方法。
    fn detail(&self) -> String {
        format!("{:?}", self)
    }

    /// 事件是否已被消费
    fn is_handled(&self) -> bool;

    /// 设置事件消费状态
    fn set_handled(&mut self, handled: bool);
}

/// 窗口调整大小事件
///
/// 携带新的窗口客户区尺寸（像素）。外壳在派发此事件之前
/// 已经完成了表面尺寸的调整。
#[derive(Debug, Clone)]
pub struct WindowResizeEvent {
    /// 新的窗口宽度（像素）
    pub width: u32,

    /// 新的窗口高度（像素）
    pub height: u32,

    handled: bool,
}

impl WindowResizeEvent {
    /// 创建新的窗口调整大小事件
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            handled: false,
        }
    }
}

impl Event for WindowResizeEvent {
    fn event_type(&self) -> EventType {
        EventType::WindowResize
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn detail(&self) -> String {
        format!("WindowResize: {}x{}", self.width, self.height)
    }

    fn is_handled(&self) -> bool {
        self.handled
    }

    fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }
}

/// 关闭请求事件
///
/// 被回调消费（返回 true）表示应用接管了本次关闭请求，
/// 外壳不会因此请求关机。
#[derive(Debug, Clone)]
pub struct CloseRequestEvent {
    handled: bool,
}

impl CloseRequestEvent {
    /// 创建新的关闭请求事件
    pub fn new() -> Self {
        Self { handled: false }
    }
}

impl Default for CloseRequestEvent {
    fn default() -> Self {
        Self::new()
    }
}

impl Event for CloseRequestEvent {
    fn event_type(&self) -> EventType {
        EventType::CloseRequest
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn detail(&self) -> String {
        "CloseRequest".to_string()
    }

    fn is_handled(&self) -> bool {
        self.handled
    }

    fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }
}

/// 键盘事件
///
/// 表示物理按键的按下或释放，不包含文本输入信息。
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// 按键码
    pub key_code: KeyCode,

    /// 是否是按下事件
    ///
    /// - `true`: 按键被按下（KeyDown）
    /// - `false`: 按键被释放（KeyUp）
    pub pressed: bool,

    handled: bool,
}

impl KeyEvent {
    /// 创建按键按下事件
    pub fn pressed(key_code: KeyCode) -> Self {
        Self {
            key_code,
            pressed: true,
            handled: false,
        }
    }

    /// 创建按键释放事件
    pub fn released(key_code: KeyCode) -> Self {
        Self {
            key_code,
            pressed: false,
            handled: false,
        }
    }
}

impl Event for KeyEvent {
    fn event_type(&self) -> EventType {
        if self.pressed {
            EventType::KeyDown
        } else {
            EventType::KeyUp
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn detail(&self) -> String {
        format!(
            "Key{}: {:?}",
            if self.pressed { "Down" } else { "Up" },
            self.key_code
        )
    }

    fn is_handled(&self) -> bool {
        self.handled
    }

    fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }
}

/// 指针按钮事件
///
/// 表示指针按钮的按下或释放，包含按钮类型和当前位置。
#[derive(Debug, Clone)]
pub struct PointerButtonEvent {
    /// 按钮类型
    pub button: PointerButton,

    /// 指针 X 坐标（像素，相对窗口客户区左上角）
    pub x: f64,

    /// 指针 Y 坐标（像素，相对窗口客户区左上角）
    pub y: f64,

    /// 是否是按下事件
    pub pressed: bool,

    handled: bool,
}

impl PointerButtonEvent {
    /// 创建指针按下事件
    pub fn pressed(button: PointerButton, x: f64, y: f64) -> Self {
        Self {
            button,
            x,
            y,
            pressed: true,
            handled: false,
        }
    }

    /// 创建指针释放事件
    pub fn released(button: PointerButton, x: f64, y: f64) -> Self {
        Self {
            button,
            x,
            y,
            pressed: false,
            handled: false,
        }
    }
}

impl Event for PointerButtonEvent {
    fn event_type(&self) -> EventType {
        if self.pressed {
            EventType::PointerDown
        } else {
            EventType::PointerUp
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn detail(&self) -> String {
        format!(
            "Pointer{}: {:?} at ({}, {})",
            if self.pressed { "Down" } else { "Up" },
            self.button,
            self.x,
            self.y
        )
    }

    fn is_handled(&self) -> bool {
        self.handled
    }

    fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }
}

/// 指针移动事件
///
/// 指针移动事件可能非常频繁（每帧多次），处理时应注意开销。
#[derive(Debug, Clone)]
pub struct PointerMoveEvent {
    /// 指针 X 坐标（像素）
    pub x: f64,

    /// 指针 Y 坐标（像素）
    pub y: f64,

    handled: bool,
}

impl PointerMoveEvent {
    /// 创建新的指针移动事件
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            handled: false,
        }
    }
}

impl Event for PointerMoveEvent {
    fn event_type(&self) -> EventType {
        EventType::PointerMove
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn detail(&self) -> String {
        format!("PointerMove: ({}, {})", self.x, self.y)
    }

    fn is_handled(&self) -> bool {
        self.handled
    }

    fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }
}

/// 滚轮事件
#[derive(Debug, Clone)]
pub struct ScrollEvent {
    /// 水平滚动增量
    pub delta_x: f32,
    /// 垂直滚动增量
    pub delta_y: f32,

    handled: bool,
}

impl ScrollEvent {
    /// 创建新的滚轮事件
    pub fn new(delta_x: f32, delta_y: f32) -> Self {
        Self {
            delta_x,
            delta_y,
            handled: false,
        }
    }
}

impl Event for ScrollEvent {
    fn event_type(&self) -> EventType {
        EventType::Scroll
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn detail(&self) -> String {
        format!("Scroll: delta ({}, {})", self.delta_x, self.delta_y)
    }

    fn is_handled(&self) -> bool {
        self.handled
    }

    fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }
}

/// 窗口焦点事件
#[derive(Debug, Clone)]
pub struct FocusEvent {
    /// 是否获得焦点
    pub gained: bool,

    handled: bool,
}

impl FocusEvent {
    /// 创建新的焦点事件
    pub fn new(gained: bool) -> Self {
        Self {
            gained,
            handled: false,
        }
    }
}

impl Event for FocusEvent {
    fn event_type(&self) -> EventType {
        if self.gained {
            EventType::FocusGained
        } else {
            EventType::FocusLost
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn detail(&self) -> String {
        if self.gained {
            "FocusGained".to_string()
        } else {
            "FocusLost".to_string()
        }
    }

    fn is_handled(&self) -> bool {
        self.handled
    }

    fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(EventType::WindowResize.name(), "WindowResize");
        assert_eq!(EventType::CloseRequest.name(), "CloseRequest");
        assert_eq!(EventType::PointerDown.name(), "PointerDown");
    }

    #[test]
    fn test_window_resize_event() {
        let mut event = WindowResizeEvent::new(1920, 1080);
        assert_eq!(event.event_type(), EventType::WindowResize);
        assert_eq!(event.width, 1920);
        assert_eq!(event.height, 1080);
        assert!(!event.is_handled());

        event.set_handled(true);
        assert!(event.is_handled());
    }

    #[test]
    fn test_key_event() {
        let event = KeyEvent::pressed(KeyCode::Escape);
        assert_eq!(event.event_type(), EventType::KeyDown);
        assert_eq!(event.key_code, KeyCode::Escape);
        assert!(event.pressed);

        let event = KeyEvent::released(KeyCode::Space);
        assert_eq!(event.event_type(), EventType::KeyUp);
        assert!(!event.pressed);
    }

    #[test]
    fn test_pointer_button_event() {
        let event = PointerButtonEvent::pressed(PointerButton::Left, 100.0, 200.0);
        assert_eq!(event.event_type(), EventType::PointerDown);
        assert_eq!(event.button, PointerButton::Left);

        let event = PointerButtonEvent::released(PointerButton::Other(4), 0.0, 0.0);
        assert_eq!(event.event_type(), EventType::PointerUp);
        assert_eq!(event.button, PointerButton::Other(4));
    }

    #[test]
    fn test_focus_event() {
        let event = FocusEvent::new(true);
        assert_eq!(event.event_type(), EventType::FocusGained);
        assert_eq!(event.detail(), "FocusGained");

        let event = FocusEvent::new(false);
        assert_eq!(event.event_type(), EventType::FocusLost);
    }

    #[test]
    fn test_close_request_consumption() {
        let mut event = CloseRequestEvent::new();
        assert!(!event.is_handled());
        event.set_handled(true);
        assert!(event.is_handled());
    }
}

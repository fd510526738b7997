//! 图形后端的统一抽象接口
//!
//! 本模块定义了所有图形后端（Direct3D 11、Metal、GLES2、OpenGL core）
//! 必须实现的统一接口。外壳只通过这个接口与具体图形 API 交互，
//! 在不同后端之间切换不需要修改运行循环逻辑。

use winit::window::Window;

use crate::core::error::Result;

/// 图形后端的统一接口
///
/// 所有具体的图形后端都必须实现此 trait，提供窗口表面、
/// 尺寸调整和帧呈现能力。
///
/// # 设计理念
///
/// - **抽象化**：隐藏不同图形 API 的实现细节
/// - **统一接口**：提供一致的调用方式
/// - **编译期选择**：每个构建目标只编译并实例化一个后端
pub trait GraphicsContext {
    /// 获取窗口的引用
    ///
    /// 返回与此图形后端关联的窗口引用，用于获取窗口尺寸、
    /// 请求重绘等。
    fn window(&self) -> &Window;

    /// 获取后端的名称
    ///
    /// 返回当前使用的图形后端名称，用于日志输出和调试。
    fn backend_name(&self) -> &str;

    /// 窗口尺寸变化时调用
    ///
    /// 重新配置窗口表面。宽高为 0 的调整（最小化）被忽略。
    ///
    /// # 参数
    ///
    /// * `width` - 新的表面宽度（像素）
    /// * `height` - 新的表面高度（像素）
    fn resize(&mut self, width: u32, height: u32);

    /// 呈现一帧
    ///
    /// 获取当前帧图像，清屏到给定颜色并呈现到窗口。
    /// 开启垂直同步时，此调用按显示刷新节奏阻塞，
    /// 构成运行循环的每帧让出点。
    ///
    /// # 参数
    ///
    /// * `clear_color` - 清屏颜色（RGBA，0.0 ~ 1.0）
    ///
    /// # 返回值
    ///
    /// - `Ok(())`: 呈现成功
    /// - `Err(...)`: 呈现失败（如表面丢失、设备错误）
    fn present(&mut self, clear_color: [f32; 4]) -> Result<()>;
}

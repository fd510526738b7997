//! 后端选择模块
//!
//! 图形后端由编译目标在编译期唯一确定，运行期不可切换：
//!
//! | 平台 | 后端 |
//! |------|------|
//! | Windows | Direct3D 11 |
//! | macOS | Metal |
//! | Emscripten / Web | GLES2 |
//! | 其他桌面（Linux / BSD） | OpenGL core 3.3 |
//!
//! `BackendSelection::for_platform` 是平台标识到后端的纯函数，
//! 相同输入永远得到相同后端。无法识别的编译目标没有后备后端，
//! 在启动时致命失败。

use cfg_if::cfg_if;

use crate::core::error::{GraphicsError, Result};

/// 可识别的编译目标平台
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Windows
    Windows,
    /// macOS
    MacOs,
    /// Emscripten / WebAssembly
    Emscripten,
    /// Linux
    Linux,
    /// FreeBSD / OpenBSD / NetBSD / DragonFly
    Bsd,
}

// 编译目标到平台的识别结果，每个构建恰好命中一条分支
cfg_if! {
    if #[cfg(target_os = "windows")] {
        const CURRENT_PLATFORM: Option<Platform> = Some(Platform::Windows);
    } else if #[cfg(target_os = "macos")] {
        const CURRENT_PLATFORM: Option<Platform> = Some(Platform::MacOs);
    } else if #[cfg(any(target_os = "emscripten", target_family = "wasm"))] {
        const CURRENT_PLATFORM: Option<Platform> = Some(Platform::Emscripten);
    } else if #[cfg(target_os = "linux")] {
        const CURRENT_PLATFORM: Option<Platform> = Some(Platform::Linux);
    } else if #[cfg(any(
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    ))] {
        const CURRENT_PLATFORM: Option<Platform> = Some(Platform::Bsd);
    } else {
        const CURRENT_PLATFORM: Option<Platform> = None;
    }
}

impl Platform {
    /// 当前编译目标对应的平台
    ///
    /// # 返回值
    ///
    /// 可识别的平台返回 `Some`，其余编译目标（如移动平台）返回 `None`
    pub fn current() -> Option<Platform> {
        CURRENT_PLATFORM
    }

    /// 获取平台名称
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Emscripten => "Emscripten",
            Platform::Linux => "Linux",
            Platform::Bsd => "BSD",
        }
    }
}

/// 图形后端类型
///
/// 每次构建恰好激活其中一个变体。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendSelection {
    /// Direct3D 11 后端
    D3d11,
    /// Metal 后端
    Metal,
    /// OpenGL ES 2 后端
    Gles2,
    /// OpenGL core 3.3 后端
    GlCore33,
}

impl BackendSelection {
    /// 平台到后端的映射
    ///
    /// 这是一个纯函数：对可识别平台是全函数，且结果只取决于输入。
    ///
    /// # 参数
    ///
    /// * `platform` - 目标平台
    ///
    /// # 返回值
    ///
    /// 该平台激活的图形后端
    pub fn for_platform(platform: Platform) -> BackendSelection {
        match platform {
            Platform::Windows => BackendSelection::D3d11,
            Platform::MacOs => BackendSelection::Metal,
            Platform::Emscripten => BackendSelection::Gles2,
            Platform::Linux | Platform::Bsd => BackendSelection::GlCore33,
        }
    }

    /// 获取后端名称
    pub fn name(&self) -> &'static str {
        match self {
            BackendSelection::D3d11 => "Direct3D 11",
            BackendSelection::Metal => "Metal",
            BackendSelection::Gles2 => "OpenGL ES 2",
            BackendSelection::GlCore33 => "OpenGL core 3.3",
        }
    }
}

/// 当前构建激活的图形后端
///
/// # 返回值
///
/// 可识别平台返回对应后端；无法识别的编译目标返回
/// `GraphicsError::UnsupportedPlatform`，该错误在启动时致命。
pub fn active_backend() -> Result<BackendSelection> {
    Platform::current()
        .map(BackendSelection::for_platform)
        .ok_or_else(|| {
            GraphicsError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_mapping() {
        assert_eq!(
            BackendSelection::for_platform(Platform::Windows),
            BackendSelection::D3d11
        );
        assert_eq!(
            BackendSelection::for_platform(Platform::MacOs),
            BackendSelection::Metal
        );
        assert_eq!(
            BackendSelection::for_platform(Platform::Emscripten),
            BackendSelection::Gles2
        );
        assert_eq!(
            BackendSelection::for_platform(Platform::Linux),
            BackendSelection::GlCore33
        );
        assert_eq!(
            BackendSelection::for_platform(Platform::Bsd),
            BackendSelection::GlCore33
        );
    }

    #[test]
    fn test_selection_is_deterministic() {
        // 相同输入必须得到相同后端
        for platform in [
            Platform::Windows,
            Platform::MacOs,
            Platform::Emscripten,
            Platform::Linux,
            Platform::Bsd,
        ] {
            let first = BackendSelection::for_platform(platform);
            let second = BackendSelection::for_platform(platform);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_active_backend_matches_current_platform() {
        // 测试本身只在可识别平台上编译运行
        let platform = Platform::current().expect("test targets are recognized platforms");
        let backend = active_backend().unwrap();
        assert_eq!(backend, BackendSelection::for_platform(platform));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_selects_gl_core() {
        assert_eq!(active_backend().unwrap(), BackendSelection::GlCore33);
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_windows_selects_d3d11() {
        assert_eq!(active_backend().unwrap(), BackendSelection::D3d11);
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_macos_selects_metal() {
        assert_eq!(active_backend().unwrap(), BackendSelection::Metal);
    }
}

//! 核心功能模块
//!
//! 本模块提供与窗口后端无关的基础功能，包括事件类型、键盘常量、输入快照、
//! 日志系统、配置管理和错误处理。
//!
//! # 模块组织
//!
//! - `event`：窗口系统事件（封闭的枚举）
//! - `keys`：键码与修饰键标志
//! - `input`：每帧刷新一次的键盘/鼠标状态快照
//! - `log`：日志系统，基于 tracing
//! - `config`：配置管理，支持从 TOML 文件加载窗口设置
//! - `error`：错误处理，定义统一的错误类型

pub mod log;
pub mod config;
pub mod error;
pub mod event;
pub mod keys;
pub mod input;

// 重新导出常用类型，方便使用
pub use error::{Result, GameError, ConfigError};
pub use config::{Config, WindowConfig, LoggingConfig, DisplayFlags, LogLevel};
pub use event::{
    Event, EventType,
    FocusEvent, FocusState,
    KeyEvent,
    MouseMoveEvent, MouseButtonEvent, MouseButton, MouseButtons,
    ResizeEvent,
};
pub use keys::{Key, KeyMods};
pub use input::{InputState, KeyboardState, PointerState};

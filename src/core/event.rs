//! 事件系统模块
//!
//! 定义窗口系统交给游戏循环的所有输入/窗口事件。
//!
//! # 设计原则
//!
//! - **封闭的事件集合**：[`Event`] 是一个枚举，分发器对它做穷尽匹配，
//!   新增事件种类时编译器会指出所有需要处理的地方
//! - **与后端无关**：坐标、按键、按钮都使用本库自己的类型，
//!   由具体的 `Host` 实现负责从底层窗口库翻译
//!
//! # 使用示例
//!
//! ```
//! use gametails::core::event::*;
//! use gametails::math::point;
//!
//! let event = Event::MouseDown(MouseButtonEvent::new(point(100, 200), MouseButton::Left));
//! assert_eq!(event.kind(), EventType::MouseDown);
//! assert_eq!(event.detail(), "MouseDown: Left at (100, 200)");
//! ```

use super::keys::{Key, KeyMods};
use crate::math::{Offset, Point};

/// 事件类型
///
/// 与 [`Event`] 的变体一一对应，主要用于日志记录和调试。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// 用户请求关闭窗口
    Quit,
    /// 窗口获得/失去焦点，或鼠标进入/离开窗口
    Focus,
    /// 键盘按下
    KeyDown,
    /// 键盘释放
    KeyUp,
    /// 鼠标移动
    MouseMove,
    /// 鼠标按钮释放
    MouseUp,
    /// 鼠标按钮按下
    MouseDown,
    /// 窗口调整大小
    Resize,
}

impl EventType {
    /// 获取事件类型的名称
    ///
    /// ```
    /// use gametails::core::event::EventType;
    ///
    /// assert_eq!(EventType::MouseDown.name(), "MouseDown");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            EventType::Quit => "Quit",
            EventType::Focus => "Focus",
            EventType::KeyDown => "KeyDown",
            EventType::KeyUp => "KeyUp",
            EventType::MouseMove => "MouseMove",
            EventType::MouseUp => "MouseUp",
            EventType::MouseDown => "MouseDown",
            EventType::Resize => "Resize",
        }
    }
}

/// 鼠标按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// 左键（主按钮），只有它参与对象的按下/释放跟踪
    Left,

    /// 中键（滚轮按钮）
    Middle,

    /// 右键
    Right,

    /// 侧键（后退）
    Back,

    /// 侧键（前进）
    Forward,

    /// 其他按钮，参数为后端给出的按钮编号
    Other(u16),
}

impl MouseButton {
    /// 是否为主按钮
    pub fn is_primary(&self) -> bool {
        matches!(self, MouseButton::Left)
    }
}

/// 左、中、右三个按钮的按下状态快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MouseButtons {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl MouseButtons {
    /// 查询某个按钮是否按下，三键以外的按钮总是返回 false
    pub fn is_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            _ => false,
        }
    }

    /// 设置某个按钮的状态，三键以外的按钮被忽略
    pub fn set(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Middle => self.middle = down,
            MouseButton::Right => self.right = down,
            _ => {}
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.middle || self.right
    }
}

/// 焦点事件的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusState {
    /// 鼠标进入或离开窗口
    Mouse,
    /// 窗口获得或失去键盘焦点
    Input,
}

/// 焦点变化事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent {
    /// true 表示获得（焦点进入/鼠标进入），false 表示失去
    pub gain: bool,
    pub state: FocusState,
}

impl FocusEvent {
    pub fn new(gain: bool, state: FocusState) -> Self {
        Self { gain, state }
    }
}

/// 键盘事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// 按键
    pub key: Key,

    /// 事件发生时按下的修饰键
    pub modifiers: KeyMods,

    /// 按键产生的文本（仅按下事件，且后端能提供时才有）
    pub text: Option<String>,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: KeyMods) -> Self {
        Self {
            key,
            modifiers,
            text: None,
        }
    }

    /// 附带按键产生的文本
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// 鼠标移动事件
///
/// 既用于真实的鼠标移动，也用于主循环每帧合成的"鼠标停留"通知。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseMoveEvent {
    /// 鼠标位置
    pub pos: Point,

    /// 自上次移动以来的位移
    pub rel: Offset,

    /// 左、中、右按钮的按下状态
    pub buttons: MouseButtons,
}

impl MouseMoveEvent {
    pub fn new(pos: Point, rel: Offset, buttons: MouseButtons) -> Self {
        Self { pos, rel, buttons }
    }
}

/// 鼠标按钮事件（按下或释放）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonEvent {
    /// 按下/释放时的鼠标位置
    pub pos: Point,

    pub button: MouseButton,
}

impl MouseButtonEvent {
    pub fn new(pos: Point, button: MouseButton) -> Self {
        Self { pos, button }
    }
}

/// 窗口调整大小事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    pub width: u32,
    pub height: u32,
}

impl ResizeEvent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// 窗口系统事件
///
/// 主循环每次迭代从 `Host` 取出所有待处理事件，按到达顺序逐个分发。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Quit,
    Focus(FocusEvent),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    MouseMove(MouseMoveEvent),
    MouseUp(MouseButtonEvent),
    MouseDown(MouseButtonEvent),
    Resize(ResizeEvent),
}

impl Event {
    /// 获取事件类型
    pub fn kind(&self) -> EventType {
        match self {
            Event::Quit => EventType::Quit,
            Event::Focus(_) => EventType::Focus,
            Event::KeyDown(_) => EventType::KeyDown,
            Event::KeyUp(_) => EventType::KeyUp,
            Event::MouseMove(_) => EventType::MouseMove,
            Event::MouseUp(_) => EventType::MouseUp,
            Event::MouseDown(_) => EventType::MouseDown,
            Event::Resize(_) => EventType::Resize,
        }
    }

    /// 获取事件详细信息（用于调试和日志）
    pub fn detail(&self) -> String {
        match self {
            Event::Quit => "Quit".to_string(),
            Event::Focus(e) => format!(
                "Focus: {} ({:?})",
                if e.gain { "gained" } else { "lost" },
                e.state
            ),
            Event::KeyDown(e) => format!("KeyDown: {:?} mods={:?}", e.key, e.modifiers),
            Event::KeyUp(e) => format!("KeyUp: {:?} mods={:?}", e.key, e.modifiers),
            Event::MouseMove(e) => format!(
                "MouseMove: ({}, {}) rel=({}, {})",
                e.pos.x, e.pos.y, e.rel.x, e.rel.y
            ),
            Event::MouseUp(e) => {
                format!("MouseUp: {:?} at ({}, {})", e.button, e.pos.x, e.pos.y)
            }
            Event::MouseDown(e) => {
                format!("MouseDown: {:?} at ({}, {})", e.button, e.pos.x, e.pos.y)
            }
            Event::Resize(e) => format!("Resize: {}x{}", e.width, e.height),
        }
    }
}

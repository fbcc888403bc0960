//! 键盘常量
//!
//! 键码与修饰键标志。键码按物理按键定义，与具体的窗口后端无关，
//! 后端负责把自己的键码翻译成 [`Key`]（见 [`host::window`](crate::host::window)）。
//!
//! # 修饰键标志
//!
//! [`KeyMods`] 是一组按位标志，每一位代表一个修饰键。左右两侧的按键各占一位，
//! `SHIFT`、`CTRL`、`ALT`、`META` 是左右两位的组合。
//!
//! ```
//! use gametails::core::KeyMods;
//!
//! let mods = KeyMods::LCTRL | KeyMods::RALT;
//!
//! // 包含式检查：ctrl 和 alt 都按下，其他修饰键无所谓
//! assert!(mods.all_of(&[KeyMods::CTRL, KeyMods::ALT]));
//!
//! // 排他式检查：除了 ctrl 和 alt 没有别的修饰键
//! assert_eq!(mods & !(KeyMods::CTRL | KeyMods::ALT), KeyMods::empty());
//! ```

use bitflags::bitflags;

/// 键盘按键
///
/// 覆盖常用的物理按键。没有列出的按键由后端映射为 `Other`（平台原生扫描码）
/// 或 `Unknown`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    // 编辑与控制
    Backspace,
    Tab,
    Clear,
    Return,
    Pause,
    Escape,
    Space,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,

    // 标点（按未按 shift 时的字符命名）
    Quote,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equals,
    LeftBracket,
    Backslash,
    RightBracket,
    Backquote,

    // 主键盘区数字
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // 字母
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // 小键盘
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpPeriod,
    KpDivide,
    KpMultiply,
    KpMinus,
    KpPlus,
    KpEnter,
    KpEquals,

    // 方向键
    Up,
    Down,
    Right,
    Left,

    // 功能键
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,

    // 锁定键
    NumLock,
    CapsLock,
    ScrollLock,

    // 修饰键
    LShift,
    RShift,
    LCtrl,
    RCtrl,
    LAlt,
    RAlt,
    /// 左侧 "windows"/command 键
    LSuper,
    /// 右侧 "windows"/command 键
    RSuper,

    // 其他
    Help,
    Print,
    Menu,
    Power,

    /// 平台原生扫描码
    Other(u32),

    /// 后端无法识别的按键
    Unknown,
}

impl Key {
    /// 该按键对应的修饰键标志，非修饰键返回空集
    pub fn modifier(self) -> KeyMods {
        match self {
            Key::LShift => KeyMods::LSHIFT,
            Key::RShift => KeyMods::RSHIFT,
            Key::LCtrl => KeyMods::LCTRL,
            Key::RCtrl => KeyMods::RCTRL,
            Key::LAlt => KeyMods::LALT,
            Key::RAlt => KeyMods::RALT,
            Key::LSuper => KeyMods::LMETA,
            Key::RSuper => KeyMods::RMETA,
            _ => KeyMods::empty(),
        }
    }

    pub fn is_modifier(self) -> bool {
        !self.modifier().is_empty()
    }
}

bitflags! {
    /// 修饰键标志
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyMods: u16 {
        const LSHIFT = 1 << 0;
        const RSHIFT = 1 << 1;
        const LCTRL = 1 << 2;
        const RCTRL = 1 << 3;
        const LALT = 1 << 4;
        const RALT = 1 << 5;
        const LMETA = 1 << 6;
        const RMETA = 1 << 7;

        const SHIFT = Self::LSHIFT.bits() | Self::RSHIFT.bits();
        const CTRL = Self::LCTRL.bits() | Self::RCTRL.bits();
        const ALT = Self::LALT.bits() | Self::RALT.bits();
        const META = Self::LMETA.bits() | Self::RMETA.bits();
    }
}

impl KeyMods {
    /// 由当前按下的按键集合推导修饰键状态
    pub fn from_keys<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a Key>,
    {
        keys.into_iter()
            .fold(KeyMods::empty(), |mods, key| mods | key.modifier())
    }

    /// 每个组都至少按下了一侧
    ///
    /// `KeyMods::CTRL` 这样的组合标志用 `contains` 检查时要求左右两侧都按下，
    /// 通常这不是想要的语义，用这个方法代替。
    pub fn all_of(self, groups: &[KeyMods]) -> bool {
        groups.iter().all(|group| self.intersects(*group))
    }

    /// 任意一个组至少按下了一侧
    pub fn any_of(self, groups: &[KeyMods]) -> bool {
        groups.iter().any(|group| self.intersects(*group))
    }

    pub fn shift(self) -> bool {
        self.intersects(KeyMods::SHIFT)
    }

    pub fn ctrl(self) -> bool {
        self.intersects(KeyMods::CTRL)
    }

    pub fn alt(self) -> bool {
        self.intersects(KeyMods::ALT)
    }

    pub fn meta(self) -> bool {
        self.intersects(KeyMods::META)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mods_from_keys() {
        let keys = [Key::A, Key::LShift, Key::RCtrl];
        let mods = KeyMods::from_keys(keys.iter());

        assert_eq!(mods, KeyMods::LSHIFT | KeyMods::RCTRL);
        assert!(mods.shift());
        assert!(mods.ctrl());
        assert!(!mods.alt());
        assert!(!mods.contains(KeyMods::SHIFT));
    }

    #[test]
    fn test_group_checks() {
        let mods = KeyMods::LCTRL | KeyMods::RALT | KeyMods::LSHIFT;
        assert!(mods.all_of(&[KeyMods::CTRL, KeyMods::ALT]));
        assert!(!mods.all_of(&[KeyMods::CTRL, KeyMods::META]));
        assert!(mods.any_of(&[KeyMods::META, KeyMods::SHIFT]));
        assert!(!KeyMods::empty().any_of(&[KeyMods::CTRL]));
    }

    #[test]
    fn test_modifier_keys() {
        assert!(Key::LSuper.is_modifier());
        assert_eq!(Key::LSuper.modifier(), KeyMods::LMETA);
        assert!(!Key::Space.is_modifier());
    }
}

//! 窗口系统后端
//!
//! 本模块定义了游戏循环从窗口系统获取输入的统一接口 [`Host`]，以及两个实现：
//! - [`WinitHost`]：基于 winit 的真实窗口
//! - [`HeadlessHost`]：没有窗口的脚本化后端，事件由代码注入，用于测试
//!
//! 游戏循环只依赖 `Host` trait，因此同一套游戏逻辑可以在两种后端上运行。

pub mod headless;
pub mod window;

pub use self::headless::{Canvas, HeadlessHost};
pub use self::window::WinitHost;

use crate::core::{Event, KeyboardState, PointerState, Result};

/// 窗口系统后端的统一接口
///
/// # 实现要求
///
/// - `poll_events` 按到达顺序取出所有待处理事件，不等待新事件
/// - `keyboard` 和 `pointer` 反映处理完这批事件之后的设备状态
/// - `pointer` 返回的 `rel` 是自上一次调用 `pointer` 以来的累计位移
pub trait Host {
    /// 可绘制的目标（窗口、离屏画布等），生命周期与后端相同
    type Surface;

    /// 取出所有待处理事件，追加到 `out` 末尾
    fn poll_events(&mut self, out: &mut Vec<Event>) -> Result<()>;

    /// 当前按下的按键表
    fn keyboard(&self) -> KeyboardState;

    /// 当前鼠标位置、位移与按钮状态
    fn pointer(&mut self) -> PointerState;

    /// 可绘制表面
    fn surface(&self) -> &Self::Surface;

    /// 可绘制表面（可变）
    fn surface_mut(&mut self) -> &mut Self::Surface;

    /// 后端名称，用于日志输出
    fn backend_name(&self) -> &str;
}

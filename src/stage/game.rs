//! 游戏钩子
//!
//! [`Game`] 是 `Stage` 分发事件的目标。每种事件对应一个钩子，默认实现如下：
//!
//! | 钩子 | 默认行为 |
//! |------|----------|
//! | `on_quit` | `stage.stop()`，主循环在本次迭代结束前返回 |
//! | `on_focus` / `on_key_down` / `on_key_up` / `on_resize` | 什么都不做 |
//! | `on_mouse_move` | `stage.track_mouse_move`：进入/离开/拖拽通知 |
//! | `on_mouse_down` | `stage.track_mouse_down`：按下通知并记录被按下的对象 |
//! | `on_mouse_up` | `stage.track_mouse_up`：释放通知并清空按下集合 |
//! | `update` | 什么都不做 |
//!
//! 覆盖鼠标钩子时如果还想保留对象跟踪，在实现里调用对应的 `track_*` 方法。

use super::Stage;
use crate::core::{FocusEvent, KeyEvent, MouseButtonEvent, MouseMoveEvent, ResizeEvent, Result};
use crate::host::Host;

/// 游戏级别的事件钩子
pub trait Game<H: Host> {
    /// 用户请求关闭窗口
    fn on_quit(&mut self, stage: &mut Stage<H>) -> Result<()> {
        stage.stop();
        Ok(())
    }

    /// 窗口获得/失去焦点，或鼠标进入/离开窗口
    fn on_focus(&mut self, _stage: &mut Stage<H>, _event: &FocusEvent) -> Result<()> {
        Ok(())
    }

    fn on_key_down(&mut self, _stage: &mut Stage<H>, _event: &KeyEvent) -> Result<()> {
        Ok(())
    }

    fn on_key_up(&mut self, _stage: &mut Stage<H>, _event: &KeyEvent) -> Result<()> {
        Ok(())
    }

    fn on_mouse_move(&mut self, stage: &mut Stage<H>, event: &MouseMoveEvent) -> Result<()> {
        stage.track_mouse_move(event)
    }

    fn on_mouse_up(&mut self, stage: &mut Stage<H>, event: &MouseButtonEvent) -> Result<()> {
        stage.track_mouse_up(event)
    }

    fn on_mouse_down(&mut self, stage: &mut Stage<H>, event: &MouseButtonEvent) -> Result<()> {
        stage.track_mouse_down(event)
    }

    fn on_resize(&mut self, _stage: &mut Stage<H>, _event: &ResizeEvent) -> Result<()> {
        Ok(())
    }

    /// 每帧调用一次，在所有对象的 `update` 之前
    fn update(&mut self, _stage: &mut Stage<H>) -> Result<()> {
        Ok(())
    }
}

/// 全部使用默认钩子的游戏
impl<H: Host> Game<H> for () {}

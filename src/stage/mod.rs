//! 游戏循环模块
//!
//! [`Stage`] 持有窗口后端和所有注册对象，负责事件分发与鼠标交互跟踪；
//! [`Game`] 是用户实现的事件钩子集合。
//!
//! ```no_run
//! use gametails::core::WindowConfig;
//! use gametails::stage::Stage;
//!
//! # fn main() -> gametails::core::Result<()> {
//! let mut stage = Stage::open(&WindowConfig::new((400, 300), "Hello, world!"))?;
//! stage.run(&mut ())?;
//! # Ok(())
//! # }
//! ```

mod game;
mod stage;

pub use game::Game;
pub use stage::Stage;

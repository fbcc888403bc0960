//! 对象系统模块
//!
//! 提供注册到 `Stage` 的可交互对象：[`Body`] 保存 id、位置和悬停标志，
//! [`GameObject`] 定义每帧更新与鼠标交互钩子，[`Collidable`] 是每种图形
//! 必须提供的点包含测试。

mod component;
mod game_object;

pub use component::{Body, ObjectId};
pub use game_object::{Collidable, GameObject, ObjectContext};
pub(crate) use game_object::Pending;

//! gametails - 基于 winit 的轻量游戏循环与鼠标交互层
//!
//! 应用实现 [`Game`](stage::Game) 接收窗口事件，把实现了
//! [`GameObject`](component::GameObject) 的对象注册到 [`Stage`](stage::Stage)，
//! 由 `Stage` 跟踪鼠标进入、离开、停留、按下、释放和拖拽并通知对象。
//!
//! # 模块结构
//!
//! - `core`：事件类型、键码、输入快照、日志、配置、错误处理
//! - `math`：整数坐标、颜色和点包含测试用的几何图形
//! - `host`：窗口后端抽象（winit 窗口、无窗口脚本后端）
//! - `component`：对象 id、定位实体和对象钩子
//! - `stage`：主循环、事件分发和对象注册表
//!
//! # 使用示例
//!
//! ```
//! use gametails::component::{Body, Collidable, GameObject};
//! use gametails::host::{HeadlessHost, Host};
//! use gametails::math::{point, Circle, Point};
//! use gametails::stage::Stage;
//!
//! struct Dot(Body);
//!
//! impl Collidable for Dot {
//!     fn is_colliding_with(&self, p: Point) -> bool {
//!         Circle::new(self.0.position(), 5).contains(p)
//!     }
//! }
//!
//! impl<H: Host> GameObject<H> for Dot {
//!     fn body(&self) -> &Body { &self.0 }
//!     fn body_mut(&mut self) -> &mut Body { &mut self.0 }
//! }
//!
//! let mut host = HeadlessHost::new(100, 100);
//! host.move_mouse(point(12, 10)).quit();
//!
//! let mut stage = Stage::new(host);
//! let dot = stage.spawn(Dot(Body::new(point(10, 10))));
//! stage.run(&mut ()).unwrap();
//!
//! assert!(stage.is_hovered(dot));
//! ```

pub mod core;
pub mod math;
pub mod host;
pub mod component;
pub mod stage;

pub use crate::component::{Body, Collidable, GameObject, ObjectContext, ObjectId};
pub use crate::core::{Event, GameError, Result};
pub use crate::stage::{Game, Stage};

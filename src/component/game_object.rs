//! GameObject - 可交互的定位对象
//!
//! 对象注册到 `Stage` 后，每帧接收 `update` 调用，并根据鼠标与对象的
//! 包含关系接收进入/离开/停留/按下/释放/拖拽通知。
//!
//! # 示例
//!
//! ```
//! use gametails::component::{Body, Collidable, GameObject, ObjectContext};
//! use gametails::core::{MouseButtonEvent, Result};
//! use gametails::host::Host;
//! use gametails::math::{point, Circle, Color, Point};
//!
//! struct PokeyCircle {
//!     body: Body,
//!     radius: i32,
//!     color: Color,
//! }
//!
//! impl Collidable for PokeyCircle {
//!     fn is_colliding_with(&self, p: Point) -> bool {
//!         Circle::new(self.body.position(), self.radius).contains(p)
//!     }
//! }
//!
//! impl<H: Host> GameObject<H> for PokeyCircle {
//!     fn body(&self) -> &Body { &self.body }
//!     fn body_mut(&mut self) -> &mut Body { &mut self.body }
//!
//!     fn on_mouse_down(&mut self, _ctx: &mut ObjectContext<'_, H>, _e: &MouseButtonEvent) -> Result<()> {
//!         self.color = if self.color == Color::BLUE { Color::GREEN } else { Color::BLUE };
//!         Ok(())
//!     }
//! }
//!
//! let circle = PokeyCircle { body: Body::new(point(20, 20)), radius: 50, color: Color::BLUE };
//! assert!(circle.is_colliding_with(point(20, 20)));
//! ```

use super::{Body, ObjectId};
use crate::core::{InputState, Key, KeyMods, MouseButtonEvent, MouseMoveEvent, PointerState, Result};
use crate::host::Host;
use crate::math::{Circle, Point, Polygon, Rect};

/// 点包含测试
///
/// 每种具体图形自己实现，没有默认实现。
pub trait Collidable {
    /// 点 `p` 是否在对象的几何范围内
    fn is_colliding_with(&self, p: Point) -> bool;
}

impl Collidable for Circle {
    fn is_colliding_with(&self, p: Point) -> bool {
        self.contains(p)
    }
}

impl Collidable for Rect {
    fn is_colliding_with(&self, p: Point) -> bool {
        self.contains(p)
    }
}

impl Collidable for Polygon {
    fn is_colliding_with(&self, p: Point) -> bool {
        self.contains(p)
    }
}

/// 游戏对象
///
/// 所有钩子默认什么都不做，只覆盖需要的即可。钩子返回的错误会中断当前帧，
/// 并从 `Stage::step` / `run` 原样返回。
pub trait GameObject<H: Host>: Collidable {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// 注册后分配的 id
    fn id(&self) -> Option<ObjectId> {
        self.body().id()
    }

    fn position(&self) -> Point {
        self.body().position()
    }

    fn move_by(&mut self, dx: i32, dy: i32) {
        self.body_mut().move_by(dx, dy);
    }

    /// 每帧调用一次
    fn update(&mut self, _ctx: &mut ObjectContext<'_, H>) -> Result<()> {
        Ok(())
    }

    /// 鼠标进入对象
    fn on_mouse_enter(&mut self, _ctx: &mut ObjectContext<'_, H>, _event: &MouseMoveEvent) -> Result<()> {
        Ok(())
    }

    /// 鼠标离开对象
    fn on_mouse_exit(&mut self, _ctx: &mut ObjectContext<'_, H>, _event: &MouseMoveEvent) -> Result<()> {
        Ok(())
    }

    /// 鼠标停留在对象内，每帧一次，事件由当帧的鼠标快照合成
    fn on_mouse_stay(&mut self, _ctx: &mut ObjectContext<'_, H>, _event: &MouseMoveEvent) -> Result<()> {
        Ok(())
    }

    /// 鼠标在对象内按下主按钮
    fn on_mouse_down(&mut self, _ctx: &mut ObjectContext<'_, H>, _event: &MouseButtonEvent) -> Result<()> {
        Ok(())
    }

    /// 对象被按下后主按钮释放，无论此时鼠标是否还在对象内
    fn on_mouse_up(&mut self, _ctx: &mut ObjectContext<'_, H>, _event: &MouseButtonEvent) -> Result<()> {
        Ok(())
    }

    /// 对象处于按下状态时鼠标移动
    fn on_mouse_drag(&mut self, _ctx: &mut ObjectContext<'_, H>, _event: &MouseMoveEvent) -> Result<()> {
        Ok(())
    }
}

/// 对象钩子提交给 `Stage` 的注册/销毁请求
///
/// id 计数器也放在这里，钩子里注册的对象可以立即拿到 id。
pub(crate) struct Pending<H: Host> {
    next_id: u64,
    pub(crate) spawned: Vec<(ObjectId, Box<dyn GameObject<H>>)>,
    pub(crate) doomed: Vec<ObjectId>,
}

impl<H: Host> Pending<H> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            spawned: Vec::new(),
            doomed: Vec::new(),
        }
    }

    pub(crate) fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.spawned.is_empty() && self.doomed.is_empty()
    }
}

/// 对象钩子可以访问的 `Stage` 状态
///
/// 通过 `spawn` / `destroy` 提交的请求在当前分发步骤结束后统一执行：
/// 新对象先加入，再执行销毁。因此在同一个步骤中被销毁的对象仍可能收到
/// 后续通知，新对象则从下一个步骤开始接收通知。
pub struct ObjectContext<'a, H: Host> {
    id: ObjectId,
    host: &'a mut H,
    input: &'a InputState,
    pending: &'a mut Pending<H>,
}

impl<'a, H: Host> ObjectContext<'a, H> {
    pub(crate) fn new(
        id: ObjectId,
        host: &'a mut H,
        input: &'a InputState,
        pending: &'a mut Pending<H>,
    ) -> Self {
        Self { id, host, input, pending }
    }

    /// 正在接收通知的对象 id
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn surface(&self) -> &H::Surface {
        self.host.surface()
    }

    pub fn surface_mut(&mut self) -> &mut H::Surface {
        self.host.surface_mut()
    }

    /// 按上一次刷新的键盘快照判断按键是否按下
    pub fn key_is_down(&self, key: Key) -> bool {
        self.input.key_is_down(key)
    }

    pub fn modifiers(&self) -> KeyMods {
        self.input.modifiers()
    }

    pub fn pointer(&self) -> &PointerState {
        self.input.pointer()
    }

    /// 请求注册新对象
    ///
    /// id 立即分配并返回，对象在当前分发步骤结束后加入 `Stage`。
    pub fn attach(&mut self, mut object: Box<dyn GameObject<H>>) -> ObjectId {
        let id = self.pending.allocate_id();
        object.body_mut().assign_id(id);
        self.pending.spawned.push((id, object));
        id
    }

    pub fn spawn<T>(&mut self, object: T) -> ObjectId
    where
        T: GameObject<H> + 'static,
    {
        self.attach(Box::new(object))
    }

    /// 请求销毁对象
    pub fn destroy(&mut self, id: ObjectId) {
        if !self.pending.doomed.contains(&id) {
            self.pending.doomed.push(id);
        }
    }

    /// 请求销毁当前对象
    pub fn destroy_self(&mut self) {
        let id = self.id;
        self.destroy(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use crate::math::point;

    #[test]
    fn test_shapes_are_collidable() {
        let shapes: Vec<Box<dyn Collidable>> = vec![
            Box::new(Circle::new(point(0, 0), 5)),
            Box::new(Rect::new(point(-5, -5), 10, 10)),
            Box::new(Polygon::new(vec![point(-5, -5), point(5, -5), point(0, 5)])),
        ];
        for shape in &shapes {
            assert!(shape.is_colliding_with(point(0, 0)));
            assert!(!shape.is_colliding_with(point(50, 50)));
        }
    }

    #[test]
    fn test_context_deduplicates_destroy() {
        let mut host = HeadlessHost::new(10, 10);
        let input = InputState::new();
        let mut pending = Pending::new();
        let me = ObjectId::from_raw(4);

        let mut ctx = ObjectContext::new(me, &mut host, &input, &mut pending);
        ctx.destroy_self();
        ctx.destroy(me);
        ctx.destroy(ObjectId::from_raw(9));
        assert_eq!(ctx.id(), me);

        assert_eq!(pending.doomed, vec![me, ObjectId::from_raw(9)]);
    }

    #[test]
    fn test_context_spawn_assigns_id_now() {
        struct Marker(Body);

        impl Collidable for Marker {
            fn is_colliding_with(&self, _p: Point) -> bool {
                false
            }
        }

        impl GameObject<HeadlessHost> for Marker {
            fn body(&self) -> &Body {
                &self.0
            }

            fn body_mut(&mut self) -> &mut Body {
                &mut self.0
            }
        }

        let mut host = HeadlessHost::new(10, 10);
        let input = InputState::new();
        let mut pending = Pending::new();
        let parent = pending.allocate_id();

        let mut ctx = ObjectContext::new(parent, &mut host, &input, &mut pending);
        let first = ctx.spawn(Marker(Body::new(point(0, 0))));
        let second = ctx.spawn(Marker(Body::new(point(1, 1))));

        assert!(parent < first && first < second);
        assert!(!pending.is_empty());
        let ids: Vec<_> = pending.spawned.iter().map(|(id, object)| (*id, object.id())).collect();
        assert_eq!(ids, vec![(first, Some(first)), (second, Some(second))]);
    }
}

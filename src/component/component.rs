//! 对象标识与位置数据

use std::fmt;

use crate::math::{Offset, Point};

/// 注册到 `Stage` 的对象 id
///
/// 由 `Stage` 单调递增分配，同一个 `Stage` 内永不复用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 对象的基础数据：id、位置、鼠标悬停标志
///
/// 每个 [`GameObject`](super::GameObject) 持有一个 `Body`。
/// id 和悬停标志只由 `Stage` 修改，位置由对象自己修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    id: Option<ObjectId>,
    position: Point,
    hovered: bool,
}

impl Body {
    /// 创建尚未注册的 Body
    pub fn new(position: Point) -> Self {
        Self {
            id: None,
            position,
            hovered: false,
        }
    }

    /// 注册后分配的 id，注册前为 `None`
    pub fn id(&self) -> Option<ObjectId> {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn set_x(&mut self, x: i32) {
        self.position.x = x;
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    pub fn set_y(&mut self, y: i32) {
        self.position.y = y;
    }

    /// 按偏移量整体平移
    ///
    /// ```
    /// use gametails::component::Body;
    /// use gametails::math::point;
    ///
    /// let mut body = Body::new(point(10, 10));
    /// body.move_by(-3, 5);
    /// assert_eq!(body.position(), point(7, 15));
    /// assert_eq!((body.x(), body.y()), (7, 15));
    /// ```
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.position += Offset::new(dx, dy);
    }

    /// 鼠标当前是否在对象内
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// 注册时调用，悬停状态从头开始
    pub(crate) fn assign_id(&mut self, id: ObjectId) {
        self.id = Some(id);
        self.hovered = false;
    }

    /// 从 `Stage` 移除时调用，之后可以再次注册
    pub(crate) fn detach(&mut self) {
        self.id = None;
        self.hovered = false;
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }
}

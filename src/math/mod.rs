//! 二维整数数学类型
//!
//! 屏幕坐标使用整数像素，基于 `nalgebra` 的 `Point2<i32>` 与 `Vector2<i32>`。
//!
//! # 模块组织
//!
//! - **基础类型**：Point, Offset, Size, Color
//! - **几何图形**：Circle, Rect, Polygon 的点包含测试（见 geometry 子模块）

pub mod geometry;

pub use geometry::{Circle, Polygon, Rect};

/// 屏幕上的一个点（像素坐标，y 轴向下）
pub type Point = nalgebra::Point2<i32>;

/// 两点之间的位移
pub type Offset = nalgebra::Vector2<i32>;

/// 创建一个点
pub fn point(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// 窗口或表面尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// 颜色类型（RGBA，每通道 0-255）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    /// 创建新的颜色
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 创建不透明的 RGB 颜色
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

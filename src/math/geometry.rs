//! 几何图形的点包含测试
//!
//! 提供常见二维图形判断"点是否在图形内"的函数，游戏对象实现
//! [`Collidable`](crate::component::Collidable) 时可以直接使用。
//!
//! 所有计算都在 `i64` 上完成，避免大坐标平方时溢出。

use super::{Offset, Point};

/// 圆形
///
/// 边界上的点视为在圆内。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub center: Point,
    pub radius: i32,
}

impl Circle {
    pub fn new(center: Point, radius: i32) -> Self {
        Self { center, radius }
    }

    /// 判断点是否在圆内
    ///
    /// # 示例
    ///
    /// ```
    /// use gametails::math::{point, Circle};
    ///
    /// let circle = Circle::new(point(20, 20), 50);
    /// assert!(circle.contains(point(20, 20)));
    /// assert!(circle.contains(point(70, 20)));
    /// assert!(!circle.contains(point(1000, 1000)));
    /// ```
    pub fn contains(&self, p: Point) -> bool {
        let dx = (p.x - self.center.x) as i64;
        let dy = (p.y - self.center.y) as i64;
        let r = self.radius as i64;
        dx * dx + dy * dy <= r * r
    }

    pub fn translate(&mut self, offset: Offset) {
        self.center += offset;
    }
}

/// 轴对齐矩形
///
/// 左上角包含，右下角不包含：`x <= px < x + width`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub origin: Point,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(origin: Point, width: i32, height: i32) -> Self {
        Self { origin, width, height }
    }

    pub fn contains(&self, p: Point) -> bool {
        let (x, y) = (p.x as i64, p.y as i64);
        let left = self.origin.x as i64;
        let top = self.origin.y as i64;
        x >= left
            && x < left + self.width as i64
            && y >= top
            && y < top + self.height as i64
    }

    pub fn translate(&mut self, offset: Offset) {
        self.origin += offset;
    }
}

/// 多边形（顶点按顺序给出，首尾自动闭合）
///
/// 使用奇偶规则判断，自相交多边形的重叠部分视为外部。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// 射线法判断点是否在多边形内
    ///
    /// 从测试点向 +x 方向发射水平射线，统计与各边的交点数，奇数为内部。
    /// 少于三个顶点的多边形不包含任何点。
    pub fn contains(&self, p: Point) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }

        let (px, py) = (p.x as i64, p.y as i64);
        let mut inside = false;
        let mut j = self.vertices.len() - 1;

        for i in 0..self.vertices.len() {
            let (ax, ay) = (self.vertices[i].x as i64, self.vertices[i].y as i64);
            let (bx, by) = (self.vertices[j].x as i64, self.vertices[j].y as i64);

            if (ay > py) != (by > py) {
                // 交点 x = ax + (py - ay) * (bx - ax) / (by - ay)，两边同乘 (by - ay) 避免除法
                let lhs = (px - ax) * (by - ay);
                let rhs = (py - ay) * (bx - ax);
                let crosses = if by > ay { lhs < rhs } else { lhs > rhs };
                if crosses {
                    inside = !inside;
                }
            }
            j = i;
        }

        inside
    }

    pub fn translate(&mut self, offset: Offset) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    #[test]
    fn test_circle_contains() {
        let circle = Circle::new(point(20, 20), 50);
        assert!(circle.contains(point(20, 20)));
        assert!(circle.contains(point(-30, 20)));
        assert!(!circle.contains(point(56, 56)));
        assert!(!circle.contains(point(1000, 1000)));
    }

    #[test]
    fn test_rect_half_open() {
        let rect = Rect::new(point(10, 10), 20, 10);
        assert!(rect.contains(point(10, 10)));
        assert!(rect.contains(point(29, 19)));
        assert!(!rect.contains(point(30, 15)));
        assert!(!rect.contains(point(15, 20)));
        assert!(!rect.contains(point(9, 15)));
    }

    #[test]
    fn test_polygon_triangle() {
        let tri = Polygon::new(vec![point(0, 0), point(10, 0), point(0, 10)]);
        assert!(tri.contains(point(2, 2)));
        assert!(!tri.contains(point(8, 8)));
        assert!(!tri.contains(point(-1, 5)));
    }

    #[test]
    fn test_polygon_concave() {
        // U 形
        let u = Polygon::new(vec![
            point(0, 0),
            point(30, 0),
            point(30, 30),
            point(20, 30),
            point(20, 10),
            point(10, 10),
            point(10, 30),
            point(0, 30),
        ]);
        assert!(u.contains(point(5, 20)));
        assert!(u.contains(point(25, 20)));
        assert!(!u.contains(point(15, 20)));
        assert!(u.contains(point(15, 5)));
    }

    #[test]
    fn test_degenerate_polygon() {
        let line = Polygon::new(vec![point(0, 0), point(10, 10)]);
        assert!(!line.contains(point(5, 5)));
    }

    #[test]
    fn test_translate() {
        let mut circle = Circle::new(point(0, 0), 5);
        circle.translate(Offset::new(100, 0));
        assert!(circle.contains(point(100, 0)));
        assert!(!circle.contains(point(0, 0)));
    }
}

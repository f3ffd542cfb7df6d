//! Tooltip placement.

/// A point in CSS pixels, viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Place the tooltip `offset` right of and below the pointer, pulled back so
/// its box stays `margin` inside the viewport's right and bottom edges.
pub fn tooltip_position(
    pointer: Point,
    tooltip: Size,
    viewport: Size,
    offset: f64,
    margin: f64,
) -> Point {
    let max_x = viewport.width - tooltip.width - margin;
    let max_y = viewport.height - tooltip.height - margin;
    Point::new((pointer.x + offset).min(max_x), (pointer.y + offset).min(max_y))
}

use crate::scene::{Point, Rect};

/// Pixels per inch of every canvas; plotted figures specify sizes in points.
pub(crate) const PIXELS_PER_INCH: f32 = 100.0;

pub(crate) fn pt(points: f32) -> f32 {
    points * PIXELS_PER_INCH / 72.0
}

/// Maps a data-space window onto a pixel frame. The y axis points up, as in a
/// plotting library, so `y(y_max)` is the top of the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Axes {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
}

impl Axes {
    /// `frame` is `[left, top, width, height]` in pixels.
    pub(crate) fn new(frame: [f32; 4], x: (f32, f32), y: (f32, f32)) -> Self {
        let [left, top, width, height] = frame;
        Self {
            left,
            top,
            width,
            height,
            x_min: x.0,
            x_max: x.1,
            y_min: y.0,
            y_max: y.1,
        }
    }

    pub(crate) fn x(&self, x: f32) -> f32 {
        self.left + (x - self.x_min) / (self.x_max - self.x_min) * self.width
    }

    pub(crate) fn y(&self, y: f32) -> f32 {
        self.top + (self.y_max - y) / (self.y_max - self.y_min) * self.height
    }

    pub(crate) fn point(&self, x: f32, y: f32) -> Point {
        Point::new(self.x(x), self.y(y))
    }

    pub(crate) fn dx(&self, w: f32) -> f32 {
        w / (self.x_max - self.x_min) * self.width
    }

    pub(crate) fn dy(&self, h: f32) -> f32 {
        h / (self.y_max - self.y_min) * self.height
    }

    /// Rectangle whose lower-left corner is `(x, y)` in data space.
    pub(crate) fn rect(&self, x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(self.x(x), self.y(y + h), self.dx(w), self.dy(h))
    }

    pub(crate) fn frame(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_frame() {
        let axes = Axes::new([40.0, 20.0, 200.0, 100.0], (0.0, 10.0), (0.0, 5.0));
        assert_eq!(axes.point(0.0, 5.0), Point::new(40.0, 20.0));
        assert_eq!(axes.point(10.0, 0.0), Point::new(240.0, 120.0));
        assert_eq!(axes.dx(2.5), 50.0);
        assert_eq!(axes.dy(1.0), 20.0);
    }

    #[test]
    fn rect_uses_lower_left_corner() {
        let axes = Axes::new([0.0, 0.0, 100.0, 100.0], (0.0, 10.0), (0.0, 10.0));
        let rect = axes.rect(1.0, 2.0, 3.0, 4.0);
        assert_eq!(rect.origin, Point::new(10.0, 40.0));
        assert!((rect.width - 30.0).abs() < 1e-4);
        assert!((rect.height - 40.0).abs() < 1e-4);
    }

    #[test]
    fn points_scale_to_pixels() {
        assert!((pt(72.0) - 100.0).abs() < 1e-4);
    }
}

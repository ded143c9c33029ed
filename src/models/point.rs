/// 2D point with floating point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Divide each coordinate by its axis factor; non-positive factors
    /// leave that axis untouched
    pub fn unscale(&self, sx: f32, sy: f32) -> Self {
        let axis = |v: f32, f: f32| if f > 0.0 { v / f } else { v };
        Self {
            x: axis(self.x, sx),
            y: axis(self.y, sy),
        }
    }
}

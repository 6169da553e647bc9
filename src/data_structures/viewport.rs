/// Logical size of the drawing area.
///
/// `width` tracks the host container; `height` is fixed by configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Physical pixel dimensions for a given pixel ratio, floored.
    pub fn physical(&self, pixel_ratio: f64) -> [u32; 2] {
        [
            (self.width as f64 * pixel_ratio).floor() as u32,
            (self.height as f64 * pixel_ratio).floor() as u32,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_is_floored() {
        assert_eq!(ViewportSize::new(601, 300).physical(1.5), [901, 450]);
        assert_eq!(ViewportSize::new(600, 300).physical(2.0), [1200, 600]);
    }
}

use serde::{Deserialize, Serialize};

/// Framebuffer clear and depth settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayOptions {
    /// Linear RGB color the framebuffer is cleared to each frame.
    pub clear_color: [f32; 3],
    /// Enable depth testing (the shape is drawn two-sided either way).
    pub depth_test: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0],
            depth_test: true,
        }
    }
}

impl DisplayOptions {
    /// Clear color as a wgpu color with opaque alpha.
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = self.clear_color;
        wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        }
    }
}

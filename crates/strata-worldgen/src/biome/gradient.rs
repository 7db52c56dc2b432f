//! Color gradient the biome noise channel is mapped through.

use serde::{Deserialize, Serialize};

/// Linear RGB color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
}

impl Rgb {
    /// Creates a color from its components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Self) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Component-wise linear interpolation; `t = 0` gives `self`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Converts to 8-bit channels, clamping out-of-range components.
    pub fn to_u8(self) -> [u8; 3] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// How colors between two keys are computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientMode {
    /// Linear interpolation between neighboring keys.
    #[default]
    Blend,
    /// Hard steps: the color of the first key at or after `t`.
    Fixed,
}

/// A color key at a position in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientKey {
    /// Key position.
    pub time: f32,
    /// Key color.
    pub color: Rgb,
}

/// A 1-D color gradient with keys sorted by time.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    mode: GradientMode,
    keys: Vec<GradientKey>,
}

impl Gradient {
    /// Builds a gradient, sorting keys by time. Returns `None` without keys.
    pub fn new(mode: GradientMode, mut keys: Vec<GradientKey>) -> Option<Self> {
        if keys.is_empty() {
            return None;
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Some(Self { mode, keys })
    }

    /// The interpolation mode.
    pub fn mode(&self) -> GradientMode {
        self.mode
    }

    /// Keys in ascending time order.
    pub fn keys(&self) -> &[GradientKey] {
        &self.keys
    }

    /// Evaluates the gradient at `t`, clamped to `[0, 1]`.
    pub fn evaluate(&self, t: f64) -> Rgb {
        let t = (t as f32).clamp(0.0, 1.0);
        let first = self.keys[0];
        if t <= first.time {
            return first.color;
        }

        for pair in self.keys.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t > hi.time {
                continue;
            }
            return match self.mode {
                GradientMode::Fixed => hi.color,
                GradientMode::Blend => {
                    let span = hi.time - lo.time;
                    if span <= f32::EPSILON {
                        hi.color
                    } else {
                        lo.color.lerp(hi.color, (t - lo.time) / span)
                    }
                }
            };
        }

        self.keys[self.keys.len() - 1].color
    }
}

use crate::foundation::error::{StarfieldError, StarfieldResult};

pub use kurbo::{Point, Rect, Vec2};

/// Absolute 0-based frame index in playback time.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> StarfieldResult<Self> {
        if start.0 > end.0 {
            return Err(StarfieldError::validation(
                "FrameRange start must be <= end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> StarfieldResult<Self> {
        if den == 0 {
            return Err(StarfieldError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(StarfieldError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a frame index to elapsed seconds since frame 0.
    pub fn frame_to_secs(self, frame: FrameIndex) -> f64 {
        (frame.0 as f64) * self.frame_duration_secs()
    }
}

/// Viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> StarfieldResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(&self) -> StarfieldResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StarfieldError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(())
    }

    /// Resolve a horizontal percentage (0..=100) into pixels.
    pub fn pct_x(&self, pct: f64) -> f64 {
        f64::from(self.width) * pct / 100.0
    }

    /// Resolve a vertical percentage (0..=100) into pixels.
    pub fn pct_y(&self, pct: f64) -> f64 {
        f64::from(self.height) * pct / 100.0
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha set from a `[0, 1]` fraction.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Alpha as a `[0, 1]` fraction.
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// `#rrggbb` without alpha.
    pub fn hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba(...)` notation.
    pub fn css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            fmt_num(self.alpha_f64())
        )
    }
}

/// Format a number compactly for SVG/CSS output (at most 3 decimals, no trailing zeros).
pub fn fmt_num(v: f64) -> String {
    let v = if v.abs() < 5e-4 { 0.0 } else { v };
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_range_rejects_inverted_bounds() {
        assert!(FrameRange::new(FrameIndex(3), FrameIndex(2)).is_err());
        let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
        assert_eq!(r.len_frames(), 3);
        assert_eq!(
            FrameRange::new(FrameIndex(4), FrameIndex(4))
                .unwrap()
                .len_frames(),
            0
        );
    }

    #[test]
    fn fps_converts_frames_to_seconds() {
        let fps = Fps::new(30, 1).unwrap();
        assert_eq!(fps.frame_to_secs(FrameIndex(60)), 2.0);
        assert_eq!(fps.frame_duration_secs(), 1.0 / 30.0);
        assert!(Fps::new(0, 1).is_err());
        assert!(Fps::new(30, 0).is_err());
    }

    #[test]
    fn canvas_resolves_percentages() {
        let c = Canvas::new(200, 100).unwrap();
        assert_eq!(c.pct_x(37.0), 74.0);
        assert_eq!(c.pct_y(50.0), 50.0);
        assert!(Canvas::new(0, 10).is_err());
    }

    #[test]
    fn color_formatting() {
        let c = Rgba8::rgb(139, 92, 246).with_alpha(0.35);
        assert_eq!(c.hex_rgb(), "#8b5cf6");
        assert_eq!(c.a, 89);
        assert!(c.css().starts_with("rgba(139, 92, 246, 0.34"));
    }

    #[test]
    fn fmt_num_trims() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(0.25), "0.25");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(12.3456), "12.346");
    }
}

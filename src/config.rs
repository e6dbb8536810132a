use std::{fs::File, io::BufReader, path::Path};

use crate::{
    field::{ElementKind, count_from_config},
    foundation::core::{Canvas, Rect, Rgba8},
    foundation::error::{StarfieldError, StarfieldResult},
};

/// Horizontal anchoring of a static decoration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAnchor {
    /// Left edge at this percentage of the canvas width.
    Left(f64),
    /// Right edge at this percentage of the canvas width, measured from the right.
    Right(f64),
    /// Horizontally centered.
    Center,
}

/// Vertical anchoring of a static decoration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAnchor {
    /// Top edge this many pixels below the canvas top (negative pokes out above).
    Top(f64),
    /// Bottom edge this many pixels above the canvas bottom (negative pokes out below).
    Bottom(f64),
}

/// A soft, heavily blurred color region.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlowSpec {
    pub horizontal: HAnchor,
    pub vertical: VAnchor,
    /// Diameter in pixels.
    pub diameter: f64,
    /// Gaussian blur radius in pixels.
    pub blur: f64,
    pub color: Rgba8,
}

impl GlowSpec {
    /// Bounding box of the (unblurred) disc on `canvas`.
    pub fn rect(&self, canvas: &Canvas) -> Rect {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let d = self.diameter;
        let x0 = match self.horizontal {
            HAnchor::Left(pct) => canvas.pct_x(pct),
            HAnchor::Right(pct) => w - canvas.pct_x(pct) - d,
            HAnchor::Center => (w - d) / 2.0,
        };
        let y0 = match self.vertical {
            VAnchor::Top(px) => px,
            VAnchor::Bottom(px) => h - px - d,
        };
        Rect::new(x0, y0, x0 + d, y0 + d)
    }

    fn validate(&self) -> StarfieldResult<()> {
        let pct_ok = match self.horizontal {
            HAnchor::Left(p) | HAnchor::Right(p) => p.is_finite(),
            HAnchor::Center => true,
        };
        let px_ok = match self.vertical {
            VAnchor::Top(px) | VAnchor::Bottom(px) => px.is_finite(),
        };
        if !pct_ok || !px_ok {
            return Err(StarfieldError::validation("glow anchor must be finite"));
        }
        if !self.diameter.is_finite() || self.diameter <= 0.0 {
            return Err(StarfieldError::validation("glow diameter must be > 0"));
        }
        if !self.blur.is_finite() || self.blur < 0.0 {
            return Err(StarfieldError::validation("glow blur must be >= 0"));
        }
        Ok(())
    }
}

/// The moon accent: a translucent disc with a ring, a sheen and a few craters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MoonSpec {
    /// Right edge inset, percent of canvas width.
    pub right_pct: f64,
    /// Top edge inset, percent of canvas height.
    pub top_pct: f64,
    /// Diameter in pixels.
    pub diameter: f64,
}

impl Default for MoonSpec {
    fn default() -> Self {
        Self {
            right_pct: 8.0,
            top_pct: 14.0,
            diameter: 112.0,
        }
    }
}

impl MoonSpec {
    /// Resting bounding box on `canvas`, before the bob offset.
    pub fn rect(&self, canvas: &Canvas) -> Rect {
        let x0 = f64::from(canvas.width) - canvas.pct_x(self.right_pct) - self.diameter;
        let y0 = canvas.pct_y(self.top_pct);
        Rect::new(x0, y0, x0 + self.diameter, y0 + self.diameter)
    }
}

/// Everything a render surface needs, loadable from JSON.
///
/// Every field has a default, so `{}` yields the reference layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub canvas: Canvas,
    /// Number of stars, clamped to `0..=MAX_ELEMENTS`.
    pub star_count: i64,
    /// Number of bubbles, clamped to `0..=MAX_ELEMENTS`.
    pub bubble_count: i64,
    /// Page color painted beneath the overlay in raster and SVG output.
    pub background: Rgba8,
    pub glows: Vec<GlowSpec>,
    pub moon: Option<MoonSpec>,
    /// How far below the canvas bottom a resting bubble's bottom edge sits, in pixels.
    pub bubble_start_below: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            star_count: ElementKind::Star.default_count() as i64,
            bubble_count: ElementKind::Bubble.default_count() as i64,
            background: Rgba8::rgb(7, 7, 20),
            glows: default_glows(),
            moon: Some(MoonSpec::default()),
            bubble_start_below: 120.0,
        }
    }
}

/// Violet, cyan and pink glow regions framing the page.
pub fn default_glows() -> Vec<GlowSpec> {
    vec![
        GlowSpec {
            horizontal: HAnchor::Left(10.0),
            vertical: VAnchor::Top(-208.0),
            diameter: 520.0,
            blur: 160.0,
            color: Rgba8::rgb(139, 92, 246).with_alpha(0.35),
        },
        GlowSpec {
            horizontal: HAnchor::Right(10.0),
            vertical: VAnchor::Top(-176.0),
            diameter: 520.0,
            blur: 170.0,
            color: Rgba8::rgb(34, 211, 238).with_alpha(0.25),
        },
        GlowSpec {
            horizontal: HAnchor::Center,
            vertical: VAnchor::Bottom(-224.0),
            diameter: 540.0,
            blur: 180.0,
            color: Rgba8::rgb(244, 114, 182).with_alpha(0.25),
        },
    ]
}

impl SurfaceConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StarfieldResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| StarfieldError::serde(format!("parse surface config JSON: {e}")))?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StarfieldResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StarfieldError::validation(format!("open surface config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> StarfieldResult<()> {
        self.canvas.validate()?;
        for glow in &self.glows {
            glow.validate()?;
        }
        if let Some(moon) = &self.moon
            && (!moon.diameter.is_finite()
                || moon.diameter <= 0.0
                || !moon.right_pct.is_finite()
                || !moon.top_pct.is_finite())
        {
            return Err(StarfieldError::validation(
                "moon diameter must be > 0 and insets finite",
            ));
        }
        if !self.bubble_start_below.is_finite() {
            return Err(StarfieldError::validation(
                "bubble_start_below must be finite",
            ));
        }
        Ok(())
    }

    /// Effective star batch size.
    pub fn stars(&self) -> usize {
        count_from_config(ElementKind::Star, self.star_count)
    }

    /// Effective bubble batch size.
    pub fn bubbles(&self) -> usize {
        count_from_config(ElementKind::Bubble, self.bubble_count)
    }
}

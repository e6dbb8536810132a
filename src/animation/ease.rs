use crate::foundation::core::fmt_num;

/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation (constant velocity).
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// The standard smooth accelerate/decelerate curve, `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// CSS-style cubic bezier with implicit endpoints `(0,0)` and `(1,1)`.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

const EASE_IN_OUT: (f64, f64, f64, f64) = (0.42, 0.0, 0.58, 1.0);

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::EaseInOut => {
                let (x1, y1, x2, y2) = EASE_IN_OUT;
                cubic_bezier(x1, y1, x2, y2, t)
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// Return `true` when the curve parameters are usable.
    ///
    /// Bezier `x` control points must lie in `[0, 1]` so the curve stays a function of time.
    pub fn is_valid(self) -> bool {
        match self {
            Self::CubicBezier { x1, y1, x2, y2 } => {
                [x1, y1, x2, y2].iter().all(|v| v.is_finite())
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
            }
            _ => true,
        }
    }

    /// CSS `animation-timing-function` equivalent.
    pub fn css(self) -> String {
        let (x1, y1, x2, y2) = match self {
            Self::Linear => return "linear".to_string(),
            Self::EaseInOut => return "ease-in-out".to_string(),
            Self::InQuad => (0.11, 0.0, 0.5, 0.0),
            Self::OutQuad => (0.5, 1.0, 0.89, 1.0),
            Self::InOutQuad => (0.45, 0.0, 0.55, 1.0),
            Self::InCubic => (0.32, 0.0, 0.67, 0.0),
            Self::OutCubic => (0.33, 1.0, 0.68, 1.0),
            Self::InOutCubic => (0.65, 0.0, 0.35, 1.0),
            Self::CubicBezier { x1, y1, x2, y2 } => (x1, y1, x2, y2),
        };
        format!(
            "cubic-bezier({}, {}, {}, {})",
            fmt_num(x1),
            fmt_num(y1),
            fmt_num(x2),
            fmt_num(y2)
        )
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Polynomial coefficients of each axis, with P0 = (0,0) and P3 = (1,1).
    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample_x = |t: f64| ((ax * t + bx) * t + cx) * t;
    let sample_dx = |t: f64| (3.0 * ax * t + 2.0 * bx) * t + cx;
    let sample_y = |t: f64| ((ay * t + by) * t + cy) * t;

    const EPS: f64 = 1e-7;

    let mut t = x;
    for _ in 0..8 {
        let err = sample_x(t) - x;
        if err.abs() < EPS {
            return sample_y(t);
        }
        let d = sample_dx(t);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }

    // Newton stalled on a flat tangent; bisection always converges on a monotonic x(t).
    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..64 {
        let v = sample_x(t);
        if (v - x).abs() < EPS {
            break;
        }
        if v < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    sample_y(t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

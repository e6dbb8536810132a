//! Perpetual per-element motion.
//!
//! Each generated element gets its own set of looping transitions, parameterized by the element's
//! `(delay, duration)`. Transitions share no state, so any element can be sampled at any instant
//! independently of the others.

use crate::{
    animation::{
        anim::{Keyframes, Transition},
        ease::Ease,
        timing::LoopTiming,
    },
    field::{DecorativeElement, ElementKind},
    foundation::core::{Fps, FrameIndex, FrameRange, Vec2},
    foundation::error::StarfieldResult,
};

/// Star opacity over one cycle: dim, bright, dim.
pub const STAR_TWINKLE: [f64; 3] = [0.2, 0.9, 0.2];
/// Star opacity before its first cycle starts.
pub const STAR_REST_OPACITY: f64 = 0.6;
/// Bubble vertical offset in pixels over one cycle (negative is up).
pub const BUBBLE_RISE: [f64; 2] = [-40.0, -1200.0];
/// Bubble lateral drift in pixels over one cycle.
pub const BUBBLE_DRIFT: [f64; 4] = [0.0, 20.0, -10.0, 0.0];

/// Moon bob in pixels over one cycle.
pub const MOON_BOB: [f64; 3] = [0.0, -10.0, 0.0];
/// Moon opacity over one cycle.
pub const MOON_GLOW: [f64; 3] = [0.85, 1.0, 0.85];
/// Moon loop period in seconds.
pub const MOON_PERIOD_SECS: f64 = 6.0;

/// Resolved visual state of one element at one instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ElementState {
    /// Element opacity, `0..=1`.
    pub opacity: f64,
    /// Translation in pixels relative to the element's laid-out position.
    pub offset: Vec2,
}

/// The looping transitions driving one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementMotion {
    pub id: usize,
    pub kind: ElementKind,
    /// State shown before the startup delay elapses.
    pub rest: ElementState,
    pub opacity: Option<Transition<f64>>,
    pub offset_x: Option<Transition<f64>>,
    pub offset_y: Option<Transition<f64>>,
}

impl ElementMotion {
    /// Build the motion for a generated element.
    pub fn for_element(el: &DecorativeElement) -> StarfieldResult<Self> {
        let timing = LoopTiming::forever(el.timing.delay, el.timing.duration)?;
        match el.kind {
            ElementKind::Star => Ok(Self {
                id: el.id,
                kind: el.kind,
                rest: ElementState {
                    opacity: STAR_REST_OPACITY,
                    offset: Vec2::ZERO,
                },
                opacity: Some(Transition::new(
                    Keyframes::evenly(STAR_TWINKLE, Ease::EaseInOut)?,
                    timing,
                )?),
                offset_x: None,
                offset_y: None,
            }),
            ElementKind::Bubble => Ok(Self {
                id: el.id,
                kind: el.kind,
                rest: ElementState {
                    opacity: el.opacity.unwrap_or(1.0).clamp(0.0, 1.0),
                    offset: Vec2::ZERO,
                },
                opacity: None,
                offset_x: Some(Transition::new(
                    Keyframes::evenly(BUBBLE_DRIFT, Ease::Linear)?,
                    timing,
                )?),
                offset_y: Some(Transition::new(
                    Keyframes::evenly(BUBBLE_RISE, Ease::Linear)?,
                    timing,
                )?),
            }),
        }
    }

    /// Sample the element at `elapsed` seconds since mount.
    pub fn sample(&self, elapsed: f64) -> ElementState {
        sample_parts(
            &self.rest,
            self.opacity.as_ref(),
            self.offset_x.as_ref(),
            self.offset_y.as_ref(),
            elapsed,
        )
    }

    /// Timing shared by every transition of this element.
    pub fn timing(&self) -> Option<LoopTiming> {
        self.opacity
            .as_ref()
            .or(self.offset_x.as_ref())
            .or(self.offset_y.as_ref())
            .map(|t| t.timing)
    }
}

/// Motion of the static moon accent: a slow vertical bob with a matching glow.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AccentMotion {
    pub opacity: Transition<f64>,
    pub offset_y: Transition<f64>,
}

impl AccentMotion {
    pub fn moon() -> StarfieldResult<Self> {
        let timing = LoopTiming::forever(0.0, MOON_PERIOD_SECS)?;
        Ok(Self {
            opacity: Transition::new(Keyframes::evenly(MOON_GLOW, Ease::EaseInOut)?, timing)?,
            offset_y: Transition::new(Keyframes::evenly(MOON_BOB, Ease::EaseInOut)?, timing)?,
        })
    }

    pub fn sample(&self, elapsed: f64) -> ElementState {
        let rest = ElementState {
            opacity: MOON_GLOW[0],
            offset: Vec2::ZERO,
        };
        sample_parts(
            &rest,
            Some(&self.opacity),
            None,
            Some(&self.offset_y),
            elapsed,
        )
    }
}

fn sample_parts(
    rest: &ElementState,
    opacity: Option<&Transition<f64>>,
    offset_x: Option<&Transition<f64>>,
    offset_y: Option<&Transition<f64>>,
    elapsed: f64,
) -> ElementState {
    let pick = |tr: Option<&Transition<f64>>, fallback: f64| {
        tr.and_then(|t| t.sample(elapsed)).unwrap_or(fallback)
    };
    ElementState {
        opacity: pick(opacity, rest.opacity).clamp(0.0, 1.0),
        offset: Vec2::new(pick(offset_x, rest.offset.x), pick(offset_y, rest.offset.y)),
    }
}

/// Fixed-rate frame clock: yields each frame of a range with its elapsed time.
///
/// Stands in for the host's frame callback; elapsed time is computed from the frame index, never
/// accumulated, so long runs do not drift.
#[derive(Clone, Debug)]
pub struct FrameClock {
    fps: Fps,
    next: u64,
    end: u64,
}

impl FrameClock {
    pub fn new(fps: Fps, range: FrameRange) -> Self {
        Self {
            fps,
            next: range.start.0,
            end: range.end.0,
        }
    }
}

impl Iterator for FrameClock {
    type Item = (FrameIndex, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let f = FrameIndex(self.next);
        self.next += 1;
        Some((f, self.fps.frame_to_secs(f)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.end.saturating_sub(self.next)).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

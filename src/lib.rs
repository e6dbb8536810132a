//! Starfield is a deterministic animated backdrop engine.
//!
//! A [`RenderSurface`] is mounted from a [`SurfaceConfig`]: it generates a fixed batch of twinkling
//! stars and rising bubbles from their indices alone, attaches a perpetual looping motion to each,
//! and composes them with static glows and a bobbing moon into a click-through overlay.
//!
//! - Sample any instant with [`RenderSurface::sample`]
//! - Export it as SVG ([`frame_to_svg`]), PNG ([`rasterize_frame`]) or a PNG sequence
//!   ([`render_range`])
//! - Lower the whole overlay to HTML/CSS with [`overlay_html`]
#![forbid(unsafe_code)]

mod animation;
mod foundation;

pub mod config;
pub mod driver;
pub mod field;
pub mod render;
pub mod surface;

pub use crate::animation::anim::{Keyframe, Keyframes, Lerp, Transition};
pub use crate::animation::ease::Ease;
pub use crate::animation::timing::{LoopMode, LoopTiming, Phase, Repeat};
pub use crate::config::{GlowSpec, HAnchor, MoonSpec, SurfaceConfig, VAnchor};
pub use crate::driver::{AccentMotion, ElementMotion, ElementState, FrameClock};
pub use crate::field::{
    DEFAULT_BUBBLE_COUNT, DEFAULT_STAR_COUNT, DecorativeElement, ElementKind, MAX_ELEMENTS, Position,
    Timing, generate,
};
pub use crate::foundation::core::{
    Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8, Vec2,
};
pub use crate::foundation::error::{StarfieldError, StarfieldResult};
pub use crate::render::html::overlay_html;
pub use crate::render::raster::{FrameRGBA, rasterize_frame};
pub use crate::render::sequence::{
    FrameSink, InMemorySink, PngSequenceSink, RenderStats, SequenceOpts, SinkConfig, render_range,
};
pub use crate::render::svg::{SvgOpts, frame_to_svg};
pub use crate::surface::{Layer, RenderSurface, SurfaceFrame};

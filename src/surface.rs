use crate::{
    config::{GlowSpec, SurfaceConfig},
    driver::{AccentMotion, ElementMotion},
    field::{DecorativeElement, ElementKind, generate},
    foundation::core::{Canvas, Point, Rect, Rgba8},
    foundation::error::StarfieldResult,
};

/// A click-through decorative overlay holding one immutable batch per element kind.
///
/// Batches are generated once at [`RenderSurface::mount`] and never change afterwards; sampling is
/// a pure function of elapsed time, so a surface can be shared across threads freely.
#[derive(Debug)]
pub struct RenderSurface {
    config: SurfaceConfig,
    stars: Vec<DecorativeElement>,
    bubbles: Vec<DecorativeElement>,
    star_motion: Vec<ElementMotion>,
    bubble_motion: Vec<ElementMotion>,
    moon_motion: Option<AccentMotion>,
}

/// One resolved layer of a [`SurfaceFrame`], in canvas pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum Layer {
    Glow(GlowLayer),
    Moon(MoonLayer),
    Star(StarLayer),
    Bubble(BubbleLayer),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GlowLayer {
    pub rect: Rect,
    pub blur: f64,
    pub color: Rgba8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MoonLayer {
    pub rect: Rect,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StarLayer {
    pub id: usize,
    pub center: Point,
    pub radius: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BubbleLayer {
    pub id: usize,
    pub rect: Rect,
    pub opacity: f64,
}

/// Every layer of a surface resolved at one instant, bottom to top.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SurfaceFrame {
    pub canvas: Canvas,
    pub background: Rgba8,
    /// Seconds since mount.
    pub elapsed: f64,
    pub layers: Vec<Layer>,
}

impl RenderSurface {
    /// CSS `pointer-events` of the overlay.
    pub const POINTER_EVENTS: &'static str = "none";
    /// Stacking order of the overlay relative to page content.
    pub const Z_INDEX: i32 = -10;

    /// Validate `config`, generate both batches and build their motion.
    #[tracing::instrument(skip(config), fields(w = config.canvas.width, h = config.canvas.height))]
    pub fn mount(config: SurfaceConfig) -> StarfieldResult<Self> {
        config.validate()?;

        let stars = generate(ElementKind::Star, config.stars());
        let bubbles = generate(ElementKind::Bubble, config.bubbles());
        let star_motion = stars
            .iter()
            .map(ElementMotion::for_element)
            .collect::<StarfieldResult<Vec<_>>>()?;
        let bubble_motion = bubbles
            .iter()
            .map(ElementMotion::for_element)
            .collect::<StarfieldResult<Vec<_>>>()?;
        let moon_motion = match config.moon {
            Some(_) => Some(AccentMotion::moon()?),
            None => None,
        };

        tracing::debug!(
            stars = stars.len(),
            bubbles = bubbles.len(),
            glows = config.glows.len(),
            moon = moon_motion.is_some(),
            "surface mounted"
        );

        Ok(Self {
            config,
            stars,
            bubbles,
            star_motion,
            bubble_motion,
            moon_motion,
        })
    }

    /// Tear down the surface. Every batch and motion is dropped together.
    pub fn unmount(self) {
        tracing::debug!(
            stars = self.stars.len(),
            bubbles = self.bubbles.len(),
            "surface unmounted"
        );
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn canvas(&self) -> Canvas {
        self.config.canvas
    }

    pub fn stars(&self) -> &[DecorativeElement] {
        &self.stars
    }

    pub fn bubbles(&self) -> &[DecorativeElement] {
        &self.bubbles
    }

    pub fn star_motion(&self) -> &[ElementMotion] {
        &self.star_motion
    }

    pub fn bubble_motion(&self) -> &[ElementMotion] {
        &self.bubble_motion
    }

    pub fn moon_motion(&self) -> Option<&AccentMotion> {
        self.moon_motion.as_ref()
    }

    /// The overlay never captures pointer input.
    pub fn hit_test(&self, _point: Point) -> bool {
        false
    }

    /// Resting top-left of a bubble before its offset is applied.
    pub fn bubble_origin(&self, el: &DecorativeElement) -> Point {
        let canvas = &self.config.canvas;
        Point::new(
            canvas.pct_x(el.position.left),
            f64::from(canvas.height) + self.config.bubble_start_below - el.size,
        )
    }

    /// Resolve every layer at `elapsed` seconds since mount.
    pub fn sample(&self, elapsed: f64) -> SurfaceFrame {
        let canvas = self.config.canvas;
        let mut layers = Vec::with_capacity(
            self.config.glows.len() + 1 + self.stars.len() + self.bubbles.len(),
        );

        layers.extend(
            self.config
                .glows
                .iter()
                .map(|g| Layer::Glow(glow_layer(g, &canvas))),
        );

        if let (Some(moon), Some(motion)) = (&self.config.moon, &self.moon_motion) {
            let state = motion.sample(elapsed);
            layers.push(Layer::Moon(MoonLayer {
                rect: moon.rect(&canvas) + state.offset,
                opacity: state.opacity,
            }));
        }

        for (el, motion) in self.stars.iter().zip(&self.star_motion) {
            let state = motion.sample(elapsed);
            let radius = el.size / 2.0;
            let top = el.position.top.unwrap_or(0.0);
            let center = Point::new(
                canvas.pct_x(el.position.left) + radius,
                canvas.pct_y(top) + radius,
            ) + state.offset;
            layers.push(Layer::Star(StarLayer {
                id: el.id,
                center,
                radius,
                opacity: state.opacity,
            }));
        }

        for (el, motion) in self.bubbles.iter().zip(&self.bubble_motion) {
            let state = motion.sample(elapsed);
            let origin = self.bubble_origin(el) + state.offset;
            layers.push(Layer::Bubble(BubbleLayer {
                id: el.id,
                rect: Rect::from_origin_size(origin, (el.size, el.size)),
                opacity: state.opacity,
            }));
        }

        SurfaceFrame {
            canvas,
            background: self.config.background,
            elapsed,
            layers,
        }
    }
}

fn glow_layer(g: &GlowSpec, canvas: &Canvas) -> GlowLayer {
    GlowLayer {
        rect: g.rect(canvas),
        blur: g.blur,
        color: g.color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Vec2;

    fn small() -> SurfaceConfig {
        SurfaceConfig {
            canvas: Canvas::new(200, 100).unwrap(),
            ..SurfaceConfig::default()
        }
    }

    #[test]
    fn mount_generates_reference_batches() {
        let s = RenderSurface::mount(SurfaceConfig::default()).unwrap();
        assert_eq!(s.stars().len(), 30);
        assert_eq!(s.bubbles().len(), 10);
        assert_eq!(s.star_motion().len(), 30);
        assert!(s.moon_motion().is_some());
        s.unmount();
    }

    #[test]
    fn remount_reproduces_initial_layout() {
        let a = RenderSurface::mount(small()).unwrap();
        let first = a.sample(0.0);
        let stars = a.stars().to_vec();
        a.unmount();

        let b = RenderSurface::mount(small()).unwrap();
        assert_eq!(b.sample(0.0), first);
        assert_eq!(b.stars(), &stars[..]);
    }

    #[test]
    fn sampling_does_not_mutate_the_surface() {
        let s = RenderSurface::mount(small()).unwrap();
        let before = s.sample(1.25);
        for t in 0..50 {
            let _ = s.sample(f64::from(t) * 0.3);
        }
        assert_eq!(s.sample(1.25), before);
    }

    #[test]
    fn layers_are_ordered_bottom_to_top() {
        let s = RenderSurface::mount(small()).unwrap();
        let frame = s.sample(2.0);
        let rank = |l: &Layer| match l {
            Layer::Glow(_) => 0,
            Layer::Moon(_) => 1,
            Layer::Star(_) => 2,
            Layer::Bubble(_) => 3,
        };
        assert!(frame.layers.windows(2).all(|w| rank(&w[0]) <= rank(&w[1])));
        assert_eq!(frame.layers.len(), 3 + 1 + 30 + 10);
    }

    #[test]
    fn overlay_is_click_through() {
        let s = RenderSurface::mount(small()).unwrap();
        for p in [Point::new(0.0, 0.0), Point::new(100.0, 50.0), Point::new(74.0, 53.0)] {
            assert!(!s.hit_test(p));
        }
        assert_eq!(RenderSurface::POINTER_EVENTS, "none");
        assert!(RenderSurface::Z_INDEX < 0);
    }

    #[test]
    fn star_geometry_follows_percentages() {
        let s = RenderSurface::mount(small()).unwrap();
        let frame = s.sample(0.0);
        let star1 = frame
            .layers
            .iter()
            .find_map(|l| match l {
                Layer::Star(st) if st.id == 1 => Some(st.clone()),
                _ => None,
            })
            .unwrap();
        // left 37% of 200, top 53% of 100, size 2
        assert_eq!(star1.center, Point::new(75.0, 54.0));
        assert_eq!(star1.radius, 1.0);
    }

    #[test]
    fn bubbles_start_below_the_canvas() {
        let s = RenderSurface::mount(small()).unwrap();
        let b0 = &s.bubbles()[0];
        assert_eq!(s.bubble_origin(b0), Point::new(14.0, 160.0));
        let frame = s.sample(0.0);
        let rect = frame
            .layers
            .iter()
            .find_map(|l| match l {
                Layer::Bubble(b) if b.id == 0 => Some(b.rect),
                _ => None,
            })
            .unwrap();
        // Running from t=0: lifted 40px by the first keyframe.
        assert_eq!(rect.origin(), Point::new(14.0, 120.0));
        assert!(rect.y0 > 100.0 - 60.0);
    }

    #[test]
    fn zero_counts_and_no_moon() {
        let cfg = SurfaceConfig {
            star_count: 0,
            bubble_count: -2,
            moon: None,
            glows: Vec::new(),
            ..small()
        };
        let s = RenderSurface::mount(cfg).unwrap();
        assert!(s.sample(3.0).layers.is_empty());
    }

    #[test]
    fn moon_bobs_upward() {
        let s = RenderSurface::mount(small()).unwrap();
        let rest = s.config().moon.unwrap().rect(&s.canvas());
        let frame = s.sample(3.0);
        let moon = frame
            .layers
            .iter()
            .find_map(|l| match l {
                Layer::Moon(m) => Some(m.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(moon.rect, rest + Vec2::new(0.0, -10.0));
        assert_eq!(moon.opacity, 1.0);
    }

    #[test]
    fn surface_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RenderSurface>();
    }
}

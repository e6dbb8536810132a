//! Deterministic decorative field generation.
//!
//! Every descriptor is a pure function of its index: the same `(kind, count)` produces the same
//! batch on every call and in every process, so a remounted surface never flickers into a new
//! layout.

/// Reference star batch size.
pub const DEFAULT_STAR_COUNT: usize = 30;
/// Reference bubble batch size.
pub const DEFAULT_BUBBLE_COUNT: usize = 10;
/// Largest batch a configured count may request.
pub const MAX_ELEMENTS: usize = 10_000;

/// Visual category of a decorative element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Small twinkling dot at a fixed position.
    Star,
    /// Large translucent circle rising from below the viewport.
    Bubble,
}

impl ElementKind {
    pub const ALL: [ElementKind; 2] = [ElementKind::Star, ElementKind::Bubble];

    /// Stable lowercase name, used in exports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Star => "star",
            Self::Bubble => "bubble",
        }
    }

    pub fn default_count(self) -> usize {
        match self {
            Self::Star => DEFAULT_STAR_COUNT,
            Self::Bubble => DEFAULT_BUBBLE_COUNT,
        }
    }
}

/// Placement as percentage-of-viewport offsets.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// Horizontal offset, `0..=100`.
    pub left: f64,
    /// Vertical offset, `0..=100`. `None` when the vertical position is animation-driven.
    pub top: Option<f64>,
}

/// Loop timing in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timing {
    /// One-time phase offset before the first cycle.
    pub delay: f64,
    /// Loop period.
    pub duration: f64,
}

/// One generated visual unit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DecorativeElement {
    pub id: usize,
    pub kind: ElementKind,
    pub position: Position,
    /// Diameter in CSS pixels.
    pub size: f64,
    pub timing: Timing,
    /// Base opacity, bubbles only.
    pub opacity: Option<f64>,
}

/// Generate `count` elements of `kind`, ordered by ascending `id`.
pub fn generate(kind: ElementKind, count: usize) -> Vec<DecorativeElement> {
    (0..count).map(|id| element(kind, id)).collect()
}

/// Build the descriptor for a single index.
pub fn element(kind: ElementKind, id: usize) -> DecorativeElement {
    match kind {
        ElementKind::Star => star(id),
        ElementKind::Bubble => bubble(id),
    }
}

fn star(id: usize) -> DecorativeElement {
    DecorativeElement {
        id,
        kind: ElementKind::Star,
        position: Position {
            left: scatter(id, 37, 0),
            top: Some(scatter(id, 53, 0)),
        },
        size: ((id % 3) + 1) as f64,
        timing: Timing {
            delay: (id % 10) as f64 * 0.2,
            duration: (2 + id % 4) as f64,
        },
        opacity: None,
    }
}

fn bubble(id: usize) -> DecorativeElement {
    DecorativeElement {
        id,
        kind: ElementKind::Bubble,
        position: Position {
            left: scatter(id, 13, 7),
            top: None,
        },
        size: (60 + (id % 5) * 25) as f64,
        timing: Timing {
            delay: id as f64 * 0.6,
            duration: (8 + (id % 5) * 2) as f64,
        },
        opacity: Some(0.08 + (id % 4) as f64 * 0.03),
    }
}

/// `(id * mul + add) mod 100`, reduced first so large ids cannot overflow.
fn scatter(id: usize, mul: usize, add: usize) -> f64 {
    (((id % 100) * mul + add) % 100) as f64
}

/// Turn a runtime-configured count into a batch size.
///
/// Counts outside `0..=MAX_ELEMENTS` are a configuration mistake on decorative content; they are
/// clamped and logged instead of failing the page.
pub fn count_from_config(kind: ElementKind, requested: i64) -> usize {
    if requested < 0 {
        tracing::warn!(
            kind = kind.name(),
            requested,
            "negative element count; rendering none"
        );
        return 0;
    }
    match usize::try_from(requested) {
        Ok(n) if n <= MAX_ELEMENTS => n,
        _ => {
            tracing::warn!(
                kind = kind.name(),
                requested,
                max = MAX_ELEMENTS,
                "element count too large; clamping"
            );
            MAX_ELEMENTS
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/field.rs"]
mod tests;

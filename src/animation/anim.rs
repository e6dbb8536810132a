use crate::{
    animation::{
        ease::Ease,
        timing::{LoopTiming, Phase},
    },
    foundation::error::{StarfieldError, StarfieldResult},
};

/// Interpolation contract for animation value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;

    /// Return `true` when the value can be rendered (no NaN/inf components).
    fn is_finite(&self) -> bool;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

/// One keyframe at a normalized offset within a loop cycle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Position within one cycle, `0.0..=1.0`.
    pub offset: f64,
    /// Value at `offset`.
    pub value: T,
    /// Easing applied toward the next keyframe.
    pub ease: Ease,
}

/// Keyframed values over one normalized cycle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    /// Keys sorted by `offset`, first at 0 and last at 1.
    pub keys: Vec<Keyframe<T>>,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Space `values` evenly over the cycle, using `ease` for every segment.
    pub fn evenly(values: impl IntoIterator<Item = T>, ease: Ease) -> StarfieldResult<Self> {
        let values: Vec<T> = values.into_iter().collect();
        let last = values.len().saturating_sub(1);
        let keys = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Keyframe {
                offset: if last == 0 {
                    0.0
                } else {
                    i as f64 / last as f64
                },
                value,
                ease,
            })
            .collect();
        let kf = Self { keys };
        kf.validate()?;
        Ok(kf)
    }

    pub fn validate(&self) -> StarfieldResult<()> {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return Err(StarfieldError::animation(
                "keyframes must have at least one key",
            ));
        };
        if self.keys.len() > 1 && (first.offset != 0.0 || last.offset != 1.0) {
            return Err(StarfieldError::animation(
                "keyframes must start at offset 0 and end at offset 1",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].offset <= w[1].offset) {
            return Err(StarfieldError::animation(
                "keyframes must be sorted by offset",
            ));
        }
        if self
            .keys
            .iter()
            .any(|k| !(0.0..=1.0).contains(&k.offset) || !k.value.is_finite())
        {
            return Err(StarfieldError::animation(
                "keyframe offsets must lie in [0, 1] and values must be finite",
            ));
        }
        if self.keys.iter().any(|k| !k.ease.is_valid()) {
            return Err(StarfieldError::animation("keyframe ease is invalid"));
        }
        Ok(())
    }

    /// Sample at normalized `progress` within one cycle.
    pub fn sample(&self, progress: f64) -> T {
        let p = progress.clamp(0.0, 1.0);
        let idx = self.keys.partition_point(|k| k.offset <= p);

        if idx == 0 {
            return self.keys[0].value.clone();
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value.clone();
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.offset - a.offset;
        if span <= 0.0 {
            return b.value.clone();
        }

        let t = (p - a.offset) / span;
        T::lerp(&a.value, &b.value, a.ease.apply(t))
    }
}

/// A looping keyframed property: values over one cycle plus the cycle timing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transition<T> {
    pub keyframes: Keyframes<T>,
    pub timing: LoopTiming,
}

impl<T> Transition<T>
where
    T: Lerp + Clone,
{
    pub fn new(keyframes: Keyframes<T>, timing: LoopTiming) -> StarfieldResult<Self> {
        keyframes.validate()?;
        timing.validate()?;
        Ok(Self { keyframes, timing })
    }

    /// Sample at `elapsed` seconds since start.
    ///
    /// Returns `None` while the startup delay is pending, so callers can fall back to the
    /// element's resting value.
    pub fn sample(&self, elapsed: f64) -> Option<T> {
        match self.timing.phase(elapsed) {
            Phase::Pending => None,
            Phase::Running { progress, .. } | Phase::Finished { progress } => {
                Some(self.keyframes.sample(progress))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;

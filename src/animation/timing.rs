use crate::foundation::error::{StarfieldError, StarfieldResult};

/// How many cycles a loop runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Repeat {
    /// Loop forever.
    #[default]
    Infinite,
    /// Play exactly `n` cycles, then hold the final value.
    Count(u32),
}

/// Direction of successive cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoopMode {
    /// Every cycle restarts from progress 0.
    #[default]
    Repeat,
    /// Odd cycles play backwards.
    PingPong,
}

/// Where a looping transition is at some elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// The startup delay has not elapsed yet.
    Pending,
    /// Inside cycle `cycle` (0-based) at normalized `progress` in `[0, 1)`.
    Running { cycle: u64, progress: f64 },
    /// A finite loop has completed; `progress` is the final keyframe position.
    Finished { progress: f64 },
}

/// Timing of a looping transition, in seconds.
///
/// `delay` offsets only the first cycle. After that the loop period is exactly `duration`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoopTiming {
    pub delay: f64,
    pub duration: f64,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub mode: LoopMode,
}

impl LoopTiming {
    /// Infinite, restarting loop.
    pub fn forever(delay: f64, duration: f64) -> StarfieldResult<Self> {
        let timing = Self {
            delay,
            duration,
            repeat: Repeat::Infinite,
            mode: LoopMode::Repeat,
        };
        timing.validate()?;
        Ok(timing)
    }

    pub fn validate(&self) -> StarfieldResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(StarfieldError::animation(format!(
                "loop duration must be finite and > 0 (got {})",
                self.duration
            )));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(StarfieldError::animation(format!(
                "loop delay must be finite and >= 0 (got {})",
                self.delay
            )));
        }
        if self.repeat == Repeat::Count(0) {
            return Err(StarfieldError::animation("loop repeat count must be > 0"));
        }
        Ok(())
    }

    /// Map `elapsed` seconds since start to a [`Phase`].
    ///
    /// Negative or non-finite `elapsed` is treated as not started.
    pub fn phase(&self, elapsed: f64) -> Phase {
        if !elapsed.is_finite() || elapsed < self.delay {
            return Phase::Pending;
        }

        let since_start = elapsed - self.delay;
        if let (Some(active), Repeat::Count(n)) = (self.active_secs(), self.repeat)
            && since_start >= active
        {
            return Phase::Finished {
                progress: self.directed(u64::from(n) - 1, 1.0),
            };
        }

        let local = since_start / self.duration;
        let cycle = local.floor() as u64;
        let progress = (local - local.floor()).clamp(0.0, 1.0);

        Phase::Running {
            cycle,
            progress: self.directed(cycle, progress),
        }
    }

    /// Total active time of a finite loop (excluding delay); `None` for infinite loops.
    pub fn active_secs(&self) -> Option<f64> {
        match self.repeat {
            Repeat::Infinite => None,
            Repeat::Count(n) => Some(f64::from(n) * self.duration),
        }
    }

    fn directed(&self, cycle: u64, progress: f64) -> f64 {
        match self.mode {
            LoopMode::Repeat => progress,
            LoopMode::PingPong if cycle % 2 == 1 => 1.0 - progress,
            LoopMode::PingPong => progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(p: Phase) -> (u64, f64) {
        match p {
            Phase::Running { cycle, progress } => (cycle, progress),
            other => panic!("expected running, got {other:?}"),
        }
    }

    #[test]
    fn delay_only_offsets_first_cycle() {
        let t = LoopTiming::forever(1.5, 2.0).unwrap();
        assert_eq!(t.phase(0.0), Phase::Pending);
        assert_eq!(t.phase(1.49), Phase::Pending);
        assert_eq!(running(t.phase(1.5)), (0, 0.0));
        assert_eq!(running(t.phase(2.5)), (0, 0.5));
        assert_eq!(running(t.phase(3.5)), (1, 0.0));
        assert_eq!(running(t.phase(5.5)), (2, 0.0));
    }

    #[test]
    fn period_is_exact_after_start() {
        let t = LoopTiming::forever(0.6, 8.0).unwrap();
        for k in 0..5u32 {
            let (c, p) = running(t.phase(0.6 + 2.0 + f64::from(k) * 8.0));
            assert_eq!(c, u64::from(k));
            assert!((p - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn non_finite_or_negative_elapsed_is_pending() {
        let t = LoopTiming::forever(0.0, 1.0).unwrap();
        assert_eq!(t.phase(-0.1), Phase::Pending);
        assert_eq!(t.phase(f64::NAN), Phase::Pending);
        assert_eq!(t.phase(f64::INFINITY), Phase::Pending);
    }

    #[test]
    fn finite_repeat_finishes() {
        let t = LoopTiming {
            delay: 0.0,
            duration: 1.0,
            repeat: Repeat::Count(2),
            mode: LoopMode::Repeat,
        };
        assert_eq!(running(t.phase(1.25)), (1, 0.25));
        assert_eq!(t.phase(2.0), Phase::Finished { progress: 1.0 });
        assert_eq!(t.active_secs(), Some(2.0));
    }

    #[test]
    fn ping_pong_reverses_odd_cycles() {
        let t = LoopTiming {
            delay: 0.0,
            duration: 2.0,
            repeat: Repeat::Infinite,
            mode: LoopMode::PingPong,
        };
        assert_eq!(running(t.phase(0.5)), (0, 0.25));
        assert_eq!(running(t.phase(2.5)), (1, 0.75));
    }

    #[test]
    fn validation() {
        assert!(LoopTiming::forever(0.0, 0.0).is_err());
        assert!(LoopTiming::forever(-1.0, 1.0).is_err());
        assert!(LoopTiming::forever(0.0, f64::NAN).is_err());
        let zero = LoopTiming {
            delay: 0.0,
            duration: 1.0,
            repeat: Repeat::Count(0),
            mode: LoopMode::Repeat,
        };
        assert!(zero.validate().is_err());
    }
}

use std::time::{Duration, Instant};

/// A value animating linearly between two endpoints over a fixed duration.
///
/// Starting a new fade on the same slot supersedes the previous one, which
/// is how in-flight entry/exit animations get cancelled.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl Fade {
    pub fn new(from: f32, to: f32, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    pub fn at(&self, now: Instant) -> f32 {
        let t = progress(self.started, self.duration, now);
        self.from + (self.to - self.from) * t
    }

    pub fn done(&self, now: Instant) -> bool {
        now >= self.end()
    }

    pub fn end(&self) -> Instant {
        self.started + self.duration
    }

    pub fn target(&self) -> f32 {
        self.to
    }
}

/// Normalized progress in [0, 1] for an animation that started at `started`.
pub fn progress(started: Instant, duration: Duration, now: Instant) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(started);
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// Back ease-out: overshoots the target slightly before settling.
///
/// Mirror of the easing the entry slide uses: `1 - ((1-t)^3 - a*(1-t)*sin(pi*(1-t)))`.
pub fn back_out(t: f32, amplitude: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - (inv.powi(3) - amplitude * inv * (std::f32::consts::PI * inv).sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_interpolates_endpoints() {
        let t0 = Instant::now();
        let fade = Fade::new(0.0, 1.0, t0, Duration::from_millis(200));
        assert_eq!(fade.at(t0), 0.0);
        assert_eq!(fade.at(t0 + Duration::from_millis(100)), 0.5);
        assert_eq!(fade.at(t0 + Duration::from_millis(200)), 1.0);
        assert!(fade.done(t0 + Duration::from_millis(200)));
        assert!(!fade.done(t0 + Duration::from_millis(199)));
    }

    #[test]
    fn fade_clamps_past_the_end() {
        let t0 = Instant::now();
        let fade = Fade::new(0.95, 0.0, t0, Duration::from_millis(300));
        assert_eq!(fade.at(t0 + Duration::from_secs(5)), 0.0);
    }

    #[test]
    fn back_out_hits_both_endpoints() {
        assert!(back_out(0.0, 0.15).abs() < 1e-6);
        assert!((back_out(1.0, 0.15) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn back_out_overshoots_in_the_middle() {
        let peak = (1..100)
            .map(|i| back_out(i as f32 / 100.0, 0.15))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }
}

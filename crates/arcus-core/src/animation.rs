//! Clock-driven animations. Callers pass `now` explicitly so the UI can feed
//! frame-clock times and tests can step through time deterministically.

use std::time::{Duration, Instant};

pub const VALUE_TRANSITION: Duration = Duration::from_millis(250);
pub const SPIN_PERIOD: Duration = Duration::from_millis(1000);

/// Finite linear interpolation between two integers.
#[derive(Debug, Clone)]
pub struct ValueAnimation {
    from: i32,
    to: i32,
    duration: Duration,
    started: Option<Instant>,
}

impl ValueAnimation {
    pub fn new(duration: Duration) -> Self {
        Self {
            from: 0,
            to: 0,
            duration,
            started: None,
        }
    }

    pub fn start(&mut self, from: i32, to: i32, now: Instant) {
        self.from = from;
        self.to = to;
        self.started = Some(now);
    }

    pub fn stop(&mut self) {
        self.started = None;
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Current interpolated value, or `None` when idle. Reaching the end
    /// yields the target once and stops the animation.
    pub fn sample(&mut self, now: Instant) -> Option<i32> {
        let started = self.started?;
        let elapsed = now.saturating_duration_since(started);
        if self.duration.is_zero() || elapsed >= self.duration {
            self.started = None;
            return Some(self.to);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let value = self.from as f64 + (self.to as f64 - self.from as f64) * t;
        Some(value.round() as i32)
    }
}

impl Default for ValueAnimation {
    fn default() -> Self {
        Self::new(VALUE_TRANSITION)
    }
}

/// Endless 0.0 -> 1.0 ramp that wraps every `period`.
#[derive(Debug, Clone)]
pub struct LoopAnimation {
    period: Duration,
    started: Option<Instant>,
}

impl LoopAnimation {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            started: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub fn stop(&mut self) {
        self.started = None;
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn sample(&self, now: Instant) -> Option<f64> {
        let started = self.started?;
        if self.period.is_zero() {
            return Some(0.0);
        }
        let elapsed = now.saturating_duration_since(started);
        Some((elapsed.as_secs_f64() / self.period.as_secs_f64()).fract())
    }
}

impl Default for LoopAnimation {
    fn default() -> Self {
        Self::new(SPIN_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_value_animation_interpolates_and_finishes() {
        let t0 = Instant::now();
        let mut anim = ValueAnimation::default();
        assert_eq!(anim.sample(t0), None);

        anim.start(0, 100, t0);
        assert_eq!(anim.sample(t0), Some(0));
        assert_eq!(anim.sample(t0 + ms(125)), Some(50));

        let mut last = 50;
        for step in [150, 175, 200, 225] {
            let v = anim.sample(t0 + ms(step)).unwrap();
            assert!(v >= last, "not monotonic at {step}ms");
            last = v;
        }

        assert_eq!(anim.sample(t0 + ms(250)), Some(100));
        assert!(!anim.is_running());
        assert_eq!(anim.sample(t0 + ms(300)), None);
    }

    #[test]
    fn test_value_animation_downwards() {
        let t0 = Instant::now();
        let mut anim = ValueAnimation::default();
        anim.start(80, 40, t0);
        assert_eq!(anim.sample(t0 + ms(125)), Some(60));
        assert_eq!(anim.sample(t0 + ms(1000)), Some(40));
    }

    #[test]
    fn test_zero_duration_jumps() {
        let t0 = Instant::now();
        let mut anim = ValueAnimation::new(Duration::ZERO);
        anim.start(0, 7, t0);
        assert_eq!(anim.sample(t0), Some(7));
        assert!(!anim.is_running());
    }

    #[test]
    fn test_loop_animation_wraps() {
        let t0 = Instant::now();
        let mut spin = LoopAnimation::default();
        assert_eq!(spin.sample(t0), None);

        spin.start(t0);
        assert_eq!(spin.sample(t0), Some(0.0));
        assert!((spin.sample(t0 + ms(250)).unwrap() - 0.25).abs() < 1e-9);
        assert!((spin.sample(t0 + ms(1750)).unwrap() - 0.75).abs() < 1e-9);

        for step in (0..5000).step_by(37) {
            let phase = spin.sample(t0 + ms(step)).unwrap();
            assert!((0.0..1.0).contains(&phase));
        }

        spin.stop();
        assert_eq!(spin.sample(t0 + ms(10)), None);
    }
}

//! Linear deceleration of the globe's angular speed

use std::time::Duration;

/// `speed(t) = max(0, v0 + a * t)` with `a = -v0 / duration`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecelerationCurve {
    initial_speed: f64,
    duration: Duration,
}

impl DecelerationCurve {
    #[must_use]
    pub fn new(initial_speed: f64, duration: Duration) -> Self {
        Self {
            initial_speed,
            duration,
        }
    }

    #[must_use]
    pub fn initial_speed(&self) -> f64 {
        self.initial_speed
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Angular acceleration, speed units per second
    #[must_use]
    pub fn acceleration(&self) -> f64 {
        let seconds = self.duration.as_secs_f64();
        if seconds > 0.0 {
            -self.initial_speed / seconds
        } else {
            f64::NEG_INFINITY
        }
    }

    #[must_use]
    pub fn speed_at(&self, elapsed: Duration) -> f64 {
        if elapsed >= self.duration {
            return 0.0;
        }
        (self.initial_speed + self.acceleration() * elapsed.as_secs_f64()).max(0.0)
    }

    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration || self.speed_at(elapsed) <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5.0, 5_000)]
    #[case(5.0, 1)]
    #[case(0.5, 3_100)]
    #[case(12.0, 777)]
    #[case(1.0, 60_000)]
    fn test_speed_is_non_negative_and_reaches_zero(#[case] v0: f64, #[case] duration_ms: u64) {
        let duration = Duration::from_millis(duration_ms);
        let curve = DecelerationCurve::new(v0, duration);

        let mut previous = f64::INFINITY;
        for step in 0..=200u32 {
            let elapsed = duration.mul_f64(f64::from(step) / 200.0);
            let speed = curve.speed_at(elapsed);
            assert!(speed >= 0.0);
            assert!(speed <= previous);
            previous = speed;
        }

        assert_eq!(curve.speed_at(duration), 0.0);
        assert_eq!(curve.speed_at(duration + Duration::from_secs(1)), 0.0);
        assert!(curve.is_finished(duration));
    }

    #[test]
    fn test_default_curve_midpoint() {
        let curve = DecelerationCurve::new(5.0, Duration::from_secs(5));
        assert_eq!(curve.acceleration(), -1.0);
        assert!((curve.speed_at(Duration::from_millis(2_500)) - 2.5).abs() < 1e-12);
        assert!(!curve.is_finished(Duration::from_millis(4_999)));
    }

    #[test]
    fn test_zero_duration_is_finished_immediately() {
        let curve = DecelerationCurve::new(5.0, Duration::ZERO);
        assert!(curve.is_finished(Duration::ZERO));
        assert_eq!(curve.speed_at(Duration::ZERO), 0.0);
    }
}

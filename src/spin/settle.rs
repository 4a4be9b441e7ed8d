//! Settle phase: bring the marker round to the front after the main spin

use std::time::Duration;

/// Angle between the globe's current facing and a target longitude, degrees in [0, 360).
///
/// Eastern longitudes are folded by -180 before comparison, matching the
/// texture offset of the globe mesh.
#[must_use]
pub fn facing_distance(rotation_y: f64, longitude: f64) -> f64 {
    let folded = if longitude > 0.0 {
        longitude - 180.0
    } else {
        longitude
    };
    ((-rotation_y.to_degrees()) % 360.0 + folded)
        .abs()
        .rem_euclid(360.0)
}

/// How far the marker is from the front, whichever way round is shorter
#[must_use]
pub fn front_distance(distance: f64) -> f64 {
    let distance = distance.rem_euclid(360.0);
    distance.min(360.0 - distance)
}

/// Length of the slow settle rotation for a facing distance in degrees.
///
/// The constants are calibrated against the settle speed of 0.5 and have no
/// closed-form derivation.
#[must_use]
pub fn settle_duration(distance: f64) -> Duration {
    let millis = if distance > 180.0 {
        6200.0 - (distance - 180.0) * 20.0
    } else {
        3100.0 + distance * 20.0
    };
    Duration::from_millis(millis.max(0.0).round() as u64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettlePlan {
    /// Already facing the viewer; show the win effect straight away
    Immediate,
    /// Turn slowly at `speed` for `duration`, then stop
    Rotate { speed: f64, duration: Duration },
}

impl SettlePlan {
    /// A front distance at or below `tolerance` degrees takes the short path
    #[must_use]
    pub fn for_distance(distance: f64, tolerance: f64, speed: f64) -> Self {
        if front_distance(distance) <= tolerance {
            SettlePlan::Immediate
        } else {
            SettlePlan::Rotate {
                speed,
                duration: settle_duration(distance),
            }
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        match self {
            SettlePlan::Immediate => Duration::ZERO,
            SettlePlan::Rotate { duration, .. } => *duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(30.0)]
    #[case(330.0)]
    #[case(0.0)]
    #[case(29.999)]
    #[case(359.5)]
    fn test_short_path_at_or_inside_tolerance(#[case] distance: f64) {
        assert_eq!(SettlePlan::for_distance(distance, 30.0, 0.5), SettlePlan::Immediate);
    }

    #[rstest]
    #[case(30.0001)]
    #[case(329.9999)]
    #[case(90.0)]
    #[case(180.0)]
    #[case(270.0)]
    fn test_rotate_outside_tolerance(#[case] distance: f64) {
        let plan = SettlePlan::for_distance(distance, 30.0, 0.5);
        assert!(matches!(plan, SettlePlan::Rotate { speed, .. } if speed == 0.5));
        assert_eq!(plan.duration(), settle_duration(distance));
    }

    #[test]
    fn test_settle_duration_formulas() {
        assert_eq!(settle_duration(90.0), Duration::from_millis(4_900));
        assert_eq!(settle_duration(180.0), Duration::from_millis(6_700));
        assert_eq!(settle_duration(270.0), Duration::from_millis(4_400));
        assert_eq!(settle_duration(300.0), Duration::from_millis(3_800));
    }

    #[test]
    fn test_front_distance_is_symmetric() {
        assert_eq!(front_distance(10.0), 10.0);
        assert_eq!(front_distance(350.0), 10.0);
        assert_eq!(front_distance(180.0), 180.0);
        assert_eq!(front_distance(-20.0), 20.0);
    }

    #[test]
    fn test_facing_distance() {
        assert_eq!(facing_distance(0.0, -45.0), 45.0);
        assert_eq!(facing_distance(0.0, 135.0), 45.0);
        assert!((facing_distance(std::f64::consts::PI, -90.0) - 270.0).abs() < 1e-9);

        for rotation in [0.0, 1.0, 17.5, -3.0, 250.0] {
            for longitude in [-180.0, -90.0, 0.0, 45.0, 180.0] {
                let d = facing_distance(rotation, longitude);
                assert!((0.0..360.0).contains(&d), "{rotation} {longitude} -> {d}");
            }
        }
    }
}

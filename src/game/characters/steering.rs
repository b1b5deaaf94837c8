// Camera-relative steering

use glam::Vec3;

use super::stats::CharacterStats;
use crate::core::math::{flatten_xz, normalized_angle_difference, yaw_of};
use crate::engine::input::Intent;

/// Squared horizontal length below which opposing keys are treated as cancelled out
const MIN_DIRECTION_LENGTH_SQ: f32 = 1.0e-8;

/// Result of one steering solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    /// World-space displacement for this tick (speed and delta time applied)
    pub move_vector: Vec3,
    /// Unit horizontal direction before scaling; zero when not moving
    pub direction: Vec3,
    pub has_movement: bool,
    /// Facing that matches `direction`. Meaningless when `has_movement` is false.
    pub target_yaw: f32,
}

impl Steering {
    pub const NONE: Self = Self {
        move_vector: Vec3::ZERO,
        direction: Vec3::ZERO,
        has_movement: false,
        target_yaw: 0.0,
    };
}

/// Turns movement intent plus the camera basis into a world-space move and a facing
#[derive(Debug, Clone)]
pub struct SteeringSolver {
    walk_speed: f32,
    run_multiplier: f32,
    rotation_speed: f32,
}

impl SteeringSolver {
    pub fn new(stats: &CharacterStats) -> Self {
        Self {
            walk_speed: stats.walk_speed,
            run_multiplier: stats.run_multiplier,
            rotation_speed: stats.rotation_speed,
        }
    }

    pub fn speed(&self, run: bool) -> f32 {
        if run {
            self.walk_speed * self.run_multiplier
        } else {
            self.walk_speed
        }
    }

    /// Sum the held axes along the camera's horizontal forward/right, renormalize, then scale
    pub fn solve(
        &self,
        intent: &Intent,
        camera_forward: Vec3,
        camera_right: Vec3,
        dt: f32,
    ) -> Steering {
        let forward = flatten_xz(camera_forward);
        let right = flatten_xz(camera_right);

        let mut sum = Vec3::ZERO;
        if intent.forward {
            sum += forward;
        }
        if intent.backward {
            sum -= forward;
        }
        if intent.right {
            sum += right;
        }
        if intent.left {
            sum -= right;
        }
        sum.y = 0.0;

        if sum.length_squared() <= MIN_DIRECTION_LENGTH_SQ {
            return Steering::NONE;
        }

        let direction = sum.normalize();
        Steering {
            move_vector: direction * self.speed(intent.run) * dt,
            direction,
            has_movement: true,
            target_yaw: yaw_of(direction),
        }
    }

    /// Yaw change for this tick: the short-way error scaled by rotation speed and dt.
    ///
    /// The scale is capped at 1 so a long frame lands on the target instead of overshooting.
    pub fn turn_delta(&self, current_yaw: f32, target_yaw: f32, dt: f32) -> f32 {
        let error = normalized_angle_difference(target_yaw, current_yaw);
        error * (self.rotation_speed * dt).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::wrap_angle;
    use crate::game::characters::stats::BASE_STATS;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{PI, TAU};

    const DT: f32 = 0.016;

    fn solver() -> SteeringSolver {
        SteeringSolver::new(&CharacterStats::default())
    }

    fn intent(forward: bool, backward: bool, left: bool, right: bool) -> Intent {
        Intent {
            forward,
            backward,
            left,
            right,
            ..Intent::default()
        }
    }

    #[test]
    fn test_no_movement_flags() {
        let steering = solver().solve(&Intent::default(), Vec3::Z, -Vec3::X, DT);
        assert!(!steering.has_movement);
        assert_eq!(steering.move_vector.length(), 0.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let steering = solver().solve(&intent(true, true, false, false), Vec3::Z, -Vec3::X, DT);
        assert!(!steering.has_movement);
        assert_eq!(steering.move_vector, Vec3::ZERO);
    }

    #[test]
    fn test_direction_is_normalized_and_yaw_matches() {
        // Camera looking down -Z, right is +X
        let forward = Vec3::new(0.0, -0.3, -1.0);
        let right = Vec3::X;
        let cases = [
            intent(true, false, false, false),
            intent(false, true, false, false),
            intent(false, false, true, false),
            intent(false, false, false, true),
            intent(true, false, false, true),
            intent(false, true, true, false),
        ];

        for case in cases {
            let steering = solver().solve(&case, forward, right, DT);
            assert!(steering.has_movement, "{case:?}");
            assert_abs_diff_eq!(steering.direction.length(), 1.0, epsilon = 1e-6);
            assert_abs_diff_eq!(steering.direction.y, 0.0);
            assert_abs_diff_eq!(
                steering.target_yaw,
                steering.direction.x.atan2(steering.direction.z),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_forward_follows_camera() {
        let steering = solver().solve(&intent(true, false, false, false), Vec3::X, Vec3::Z, DT);
        assert_abs_diff_eq!(steering.direction.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(steering.target_yaw, PI / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_run_doubles_speed() {
        let s = solver();
        let walk = s.solve(&intent(true, false, false, false), Vec3::Z, -Vec3::X, DT);
        let run = s.solve(
            &Intent {
                run: true,
                ..intent(true, false, false, false)
            },
            Vec3::Z,
            -Vec3::X,
            DT,
        );
        assert_abs_diff_eq!(walk.move_vector.length(), BASE_STATS.walk_speed * DT, epsilon = 1e-6);
        assert_abs_diff_eq!(
            run.move_vector.length(),
            2.0 * walk.move_vector.length(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_turn_takes_short_arc() {
        let stats = CharacterStats {
            rotation_speed: 5.0,
            ..CharacterStats::default()
        };
        let s = SteeringSolver::new(&stats);
        let (current, target) = (3.0_f32, -3.0_f32);

        let delta = s.turn_delta(current, target, DT);

        assert!(delta.abs() < PI * 5.0 * DT + 1e-6);
        // Positive: turning up through PI closes the 0.28 rad gap
        assert!(delta > 0.0);
        assert_abs_diff_eq!(delta, (TAU - 6.0) * 5.0 * DT, epsilon = 1e-5);

        let before = wrap_angle(target - current).abs();
        let after = wrap_angle(target - (current + delta)).abs();
        assert!(after < before);
    }

    #[test]
    fn test_turn_never_overshoots_on_long_frames() {
        let s = solver();
        let delta = s.turn_delta(0.0, 1.0, 1.0);
        assert_abs_diff_eq!(delta, 1.0, epsilon = 1e-6);
    }
}

/// Discrete first-order lag (exponential smoothing).
///
/// Each update moves the output toward the target by `alpha = dt / (tau + dt)`,
/// which is the backward-Euler discretization of `tau * y' + y = u`. It stays
/// stable for any positive `dt`, so a long frame only means a bigger jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrderLag {
    /// Time constant (s)
    pub tau: f64,
}

impl FirstOrderLag {
    pub fn new(tau: f64) -> Self {
        FirstOrderLag { tau }
    }

    /// Smoothing factor for a tick of length `dt`. Zero for non-positive ticks.
    pub fn alpha(&self, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        dt / (self.tau.max(0.0) + dt)
    }

    /// Advance `current` one tick toward `target`.
    pub fn step(&self, current: f64, target: f64, dt: f64) -> f64 {
        let alpha = self.alpha(dt);
        (1.0 - alpha) * current + alpha * target
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_alpha_matches_time_constant() {
        let lag = FirstOrderLag::new(0.25);
        assert_abs_diff_eq!(lag.alpha(0.25), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(lag.alpha(0.016), 0.016 / 0.266, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_and_negative_dt_hold_output() {
        let lag = FirstOrderLag::new(0.25);
        assert_eq!(lag.step(12.0, 100.0, 0.0), 12.0);
        assert_eq!(lag.step(12.0, 100.0, -1.0), 12.0);
        assert_eq!(lag.step(12.0, 100.0, f64::NAN), 12.0);
    }

    #[test]
    fn test_step_never_overshoots() {
        let lag = FirstOrderLag::new(0.25);
        let mut y = 0.0;
        for _ in 0..1000 {
            let next = lag.step(y, 10.0, 0.05);
            assert!(next >= y && next <= 10.0);
            y = next;
        }
        assert_abs_diff_eq!(y, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_huge_dt_lands_near_target() {
        let lag = FirstOrderLag::new(0.25);
        let y = lag.step(0.0, 1800.0, 1e6);
        assert_abs_diff_eq!(y, 1800.0, epsilon = 1e-3);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_abs_diff_eq!(wrap_degrees(370.0), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_degrees(-90.0), 270.0, epsilon = 1e-12);
        assert_eq!(wrap_degrees(720.0), 0.0);
        let tiny = wrap_degrees(-1e-20);
        assert!((0.0..360.0).contains(&tiny));
        assert_eq!(wrap_degrees(f64::INFINITY), 0.0);
    }
}

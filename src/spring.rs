use crate::error::ConfigError;

/// Configuration for spring physics animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Mass of the spring (default: 1.0)
    pub mass: f64,
    /// Stiffness of the spring
    pub stiffness: f64,
    /// Damping coefficient
    pub damping: f64,
}

impl SpringConfig {
    /// Heavily damped spring used for fade-ins; creeps to rest with no overshoot
    pub const SMOOTH: Self = Self {
        mass: 1.0,
        stiffness: 100.0,
        damping: 100.0,
    };

    /// Intro pop spring for container entrances
    pub const INTRO: Self = Self {
        mass: 1.0,
        stiffness: 100.0,
        damping: 80.0,
    };

    /// Slow drifting spring for objects fanning out
    pub const DRIFT: Self = Self {
        mass: 1.0,
        stiffness: 100.0,
        damping: 50.0,
    };

    /// Quick spring for object travel between containers
    pub const BRISK: Self = Self {
        mass: 1.0,
        stiffness: 240.0,
        damping: 60.0,
    };

    /// Create a spring with the given stiffness and damping, unit mass
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            mass: 1.0,
            stiffness,
            damping,
        }
    }

    /// Check the configuration, rejecting parameters with no physical solution
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.mass.is_finite() || !self.stiffness.is_finite() || !self.damping.is_finite() {
            return Err(ConfigError::NonFinite("spring configuration"));
        }
        if self.stiffness <= 0.0 {
            return Err(ConfigError::NonPositiveStiffness(self.stiffness));
        }
        if self.damping < 0.0 {
            return Err(ConfigError::NegativeDamping(self.damping));
        }
        if self.mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass(self.mass));
        }
        Ok(())
    }

    /// Damping ratio: < 1 underdamped (overshoots), 1 critical, > 1 overdamped
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Progress of the spring toward its rest value after `frame_offset` frames
    /// at `fps` frames per second.
    ///
    /// The spring starts at 0 with zero velocity and settles at 1. Negative
    /// frame offsets return exactly 0 (the animation has not begun). The value
    /// is the closed-form solution of the damped harmonic oscillator, so equal
    /// inputs always produce bit-identical output and frames can be evaluated
    /// in any order.
    pub fn progress(&self, frame_offset: f64, fps: f64) -> f64 {
        if frame_offset < 0.0 {
            return 0.0;
        }
        let t = frame_offset / fps;
        let omega = (self.stiffness / self.mass).sqrt();
        let zeta = self.damping_ratio();

        if zeta < 1.0 - CRITICAL_EPS {
            // Underdamped: decaying oscillation around the rest value
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega * t).exp();
            1.0 - envelope
                * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
        } else if zeta < 1.0 + CRITICAL_EPS {
            // Critically damped
            let envelope = (-omega * t).exp();
            1.0 - envelope * (1.0 + omega * t)
        } else {
            // Overdamped, written as a sum of two decaying exponentials.
            // The cosh/sinh form multiplies a huge term by a vanishing one and
            // collapses to 0 * inf for large t.
            let omega_r = omega * (zeta * zeta - 1.0).sqrt();
            let r1 = -zeta * omega + omega_r;
            let r2 = -zeta * omega - omega_r;
            let a = r2 / (r1 - r2);
            let b = -1.0 - a;
            1.0 + a * (r1 * t).exp() + b * (r2 * t).exp()
        }
    }
}

/// Damping ratios within this band of 1.0 use the critically damped solution
const CRITICAL_EPS: f64 = 1e-6;

impl Default for SpringConfig {
    fn default() -> Self {
        Self::SMOOTH
    }
}

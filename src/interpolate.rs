//! Piecewise-linear remapping of scalar values.
//!
//! Every visual attribute in a scene is produced by remapping either a spring
//! progress value or a raw frame number through a short breakpoint curve:
//! positions through 2-point curves, scale through 3-point curves, opacity
//! through 3- or 4-point curves. Evaluation is O(breakpoints) and allocates
//! nothing.

use crate::error::ConfigError;
use smallvec::SmallVec;

/// Behavior for inputs outside the breakpoint range, chosen per side
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extrapolate {
    /// Hold the edge output value
    Clamp,
    /// Continue the edge segment's slope
    Extend,
}

/// Linear interpolation between two values.
/// `t` can exceed [0, 1] for overshoot effects.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Hermite smoothstep, used for timed container growth
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Remap `x` through a piecewise-linear curve.
///
/// `input` must be strictly increasing and the same length as `output`, with
/// at least two breakpoints; callers validate once via [`Curve::new`] before
/// evaluating per frame.
pub fn interpolate(
    x: f64,
    input: &[f64],
    output: &[f64],
    below: Extrapolate,
    above: Extrapolate,
) -> f64 {
    debug_assert!(input.len() >= 2 && input.len() == output.len());
    let last = input.len() - 1;

    if x < input[0] {
        return match below {
            Extrapolate::Clamp => output[0],
            Extrapolate::Extend => extend(x, input[0], input[1], output[0], output[1]),
        };
    }
    if x > input[last] {
        return match above {
            Extrapolate::Clamp => output[last],
            Extrapolate::Extend => extend(
                x,
                input[last - 1],
                input[last],
                output[last - 1],
                output[last],
            ),
        };
    }

    for i in 0..last {
        if x <= input[i + 1] {
            let t = (x - input[i]) / (input[i + 1] - input[i]);
            return lerp(output[i], output[i + 1], t);
        }
    }
    output[last]
}

fn extend(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// A validated breakpoint curve, stored inline (scene curves are 2-4 points)
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    input: SmallVec<[f64; 4]>,
    output: SmallVec<[f64; 4]>,
}

impl Curve {
    /// Build a curve, rejecting breakpoints with undefined or non-finite slope
    pub fn new(input: &[f64], output: &[f64]) -> Result<Self, ConfigError> {
        if input.len() < 2 {
            return Err(ConfigError::TooFewBreakpoints(input.len()));
        }
        if input.len() != output.len() {
            return Err(ConfigError::BreakpointLengthMismatch {
                input: input.len(),
                output: output.len(),
            });
        }
        if input.iter().chain(output.iter()).any(|v| !v.is_finite()) {
            return Err(ConfigError::NonFinite("breakpoints"));
        }
        for i in 1..input.len() {
            if input[i] <= input[i - 1] {
                return Err(ConfigError::NonMonotonicBreakpoints(i));
            }
        }
        Ok(Self {
            input: SmallVec::from_slice(input),
            output: SmallVec::from_slice(output),
        })
    }

    /// Evaluate with clamped extrapolation on both sides
    pub fn eval(&self, x: f64) -> f64 {
        interpolate(
            x,
            &self.input,
            &self.output,
            Extrapolate::Clamp,
            Extrapolate::Clamp,
        )
    }

    /// Evaluate with explicit extrapolation policies
    pub fn eval_with(&self, x: f64, below: Extrapolate, above: Extrapolate) -> f64 {
        interpolate(x, &self.input, &self.output, below, above)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_round_trip() {
        let pts = [0.0, 0.25, 0.6, 1.0];
        for x in [0.0, 0.1, 0.25, 0.5, 0.6, 0.99, 1.0] {
            let y = interpolate(x, &pts, &pts, Extrapolate::Clamp, Extrapolate::Clamp);
            assert!((y - x).abs() < 1e-12, "identity broke at {}: {}", x, y);
        }
    }

    #[test]
    fn test_clamp_returns_exact_endpoints() {
        let y = interpolate(-3.0, &[0.0, 1.0], &[5.0, 9.0], Extrapolate::Clamp, Extrapolate::Clamp);
        assert_eq!(y, 5.0);
        let y = interpolate(42.0, &[0.0, 1.0], &[5.0, 9.0], Extrapolate::Clamp, Extrapolate::Clamp);
        assert_eq!(y, 9.0);
    }

    #[test]
    fn test_extend_continues_edge_slope() {
        let input = [0.0, 1.0, 2.0];
        let output = [0.0, 10.0, 12.0];
        let below = interpolate(-1.0, &input, &output, Extrapolate::Extend, Extrapolate::Clamp);
        assert!((below - (-10.0)).abs() < 1e-12);
        let above = interpolate(3.0, &input, &output, Extrapolate::Clamp, Extrapolate::Extend);
        assert!((above - 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_policies_are_independent_per_side() {
        let input = [0.0, 1.0];
        let output = [2.0, 4.0];
        let below = interpolate(-1.0, &input, &output, Extrapolate::Clamp, Extrapolate::Extend);
        assert_eq!(below, 2.0);
        let above = interpolate(2.0, &input, &output, Extrapolate::Clamp, Extrapolate::Extend);
        assert!((above - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_four_point_fade_curve() {
        // Fade in, hold, fade out
        let curve = Curve::new(&[0.0, 0.2, 0.8, 1.0], &[0.0, 1.0, 1.0, 0.0]).unwrap();
        assert_eq!(curve.eval(0.0), 0.0);
        assert!((curve.eval(0.1) - 0.5).abs() < 1e-12);
        assert_eq!(curve.eval(0.5), 1.0);
        assert!((curve.eval(0.9) - 0.5).abs() < 1e-12);
        assert_eq!(curve.eval(1.0), 0.0);
    }

    #[test]
    fn test_breakpoint_hit_is_exact() {
        let curve = Curve::new(&[0.0, 0.4, 1.0], &[0.3, 0.65, 0.65]).unwrap();
        assert_eq!(curve.eval(0.4), 0.65);
    }

    #[test]
    fn test_curve_rejects_bad_breakpoints() {
        assert_eq!(
            Curve::new(&[0.0], &[1.0]),
            Err(ConfigError::TooFewBreakpoints(1))
        );
        assert_eq!(
            Curve::new(&[0.0, 1.0], &[1.0]),
            Err(ConfigError::BreakpointLengthMismatch { input: 2, output: 1 })
        );
        // Duplicate adjacent inputs have undefined slope
        assert_eq!(
            Curve::new(&[0.0, 0.5, 0.5, 1.0], &[0.0, 1.0, 1.0, 0.0]),
            Err(ConfigError::NonMonotonicBreakpoints(2))
        );
        assert_eq!(
            Curve::new(&[1.0, 0.0], &[0.0, 1.0]),
            Err(ConfigError::NonMonotonicBreakpoints(1))
        );
        assert_eq!(
            Curve::new(&[0.0, f64::INFINITY], &[0.0, 1.0]),
            Err(ConfigError::NonFinite("breakpoints"))
        );
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert!(smoothstep(0.25) < 0.25);
        assert!(smoothstep(0.75) > 0.75);
        // Clamped outside [0, 1]
        assert_eq!(smoothstep(-1.0), 0.0);
        assert_eq!(smoothstep(2.0), 1.0);
    }
}

use thiserror::Error;

/// Configuration errors, surfaced at scene construction time.
///
/// Every variant is detectable before a single frame is evaluated; frame
/// evaluation itself is infallible on a validated configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("spring stiffness must be positive, got {0}")]
    NonPositiveStiffness(f64),

    #[error("spring damping must be non-negative, got {0}")]
    NegativeDamping(f64),

    #[error("spring mass must be positive, got {0}")]
    NonPositiveMass(f64),

    #[error("at least two breakpoints are required, got {0}")]
    TooFewBreakpoints(usize),

    #[error("breakpoint lists differ in length ({input} inputs, {output} outputs)")]
    BreakpointLengthMismatch { input: usize, output: usize },

    #[error("input breakpoints must be strictly increasing (violation at index {0})")]
    NonMonotonicBreakpoints(usize),

    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    #[error("a flow stage requires at least one object")]
    EmptyObjectList,

    #[error("flow object {index}: {reason}")]
    InvalidObject { index: usize, reason: String },

    #[error("object style: {0}")]
    InvalidStyle(String),

    #[error("threshold value must be positive, got {0}")]
    NonPositiveThreshold(f64),

    #[error("frames per second must be positive, got {0}")]
    NonPositiveFps(f64),

    #[error("container scale: {0}")]
    InvalidContainerScale(String),
}

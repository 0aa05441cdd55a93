//! The unified flow-scene engine.
//!
//! A [`Scene`] binds a validated [`SceneConfig`] and answers frame queries.
//! Every query recomputes the full state from the configuration alone, so the
//! host renderer may evaluate frames sequentially, out of order, or from
//! parallel workers and always observe the same output for the same frame.

use crate::error::ConfigError;
use crate::interpolate::{interpolate, lerp, smoothstep, Extrapolate};
use crate::phase::{
    arrived_value, participant_count, transferred_value, Balances, Phase, PhaseWindow,
};
use crate::spring::SpringConfig;
use crate::timeline::{FlowStage, ObjectFrame};
use log::debug;

/// What one unit of object value means to the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueUnit {
    /// Currency amounts (bills)
    Currency,
    /// Discrete token counts
    Count,
}

/// How the source container's scale is driven
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContainerScale {
    /// Spring-driven entrance pop with a straightening tilt
    SpringIntro {
        delay_frames: f64,
        spring: SpringConfig,
        from: f64,
        to: f64,
        tilt_deg: f64,
    },
    /// Smoothstepped growth over a fixed number of frames
    TimedGrowth {
        duration_frames: f64,
        from: f64,
        to: f64,
    },
    /// Grows with the arrived share while accumulating, shrinks with the
    /// transferred share while transferring
    BalanceDriven { empty: f64, full: f64 },
}

impl ContainerScale {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidContainerScale(reason.to_string());
        match self {
            ContainerScale::SpringIntro {
                delay_frames,
                spring,
                from,
                to,
                tilt_deg,
            } => {
                spring.validate()?;
                if ![*delay_frames, *from, *to, *tilt_deg]
                    .iter()
                    .all(|v| v.is_finite())
                {
                    return Err(invalid("non-finite parameter"));
                }
                if *delay_frames < 0.0 {
                    return Err(invalid("negative intro delay"));
                }
            }
            ContainerScale::TimedGrowth {
                duration_frames,
                from,
                to,
            } => {
                if ![*duration_frames, *from, *to].iter().all(|v| v.is_finite()) {
                    return Err(invalid("non-finite parameter"));
                }
                if *duration_frames <= 0.0 {
                    return Err(invalid("growth duration must be positive"));
                }
            }
            ContainerScale::BalanceDriven { empty, full } => {
                if !empty.is_finite() || !full.is_finite() {
                    return Err(invalid("non-finite parameter"));
                }
            }
        }
        Ok(())
    }
}

/// Destination container (safe) placement and growth
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DestinationConfig {
    /// Offset of the container from the shared anchor
    pub offset: (f64, f64),
    pub scale_base: f64,
    pub scale_max: f64,
    /// Object progress at which its share of the growth starts ramping in
    pub arrival_ramp_start: f64,
}

impl DestinationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidContainerScale(reason.to_string());
        let values = [
            self.offset.0,
            self.offset.1,
            self.scale_base,
            self.scale_max,
            self.arrival_ramp_start,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid("non-finite destination parameter"));
        }
        if self.scale_base <= 0.0 {
            return Err(invalid("destination base scale must be positive"));
        }
        if self.scale_max < self.scale_base {
            return Err(invalid("destination max scale below base scale"));
        }
        if self.arrival_ramp_start <= 0.0 || self.arrival_ramp_start >= 1.0 {
            return Err(invalid("arrival ramp must start strictly inside (0, 1)"));
        }
        Ok(())
    }
}

/// Threshold-triggered transfer of the accumulated balance
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdConfig {
    /// Accumulated value at which the transfer phase begins
    pub value: f64,
    /// Objects carrying the frozen balance to the destination
    pub transfer: FlowStage,
    pub destination: DestinationConfig,
}

/// Static description of one animation variant
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Frames per second of the host timeline
    pub fps: f64,
    pub value_unit: ValueUnit,
    /// Spring driving the source container's fade-in
    pub fade_in: SpringConfig,
    pub source_scale: ContainerScale,
    /// Objects flowing toward (or out of) the source container
    pub accumulation: FlowStage,
    /// When present, the scene hands the accumulated balance on to a
    /// destination container once the threshold is crossed
    pub threshold: Option<ThresholdConfig>,
}

impl SceneConfig {
    pub fn new(fps: f64, accumulation: FlowStage) -> Self {
        Self {
            fps,
            value_unit: ValueUnit::Count,
            fade_in: SpringConfig::SMOOTH,
            source_scale: ContainerScale::BalanceDriven {
                empty: 0.3,
                full: 1.0,
            },
            accumulation,
            threshold: None,
        }
    }

    pub fn value_unit(mut self, unit: ValueUnit) -> Self {
        self.value_unit = unit;
        self
    }

    pub fn fade_in(mut self, spring: SpringConfig) -> Self {
        self.fade_in = spring;
        self
    }

    pub fn source_scale(mut self, scale: ContainerScale) -> Self {
        self.source_scale = scale;
        self
    }

    pub fn threshold(mut self, threshold: ThresholdConfig) -> Self {
        self.threshold = Some(threshold);
        self
    }
}

/// Renderer-facing attributes of a container at one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerFrame {
    pub scale: f64,
    pub opacity: f64,
    pub rotation_deg: f64,
    /// Exact running balance
    pub balance: f64,
    /// Balance rounded to the nearest integer for display
    pub displayed_balance: i64,
}

/// Complete animation state for one queried frame
#[derive(Clone, Debug, PartialEq)]
pub struct SceneFrame {
    pub frame: f64,
    pub phase: Phase,
    pub balances: Balances,
    /// The wallet
    pub source: ContainerFrame,
    /// The safe; present only once the transfer phase has begun
    pub destination: Option<ContainerFrame>,
    /// Visible objects only; untriggered objects are omitted
    pub objects: Vec<ObjectFrame>,
    /// Blink factor for the source balance badge after a threshold crossing
    pub alert_opacity: f64,
}

// Badge blink after the crossing: a 20-frame sawtooth held for two cycles.
const ALERT_WINDOW_FRAMES: f64 = 40.0;
const ALERT_BLINK_PERIOD: f64 = 20.0;

/// A validated, immutable flow scene
#[derive(Clone, Debug)]
pub struct Scene {
    config: SceneConfig,
}

impl Scene {
    /// Validate the configuration; no frame is ever evaluated against an
    /// invalid one and nothing is silently clamped into range.
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        if !config.fps.is_finite() || config.fps <= 0.0 {
            return Err(ConfigError::NonPositiveFps(config.fps));
        }
        config.fade_in.validate()?;
        config.source_scale.validate()?;
        config.accumulation.validate()?;
        if let Some(threshold) = &config.threshold {
            if !threshold.value.is_finite() || threshold.value <= 0.0 {
                return Err(ConfigError::NonPositiveThreshold(threshold.value));
            }
            threshold.transfer.validate()?;
            threshold.destination.validate()?;
        }
        debug!(
            "scene: {} accumulation objects, threshold {:?}, {} fps",
            config.accumulation.objects.len(),
            config.threshold.as_ref().map(|t| t.value),
            config.fps
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Sum of all accumulation-side object values
    pub fn total_value(&self) -> f64 {
        self.config.accumulation.total_value()
    }

    /// Evaluate the full animation state at `frame` (fractional allowed).
    ///
    /// Pure: equal frames produce bit-identical output regardless of query
    /// order. Negative inputs evaluate as frame 0.
    pub fn frame(&self, frame: f64) -> SceneFrame {
        let frame = frame.max(0.0);
        if let Some(threshold) = &self.config.threshold {
            let window = PhaseWindow::discover(
                &self.config.accumulation,
                0.0,
                threshold.value,
                frame,
                self.config.fps,
            );
            if let Some(reached) = window.threshold_reached_frame {
                if frame >= reached as f64 {
                    return self.transfer_frame(
                        frame,
                        threshold,
                        reached,
                        window.frozen_source_balance,
                    );
                }
            }
        }
        self.accumulation_frame(frame)
    }

    fn accumulation_frame(&self, frame: f64) -> SceneFrame {
        let fps = self.config.fps;
        let stage = &self.config.accumulation;

        let source_balance = arrived_value(stage, frame, fps);
        let total = stage.total_value();
        let balances = Balances {
            source: source_balance,
            destination: 0.0,
            in_flight: total - source_balance,
        };

        let objects = (0..stage.objects.len())
            .filter_map(|i| stage.object_frame(frame, i, fps))
            .collect();

        let fill = if total > 0.0 {
            (source_balance / total).min(1.0)
        } else {
            0.0
        };
        let (scale, rotation_deg) = self.source_shape(frame, fill, false);

        SceneFrame {
            frame,
            phase: Phase::Accumulating,
            balances,
            source: ContainerFrame {
                scale,
                opacity: self.fade_in_opacity(frame),
                rotation_deg,
                balance: source_balance,
                displayed_balance: source_balance.round() as i64,
            },
            destination: None,
            objects,
            alert_opacity: 1.0,
        }
    }

    fn transfer_frame(
        &self,
        frame: f64,
        threshold: &ThresholdConfig,
        reached: u64,
        frozen: f64,
    ) -> SceneFrame {
        let fps = self.config.fps;
        let stage = &threshold.transfer;
        let relative = frame - reached as f64;

        let destination_balance = transferred_value(stage, relative, fps, frozen);
        let source_balance = (frozen - destination_balance).max(0.0);
        let balances = Balances {
            source: source_balance,
            destination: destination_balance,
            in_flight: 0.0,
        };

        let participants = participant_count(stage, frozen);
        let objects = (0..participants)
            .filter_map(|i| stage.object_frame(relative, i, fps))
            .collect();

        let drained = if frozen > 0.0 {
            (destination_balance / frozen).min(1.0)
        } else {
            0.0
        };
        let (scale, rotation_deg) = self.source_shape(frame, drained, true);

        let destination = ContainerFrame {
            scale: self.destination_scale(threshold, relative, participants),
            opacity: 1.0,
            rotation_deg: 0.0,
            balance: destination_balance,
            displayed_balance: destination_balance.round() as i64,
        };

        let alert_opacity = if relative < ALERT_WINDOW_FRAMES {
            interpolate(
                frame.rem_euclid(ALERT_BLINK_PERIOD),
                &[0.0, ALERT_BLINK_PERIOD / 2.0, ALERT_BLINK_PERIOD],
                &[1.0, 0.2, 1.0],
                Extrapolate::Clamp,
                Extrapolate::Clamp,
            )
        } else {
            1.0
        };

        SceneFrame {
            frame,
            phase: Phase::Transferring,
            balances,
            source: ContainerFrame {
                scale,
                opacity: self.fade_in_opacity(frame),
                rotation_deg,
                balance: source_balance,
                displayed_balance: source_balance.round() as i64,
            },
            destination: Some(destination),
            objects,
            alert_opacity,
        }
    }

    fn fade_in_opacity(&self, frame: f64) -> f64 {
        self.config
            .fade_in
            .progress(frame, self.config.fps)
            .clamp(0.0, 1.0)
    }

    /// Source container scale and rotation. `fill` is the arrived share while
    /// accumulating and the drained share while transferring.
    fn source_shape(&self, frame: f64, fill: f64, draining: bool) -> (f64, f64) {
        let clamp = Extrapolate::Clamp;
        match self.config.source_scale {
            ContainerScale::SpringIntro {
                delay_frames,
                spring,
                from,
                to,
                tilt_deg,
            } => {
                let p = spring.progress(frame - delay_frames, self.config.fps);
                let scale = interpolate(p, &[0.0, 1.0], &[from, to], clamp, clamp);
                let rotation = interpolate(p, &[0.0, 1.0], &[tilt_deg, 0.0], clamp, clamp);
                (scale, rotation)
            }
            ContainerScale::TimedGrowth {
                duration_frames,
                from,
                to,
            } => {
                let eased = smoothstep(frame / duration_frames);
                (lerp(from, to, eased), 0.0)
            }
            ContainerScale::BalanceDriven { empty, full } => {
                let scale = if draining {
                    interpolate(fill, &[0.0, 1.0], &[full, empty], clamp, clamp)
                } else {
                    interpolate(fill, &[0.0, 1.0], &[empty, full], clamp, clamp)
                };
                (scale, 0.0)
            }
        }
    }

    /// Safe growth: an equal share per configured transfer object, each share
    /// ramping in over the tail of that object's travel.
    fn destination_scale(
        &self,
        threshold: &ThresholdConfig,
        relative: f64,
        participants: usize,
    ) -> f64 {
        let dest = &threshold.destination;
        let stage = &threshold.transfer;
        let share = (dest.scale_max - dest.scale_base) / stage.objects.len() as f64;
        let mut scale = dest.scale_base;
        for i in 0..participants {
            let progress = stage.progress(relative, i, self.config.fps);
            if progress >= dest.arrival_ramp_start {
                scale += share
                    * interpolate(
                        progress,
                        &[dest.arrival_ramp_start, 1.0],
                        &[0.0, 1.0],
                        Extrapolate::Clamp,
                        Extrapolate::Clamp,
                    );
            }
        }
        scale
    }
}

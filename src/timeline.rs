//! Declarative per-object timelines.
//!
//! A [`FlowStage`] is an ordered list of [`FlowObject`]s that travel from the
//! stage origin to the stage target, each on its own delayed clock. Object
//! identity is its index in the stage. Evaluation is pure: the same stage
//! frame always produces the same output, so a host can render frames in any
//! order.

use crate::error::ConfigError;
use crate::interpolate::{interpolate, Extrapolate};
use crate::spring::SpringConfig;

/// One visual unit (bill/token) on its own delayed timeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowObject {
    /// Frames after the stage start before this object triggers
    pub delay_frames: f64,
    /// Offset added to the stage target, producing the pile effect
    pub offset: (f64, f64),
    /// Rotation at rest, in degrees
    pub rotation_deg: f64,
    /// Scale at rest
    pub scale: f64,
    /// Currency or token units this object carries
    pub unit_value: f64,
}

impl FlowObject {
    pub fn new(delay_frames: f64) -> Self {
        Self {
            delay_frames,
            offset: (0.0, 0.0),
            rotation_deg: 0.0,
            scale: 1.0,
            unit_value: 1.0,
        }
    }

    pub fn offset(mut self, dx: f64, dy: f64) -> Self {
        self.offset = (dx, dy);
        self
    }

    pub fn rotation_deg(mut self, deg: f64) -> Self {
        self.rotation_deg = deg;
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn unit_value(mut self, value: f64) -> Self {
        self.unit_value = value;
        self
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidObject {
            index,
            reason: reason.to_string(),
        };
        let values = [
            self.delay_frames,
            self.offset.0,
            self.offset.1,
            self.rotation_deg,
            self.scale,
            self.unit_value,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid("non-finite parameter"));
        }
        if self.delay_frames < 0.0 {
            return Err(invalid("negative delay"));
        }
        if self.scale <= 0.0 {
            return Err(invalid("non-positive rest scale"));
        }
        if self.unit_value <= 0.0 {
            return Err(invalid("non-positive unit value"));
        }
        Ok(())
    }
}

/// Curve shaping shared by every object in a stage
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectStyle {
    /// Scale at the moment the object triggers
    pub spawn_scale: f64,
    /// Progress at which the object reaches its rest scale
    pub scale_rise_end: f64,
    /// Multiplier on the rest scale at full progress (1.0 holds, <1.0 settles smaller)
    pub scale_settle: f64,
    /// Progress at which the object is fully opaque
    pub fade_in_end: f64,
    /// Progress at which the object starts fading back out, if it fades at all
    pub fade_out_start: Option<f64>,
    /// Landing correction on the Y axis once the object has nearly arrived
    pub settle_bounce: bool,
}

impl Default for ObjectStyle {
    fn default() -> Self {
        Self {
            spawn_scale: 0.3,
            scale_rise_end: 0.4,
            scale_settle: 1.0,
            fade_in_end: 0.2,
            fade_out_start: None,
            settle_bounce: false,
        }
    }
}

impl ObjectStyle {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidStyle(reason.to_string());
        let values = [
            self.spawn_scale,
            self.scale_rise_end,
            self.scale_settle,
            self.fade_in_end,
            self.fade_out_start.unwrap_or(0.5),
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid("non-finite parameter"));
        }
        if self.spawn_scale <= 0.0 {
            return Err(invalid("non-positive spawn scale"));
        }
        if self.scale_settle <= 0.0 {
            return Err(invalid("non-positive scale settle factor"));
        }
        if self.scale_rise_end <= 0.0 || self.scale_rise_end >= 1.0 {
            return Err(invalid("scale rise must end strictly inside (0, 1)"));
        }
        if self.fade_in_end <= 0.0 || self.fade_in_end >= 1.0 {
            return Err(invalid("fade-in must end strictly inside (0, 1)"));
        }
        if let Some(out) = self.fade_out_start {
            if out <= self.fade_in_end || out >= 1.0 {
                return Err(invalid(
                    "fade-out must start after fade-in ends and before full progress",
                ));
            }
        }
        Ok(())
    }
}

// Landing bounce: a short dip on the object's own clock once it has nearly
// arrived. Anchoring to the local timeline keeps staggered objects landing
// identically.
const BOUNCE_TRIGGER_PROGRESS: f64 = 0.9;
const BOUNCE_WINDOW: (f64, f64) = (27.0, 35.0);
const BOUNCE_DIP: f64 = -5.0;

/// Renderer-facing attributes of one visible object at one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectFrame {
    /// Index of the object in its stage
    pub index: usize,
    /// Offset from the shared anchor, in pixels
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
    pub scale: f64,
    pub opacity: f64,
}

/// An ordered sequence of flow objects travelling origin → target
#[derive(Clone, Debug, PartialEq)]
pub struct FlowStage {
    pub spring: SpringConfig,
    pub style: ObjectStyle,
    /// Where objects spawn, relative to the shared anchor
    pub origin: (f64, f64),
    /// Base destination; each object adds its own offset
    pub target: (f64, f64),
    /// Frames after the stage clock starts before the first delays count down
    pub start_frame: f64,
    pub objects: Vec<FlowObject>,
}

impl FlowStage {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spring.validate()?;
        self.style.validate()?;
        if self.objects.is_empty() {
            return Err(ConfigError::EmptyObjectList);
        }
        let positions = [self.origin.0, self.origin.1, self.target.0, self.target.1];
        if positions.iter().any(|v| !v.is_finite()) || !self.start_frame.is_finite() {
            return Err(ConfigError::NonFinite("flow stage geometry"));
        }
        for (index, object) in self.objects.iter().enumerate() {
            object.validate(index)?;
        }
        Ok(())
    }

    /// Sum of all object unit values
    pub fn total_value(&self) -> f64 {
        self.objects.iter().map(|o| o.unit_value).sum()
    }

    /// Frames since the object triggered; negative while it waits
    pub fn local_frame(&self, stage_frame: f64, index: usize) -> f64 {
        stage_frame - self.start_frame - self.objects[index].delay_frames
    }

    /// Raw spring progress for one object (0 before it triggers)
    pub fn progress(&self, stage_frame: f64, index: usize, fps: f64) -> f64 {
        self.spring.progress(self.local_frame(stage_frame, index), fps)
    }

    /// Visual attributes for one object, or `None` while it has not triggered
    pub fn object_frame(&self, stage_frame: f64, index: usize, fps: f64) -> Option<ObjectFrame> {
        let object = &self.objects[index];
        let local = self.local_frame(stage_frame, index);
        if local < 0.0 {
            return None;
        }
        let progress = self.spring.progress(local, fps);
        let style = &self.style;

        let clamp = Extrapolate::Clamp;
        let unit = [0.0, 1.0];
        let destination = (
            self.target.0 + object.offset.0,
            self.target.1 + object.offset.1,
        );
        let x = interpolate(progress, &unit, &[self.origin.0, destination.0], clamp, clamp);
        let mut y = interpolate(progress, &unit, &[self.origin.1, destination.1], clamp, clamp);
        let rotation_deg =
            interpolate(progress, &unit, &[0.0, object.rotation_deg], clamp, clamp);

        let scale = interpolate(
            progress,
            &[0.0, style.scale_rise_end, 1.0],
            &[
                style.spawn_scale,
                object.scale,
                object.scale * style.scale_settle,
            ],
            clamp,
            clamp,
        );

        let opacity = match style.fade_out_start {
            None => interpolate(
                progress,
                &[0.0, style.fade_in_end, 1.0],
                &[0.0, 1.0, 1.0],
                clamp,
                clamp,
            ),
            Some(out) => interpolate(
                progress,
                &[0.0, style.fade_in_end, out, 1.0],
                &[0.0, 1.0, 1.0, 0.0],
                clamp,
                clamp,
            ),
        };

        if style.settle_bounce && progress >= BOUNCE_TRIGGER_PROGRESS {
            let bounce = interpolate(
                local,
                &[BOUNCE_WINDOW.0, BOUNCE_WINDOW.1],
                &unit,
                clamp,
                clamp,
            );
            y += interpolate(
                bounce,
                &[0.0, 0.5, 1.0],
                &[0.0, BOUNCE_DIP, 0.0],
                clamp,
                clamp,
            );
        }

        Some(ObjectFrame {
            index,
            x,
            y,
            rotation_deg,
            scale,
            opacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FPS: f64 = 30.0;

    fn stage() -> FlowStage {
        FlowStage {
            spring: SpringConfig::BRISK,
            style: ObjectStyle::default(),
            origin: (-500.0, 0.0),
            target: (0.0, 0.0),
            start_frame: 5.0,
            objects: vec![
                FlowObject::new(0.0).offset(0.0, 0.0).rotation_deg(10.0).scale(0.6),
                FlowObject::new(15.0).offset(15.0, -10.0).rotation_deg(-15.0).scale(0.65),
            ],
        }
    }

    #[test]
    fn test_untriggered_object_is_hidden() {
        let stage = stage();
        assert!(stage.object_frame(0.0, 0, FPS).is_none());
        assert!(stage.object_frame(4.9, 0, FPS).is_none());
        assert!(stage.object_frame(19.0, 1, FPS).is_none());
    }

    #[test]
    fn test_object_spawns_at_origin_invisible() {
        let stage = stage();
        let frame = stage.object_frame(5.0, 0, FPS).unwrap();
        assert_eq!(frame.x, -500.0);
        assert_eq!(frame.y, 0.0);
        assert_eq!(frame.opacity, 0.0);
        assert_eq!(frame.scale, 0.3);
        assert_eq!(frame.rotation_deg, 0.0);
    }

    #[test]
    fn test_arrived_object_piles_at_target_plus_offset() {
        let stage = stage();
        // Far past settling for both objects
        let a = stage.object_frame(600.0, 0, FPS).unwrap();
        let b = stage.object_frame(600.0, 1, FPS).unwrap();
        assert!((a.x - 0.0).abs() < 1e-6);
        assert!((b.x - 15.0).abs() < 1e-6);
        assert!((b.y - (-10.0)).abs() < 1e-6);
        assert!((a.rotation_deg - 10.0).abs() < 1e-6);
        assert!((b.rotation_deg - (-15.0)).abs() < 1e-6);
        assert!((a.scale - 0.6).abs() < 1e-6);
        assert_eq!(a.opacity, 1.0);
    }

    #[test]
    fn test_delay_shifts_the_whole_timeline() {
        let stage = stage();
        let early = stage.object_frame(5.0 + 40.0, 0, FPS).unwrap();
        let late = stage.object_frame(5.0 + 15.0 + 40.0, 1, FPS).unwrap();
        // Same local frame, same progress-derived opacity
        assert!((early.opacity - late.opacity).abs() < 1e-12);
    }

    #[test]
    fn test_fade_out_style_uses_four_point_curve() {
        let mut stage = stage();
        stage.style.fade_out_start = Some(0.8);
        stage.spring = SpringConfig::DRIFT;
        // Far past settling: fully faded out
        let frame = stage.object_frame(2000.0, 0, FPS).unwrap();
        assert!(frame.opacity < 1e-6, "expected fade-out, got {}", frame.opacity);
    }

    #[test]
    fn test_settle_bounce_dips_then_recovers() {
        let mut with = stage();
        with.style.settle_bounce = true;
        with.start_frame = 0.0;
        let without = FlowStage {
            style: ObjectStyle {
                settle_bounce: false,
                ..with.style
            },
            ..with.clone()
        };

        // Middle of the bounce window on the object's own clock
        let mid_with = with.object_frame(31.0, 0, FPS).unwrap();
        let mid_without = without.object_frame(31.0, 0, FPS).unwrap();
        assert!((mid_with.y - mid_without.y - (-5.0)).abs() < 1e-9);

        // Window over: correction fully unwound
        let end_with = with.object_frame(35.0, 0, FPS).unwrap();
        let end_without = without.object_frame(35.0, 0, FPS).unwrap();
        assert!((end_with.y - end_without.y).abs() < 1e-12);
    }

    #[test]
    fn test_bounce_window_tracks_object_delay() {
        let mut stage = stage();
        stage.style.settle_bounce = true;
        stage.start_frame = 0.0;
        // Object 1 triggers 15 frames later; its bounce peaks 15 frames later too
        let a = stage.object_frame(31.0, 0, FPS).unwrap();
        let b = stage.object_frame(31.0 + 15.0, 1, FPS).unwrap();
        let a_base = stage.target.1 + stage.objects[0].offset.1;
        let b_base = stage.target.1 + stage.objects[1].offset.1;
        // Both sit mid-dip relative to their own travel
        assert!((a.y - a_base).abs() > 4.0);
        assert!((b.y - b_base).abs() > 4.0);
    }

    #[test]
    fn test_validate_rejects_bad_objects() {
        let mut stage = stage();
        stage.objects[1].unit_value = 0.0;
        assert!(matches!(
            stage.validate(),
            Err(ConfigError::InvalidObject { index: 1, .. })
        ));

        let mut stage = self::stage();
        stage.objects.clear();
        assert_eq!(stage.validate(), Err(ConfigError::EmptyObjectList));

        let mut stage = self::stage();
        stage.style.fade_out_start = Some(0.1);
        assert!(matches!(stage.validate(), Err(ConfigError::InvalidStyle(_))));
    }
}

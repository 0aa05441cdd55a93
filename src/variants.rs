//! Preset scene configurations.
//!
//! Each preset is one complete animation variant expressed against the single
//! engine: the same spring, interpolation and phase machinery, differing only
//! in object tables, spring tunings and container motion.

use crate::scene::{
    ContainerScale, DestinationConfig, SceneConfig, ThresholdConfig, ValueUnit,
};
use crate::spring::SpringConfig;
use crate::timeline::{FlowObject, FlowStage, ObjectStyle};

/// Frame rate all presets are authored against
pub const DEFAULT_FPS: f64 = 30.0;

/// (delay, destination offset, rest rotation, rest scale)
type ObjectRow = (f64, (f64, f64), f64, f64);

fn objects(rows: &[ObjectRow], unit_value: f64) -> Vec<FlowObject> {
    rows.iter()
        .map(|&(delay, (dx, dy), rotation, scale)| {
            FlowObject::new(delay)
                .offset(dx, dy)
                .rotation_deg(rotation)
                .scale(scale)
                .unit_value(unit_value)
        })
        .collect()
}

/// Bills fanning out of a wallet, fading away as they drift.
///
/// No destination container and no threshold; the balance simply tracks the
/// dispersed value.
pub fn money_flow() -> SceneConfig {
    const BILLS: [ObjectRow; 8] = [
        (0.0, (200.0, -150.0), 15.0, 0.6),
        (5.0, (300.0, -100.0), -20.0, 0.7),
        (10.0, (250.0, -200.0), 30.0, 0.65),
        (15.0, (350.0, -80.0), -15.0, 0.55),
        (20.0, (180.0, -120.0), 25.0, 0.6),
        (25.0, (400.0, -150.0), -30.0, 0.65),
        (30.0, (280.0, -180.0), 20.0, 0.7),
        (35.0, (320.0, -100.0), -25.0, 0.6),
    ];

    let stage = FlowStage {
        spring: SpringConfig::DRIFT,
        style: ObjectStyle {
            spawn_scale: 0.3,
            scale_rise_end: 0.3,
            scale_settle: 0.8,
            fade_in_end: 0.2,
            fade_out_start: Some(0.8),
            settle_bounce: false,
        },
        origin: (0.0, 0.0),
        target: (0.0, 0.0),
        start_frame: 30.0,
        objects: objects(&BILLS, 100.0),
    };

    SceneConfig::new(DEFAULT_FPS, stage)
        .value_unit(ValueUnit::Currency)
        .source_scale(ContainerScale::SpringIntro {
            delay_frames: 5.0,
            spring: SpringConfig::INTRO,
            from: 0.8,
            to: 1.0,
            tilt_deg: -5.0,
        })
}

const INCOMING_TOKENS: [ObjectRow; 12] = [
    (0.0, (0.0, 0.0), 10.0, 0.6),
    (15.0, (15.0, -10.0), -15.0, 0.65),
    (30.0, (-10.0, -5.0), 20.0, 0.6),
    (45.0, (20.0, -15.0), -10.0, 0.7),
    (60.0, (-5.0, -8.0), 15.0, 0.65),
    (75.0, (10.0, -12.0), -20.0, 0.6),
    (90.0, (-15.0, -3.0), 8.0, 0.65),
    (105.0, (5.0, -18.0), -12.0, 0.6),
    (120.0, (-20.0, 5.0), 18.0, 0.7),
    (135.0, (12.0, -22.0), -8.0, 0.65),
    (150.0, (-8.0, -7.0), 12.0, 0.6),
    (165.0, (18.0, -14.0), -18.0, 0.65),
];

fn incoming_stage() -> FlowStage {
    FlowStage {
        spring: SpringConfig::BRISK,
        style: ObjectStyle::default(),
        origin: (-500.0, 0.0),
        target: (0.0, 0.0),
        start_frame: 5.0,
        objects: objects(&INCOMING_TOKENS, 1.0),
    }
}

/// Tokens streaming into a wallet from off-screen while its balance counts up.
pub fn wallet_accumulation() -> SceneConfig {
    SceneConfig::new(DEFAULT_FPS, incoming_stage())
        .value_unit(ValueUnit::Count)
        .source_scale(ContainerScale::TimedGrowth {
            duration_frames: 240.0,
            from: 0.3,
            to: 1.0,
        })
}

/// Full wallet-to-safe flow: accumulate twelve tokens, then move the frozen
/// balance into the safe once the count threshold is crossed.
pub fn vault_transfer() -> SceneConfig {
    const OUTGOING_TOKENS: [ObjectRow; 12] = [
        (0.0, (0.0, 0.0), 0.0, 0.6),
        (8.0, (15.0, -10.0), 5.0, 0.65),
        (16.0, (-10.0, -5.0), -8.0, 0.6),
        (24.0, (20.0, -15.0), 10.0, 0.7),
        (32.0, (-5.0, -8.0), -5.0, 0.65),
        (40.0, (10.0, -12.0), 8.0, 0.6),
        (48.0, (-15.0, -3.0), -10.0, 0.65),
        (56.0, (5.0, -18.0), 3.0, 0.6),
        (64.0, (-20.0, 5.0), -12.0, 0.65),
        (72.0, (12.0, -22.0), 8.0, 0.6),
        (80.0, (-8.0, -7.0), -5.0, 0.65),
        (88.0, (18.0, -14.0), 10.0, 0.6),
    ];

    let transfer = FlowStage {
        spring: SpringConfig::BRISK,
        style: ObjectStyle {
            fade_in_end: 0.3,
            settle_bounce: true,
            ..ObjectStyle::default()
        },
        origin: (0.0, 0.0),
        target: (400.0, -250.0),
        start_frame: 0.0,
        objects: objects(&OUTGOING_TOKENS, 1.0),
    };

    SceneConfig::new(DEFAULT_FPS, incoming_stage())
        .value_unit(ValueUnit::Count)
        .source_scale(ContainerScale::BalanceDriven {
            empty: 0.3,
            full: 1.0,
        })
        .threshold(ThresholdConfig {
            value: 12.0,
            transfer,
            destination: DestinationConfig {
                offset: (400.0, -250.0),
                scale_base: 0.3,
                scale_max: 1.1,
                arrival_ramp_start: 0.8,
            },
        })
}

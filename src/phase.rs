//! Two-phase balance state machine.
//!
//! A flow animation accumulates value into the source container until a
//! threshold is crossed, then transfers the frozen balance to the destination.
//! Nothing here is incremental: the threshold crossing is re-discovered from
//! frame 0 on every query, which is what makes seeking and out-of-order frame
//! evaluation safe. Two queries of the same frame always agree, whichever ran
//! first.

use crate::timeline::FlowStage;
use log::trace;

/// Relative tolerance on the threshold comparison, so a spring that only
/// asymptotically approaches 1.0 can still complete a unit
pub const THRESHOLD_TOLERANCE: f64 = 1e-6;

/// The two one-way stages of a flow animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Accumulating,
    Transferring,
}

/// Derived running balances; nothing is stored between frames
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Balances {
    /// Value displayed at the source container (wallet)
    pub source: f64,
    /// Value displayed at the destination container (safe)
    pub destination: f64,
    /// Value of objects still travelling toward the source
    pub in_flight: f64,
}

impl Balances {
    /// Total value accounted for at this frame
    pub fn total(&self) -> f64 {
        self.source + self.destination + self.in_flight
    }
}

/// Threshold bookkeeping for one queried frame.
///
/// `threshold_reached_frame` is discovered, never configured: it is the
/// earliest integer frame at which the running source balance crosses the
/// threshold. Because the scan always starts at frame 0, re-querying any
/// frame at or past the crossing reproduces the same frozen balance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseWindow {
    /// Global frame at which accumulation begins
    pub accumulation_start: f64,
    pub threshold: f64,
    pub threshold_reached_frame: Option<u64>,
    /// Source balance fixed at the crossing frame; the pool the transfer drains
    pub frozen_source_balance: f64,
}

impl PhaseWindow {
    /// Scan integer frames `0..=floor(frame)` for the earliest crossing.
    pub fn discover(
        stage: &FlowStage,
        accumulation_start: f64,
        threshold: f64,
        frame: f64,
        fps: f64,
    ) -> Self {
        let mut window = Self {
            accumulation_start,
            threshold,
            threshold_reached_frame: None,
            frozen_source_balance: 0.0,
        };
        let horizon = frame.max(0.0).floor() as u64;
        for f in 0..=horizon {
            let balance = arrived_value(stage, f as f64 - accumulation_start, fps);
            if balance >= threshold * (1.0 - THRESHOLD_TOLERANCE) {
                window.threshold_reached_frame = Some(f);
                window.frozen_source_balance = balance;
                trace!(
                    "threshold {} crossed at frame {} with balance {}",
                    threshold,
                    f,
                    balance
                );
                break;
            }
        }
        window
    }

    pub fn phase(&self, frame: f64) -> Phase {
        match self.threshold_reached_frame {
            Some(reached) if frame >= reached as f64 => Phase::Transferring,
            _ => Phase::Accumulating,
        }
    }
}

/// Running arrived value across a stage at one stage-relative frame.
///
/// Each object contributes its unit value weighted by clamped spring progress;
/// objects that have not triggered contribute exactly 0.
pub fn arrived_value(stage: &FlowStage, stage_frame: f64, fps: f64) -> f64 {
    stage
        .objects
        .iter()
        .enumerate()
        .map(|(i, object)| {
            object.unit_value * stage.progress(stage_frame, i, fps).clamp(0.0, 1.0)
        })
        .sum()
}

/// Destination-side arrived value, capped so the frozen pool is never
/// overdrawn: each contribution is limited to whatever the pool still holds
/// after the objects before it.
pub fn transferred_value(stage: &FlowStage, stage_frame: f64, fps: f64, frozen: f64) -> f64 {
    let mut allocated = 0.0;
    let mut pool = frozen;
    let mut destination = 0.0;
    for (i, object) in stage.objects.iter().enumerate() {
        let allocation = (frozen - allocated).min(object.unit_value);
        if allocation <= 0.0 {
            break;
        }
        allocated += allocation;
        let progress = stage.progress(stage_frame, i, fps).clamp(0.0, 1.0);
        let contribution = (object.unit_value * progress).min(pool);
        destination += contribution;
        pool -= contribution;
    }
    destination
}

/// How many destination objects take part in draining a frozen pool.
/// The final participant may carry only part of its unit value.
pub fn participant_count(stage: &FlowStage, frozen: f64) -> usize {
    let mut allocated = 0.0;
    let mut count = 0;
    for object in &stage.objects {
        if frozen - allocated <= 0.0 {
            break;
        }
        allocated += object.unit_value.min(frozen - allocated);
        count += 1;
    }
    count
}

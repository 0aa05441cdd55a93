//! Walks the full wallet-to-safe flow and prints both balances, including a
//! deliberately out-of-order seek to show that scrubbing is safe.

use log::info;
use vaultflow::prelude::*;

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let scene = Scene::new(vault_transfer())?;

    for frame in (0..=600).step_by(20) {
        let state = scene.frame(frame as f64);
        let safe = state
            .destination
            .map(|d| d.displayed_balance.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "frame {:>3}  {:?}  wallet {:>2}  safe {:>2}  objects {:>2}  blink {:.2}",
            frame,
            state.phase,
            state.source.displayed_balance,
            safe,
            state.objects.len(),
            state.alert_opacity,
        );
    }

    // Seek backwards; the engine recomputes from scratch and agrees with the
    // forward pass frame for frame.
    let replay = scene.frame(300.0);
    info!(
        "seek to frame 300: {:?}, wallet {}, safe {:?}",
        replay.phase,
        replay.source.displayed_balance,
        replay.destination.map(|d| d.displayed_balance)
    );
    Ok(())
}

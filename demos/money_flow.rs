//! Samples the money-flow preset and prints the wallet ledger as bills
//! disperse. A stand-in for a host renderer driving the engine.

use vaultflow::prelude::*;

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let scene = Scene::new(money_flow())?;
    for frame in (0..=180).step_by(10) {
        let state = scene.frame(frame as f64);
        println!(
            "frame {:>3}  wallet scale {:.3} rot {:+.2}°  ledger ${}  bills visible {}",
            frame,
            state.source.scale,
            state.source.rotation_deg,
            state.source.displayed_balance,
            state.objects.len(),
        );
    }
    Ok(())
}

//! A deterministic frame-indexed animation engine for token flow scenes.
//!
//! A scene describes bills or tokens moving between a wallet and a safe:
//! objects spring along their own delayed timelines, running balances
//! accumulate, and once a configured threshold is crossed the frozen balance
//! transfers to the destination. Everything is derived from the frame number
//! and the static configuration, so a host renderer can query frames in any
//! order (seeking, scrubbing, parallel workers) and always gets the same
//! answer.
//!
//! ```
//! use vaultflow::variants;
//! use vaultflow::Scene;
//!
//! let scene = Scene::new(variants::vault_transfer())?;
//! let state = scene.frame(120.0);
//! assert!(state.source.opacity > 0.9);
//! assert!(!state.objects.is_empty());
//! # Ok::<(), vaultflow::ConfigError>(())
//! ```

pub mod error;
pub mod interpolate;
pub mod phase;
pub mod scene;
pub mod spring;
pub mod timeline;
pub mod variants;

pub use error::ConfigError;
pub use scene::{Scene, SceneConfig, SceneFrame};
pub use spring::SpringConfig;

pub mod prelude {
    pub use crate::error::ConfigError;
    pub use crate::interpolate::{interpolate, lerp, smoothstep, Curve, Extrapolate};
    pub use crate::phase::{Balances, Phase, PhaseWindow};
    pub use crate::scene::{
        ContainerFrame, ContainerScale, DestinationConfig, Scene, SceneConfig, SceneFrame,
        ThresholdConfig, ValueUnit,
    };
    pub use crate::spring::SpringConfig;
    pub use crate::timeline::{FlowObject, FlowStage, ObjectFrame, ObjectStyle};
    pub use crate::variants::{money_flow, vault_transfer, wallet_accumulation};
}

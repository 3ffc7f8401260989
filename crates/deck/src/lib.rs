//! Loadspan deck engine - weight, deformation and stress field state
//!
//! This crate holds everything about the bridge that does not need a renderer:
//! - [`engine::DeckEngine`] - Per-segment weights, deformation and stress field
//! - [`deformation`] - Falloff and segment pose formulas
//! - [`stress`] - Stress field uniforms and the color ramp the shader mirrors
//! - [`readout`] - Weight percentage and Safe/Warning/Danger banding
//! - [`layout`] - Rest geometry for deck, pillars, railings and markers
//! - [`raycast`] - Ray picking against weight spheres and deck boxes
//! - [`drag`] - Single-pointer drag selection

pub mod constants;
pub mod deformation;
pub mod drag;
pub mod engine;
pub mod error;
pub mod layout;
pub mod params;
pub mod raycast;
pub mod readout;
pub mod stress;

pub use constants::*;
pub use deformation::*;
pub use drag::*;
pub use engine::*;
pub use error::*;
pub use layout::*;
pub use params::*;
pub use raycast::*;
pub use readout::*;
pub use stress::*;

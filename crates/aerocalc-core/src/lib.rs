//! Core calculation pipeline for the aerocalc system.
//!
//! Computes the oxygen and air demand of aerobic tunnel composting from the
//! stoichiometric oxidation of an organic compound and the geometry and
//! composition of the waste pile. Each stage in [`stages`] is a pure
//! function; [`pipeline::compute`] composes them in dependency order.

pub mod constants;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod report;
pub mod rounding;
pub mod stages;

pub use error::CalcError;
pub use params::TunnelParams;
pub use pipeline::{AerationReport, compute};

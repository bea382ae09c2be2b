//! The individual calculation stages, in dependency order.
//!
//! Every stage is a pure function of the parameters and earlier stage
//! results and returns one value rounded to its stage precision.

use aerocalc_chem::{Balanced, Formula, balance_oxidation, parser::parse_formula};
use serde::Serialize;

use crate::constants::{
    AMMONIA_O2_PER_MOLE, CELLULOSE_DECOMPOSITION, CELLULOSE_MOLAR_MASS, CELLULOSE_O2_MOLES,
    GRAMS_PER_TONNE, HEAT_PER_GRAM_O2, KG_PER_TONNE, O2_FRACTION_IN_AIR, O2_MOLAR_MASS,
    PEAK_FACTOR, specific_heat_sum,
};
use crate::error::CalcError;
use crate::params::{Schedule, TunnelParams};
use crate::rounding::{round_to, round_up};

/// Stage 1: balance `compound + O2 -> CO2 + H2O + NH3`.
pub fn stoichiometric_balance(formula: &str) -> Result<Balanced, CalcError> {
    Ok(balance_oxidation(formula)?)
}

/// Stage 2: parse the compound and take its molar mass, g/mol.
pub fn molecular_mass(formula: &str) -> Result<(Formula, f64), CalcError> {
    let parsed = parse_formula(formula)?;
    let mass = parsed.molar_mass();
    Ok((parsed, mass))
}

/// Stage 3: g O2 per g compound.
pub fn oxygen_demand(o2_coefficient: u64, molar_mass: f64) -> f64 {
    round_to(O2_MOLAR_MASS * o2_coefficient as f64 / molar_mass, 2)
}

/// Stage 4: g O2 per g compound for oxidizing its ammonia.
pub fn ammonia_oxygen_demand(molar_mass: f64) -> f64 {
    round_to(AMMONIA_O2_PER_MOLE / molar_mass, 3)
}

/// Stage 5: g O2 per g cellulose. Independent of the compound.
pub fn cellulose_oxygen_demand() -> f64 {
    round_to(CELLULOSE_O2_MOLES * O2_MOLAR_MASS / CELLULOSE_MOLAR_MASS, 3)
}

/// Stage 6: g air per g compound.
pub fn air_to_oxygen_ratio(oxygen_demand: f64) -> f64 {
    round_to(oxygen_demand / O2_FRACTION_IN_AIR, 1)
}

/// Stage 7: dry mass of the organic component in the tunnel, t.
pub fn dry_organic_mass(params: &TunnelParams) -> f64 {
    let waste = &params.waste;
    let wet_mass = params.tunnel.volume() * waste.density;
    let dry_mass = wet_mass * (1.0 - waste.moisture_pct / 100.0);
    let organic = dry_mass * (waste.organic_pct / 100.0) * waste.organic_share;
    round_to(organic, 2)
}

/// Stage 8: biodegradable volatile solids (BVS), t.
pub fn biodegradable_mass(organic_mass: f64, degradability: f64) -> f64 {
    round_to(organic_mass * degradability, 3)
}

/// Stage 9: O2 needed to oxidize the BVS, t.
pub fn oxygen_mass(bvs: f64, oxygen_demand: f64) -> f64 {
    round_to(bvs * oxygen_demand, 2)
}

/// Stage 10: air carrying that O2, t.
pub fn air_mass(oxygen_mass: f64) -> f64 {
    round_to(oxygen_mass / O2_FRACTION_IN_AIR, 1)
}

/// Stage 11: air volume over the cycle, m³.
pub fn air_volume(air_mass: f64, air_density: f64) -> f64 {
    round_to(air_mass * KG_PER_TONNE / air_density, 1)
}

/// Stage 12: evenly distributed hourly air flow, m³/h, rounded up.
pub fn average_hourly_flow(air_volume: f64, schedule: &Schedule) -> f64 {
    round_up(air_volume / schedule.total_hours())
}

/// Stage 13: g O2 per g dry BVS, scaled by degradability.
pub fn oxygen_per_bvs(degradability: f64, oxygen_demand: f64) -> f64 {
    round_to(degradability * oxygen_demand, 2)
}

/// Stage 14: g O2 per g cellulose, scaled by the decomposition fraction.
pub fn oxygen_per_cellulose(cellulose_demand: f64) -> f64 {
    round_to(CELLULOSE_DECOMPOSITION * cellulose_demand, 2)
}

/// Stage 15: heat released per g dry organic matter, cal/g.
pub fn heat_released(oxygen_per_bvs: f64, oxygen_per_cellulose: f64) -> f64 {
    round_to((oxygen_per_bvs + oxygen_per_cellulose) * HEAT_PER_GRAM_O2, 1)
}

/// Stage 16: g air per g BVS to carry off the released heat.
pub fn heat_removal_air(heat_released: f64) -> f64 {
    round_to(heat_released / specific_heat_sum(), 2)
}

/// Average hourly air flow for heat removal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatRemovalFlow {
    /// Flow for the whole organic mass, m³/h, rounded up.
    pub total: f64,
    /// Flow per tonne of organic mass, m³/(h·t), unrounded.
    pub per_tonne: f64,
}

/// Stage 17: heat-removal air rate as an hourly flow over the cycle.
///
/// Uses the configured air density, the same one stage 11 uses.
pub fn heat_removal_flow(
    heat_removal_air: f64,
    organic_mass: f64,
    air_density: f64,
    schedule: &Schedule,
) -> HeatRemovalFlow {
    let per_tonne = heat_removal_air * GRAMS_PER_TONNE
        / (air_density * f64::from(schedule.days) * f64::from(schedule.hours_per_day) * KG_PER_TONNE);
    HeatRemovalFlow {
        total: round_up(per_tonne * organic_mass),
        per_tonne,
    }
}

/// Stage 18: peak hourly air flow, m³/h.
pub fn peak_hourly_flow(average: f64) -> f64 {
    average * PEAK_FACTOR
}

//! Composition of the stages into one calculation run.

use aerocalc_chem::Balanced;
use serde::Serialize;
use tracing::debug;

use crate::error::CalcError;
use crate::params::TunnelParams;
use crate::stages::{self, HeatRemovalFlow};

/// Every value produced by one run, in stage order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AerationReport {
    pub params: TunnelParams,
    pub equation: Balanced,
    pub molar_mass: f64,
    pub oxygen_demand: f64,
    pub ammonia_oxygen_demand: f64,
    pub cellulose_oxygen_demand: f64,
    pub air_to_oxygen_ratio: f64,
    pub organic_mass: f64,
    pub bvs: f64,
    pub oxygen_mass: f64,
    pub air_mass: f64,
    pub air_volume: f64,
    pub average_hourly_flow: f64,
    pub oxygen_per_bvs: f64,
    pub oxygen_per_cellulose: f64,
    pub heat_released: f64,
    pub heat_removal_air: f64,
    pub heat_removal_flow: HeatRemovalFlow,
    pub peak_hourly_flow: f64,
}

impl AerationReport {
    /// Coefficient of O2 in the balanced equation.
    pub fn o2_coefficient(&self) -> Option<u64> {
        self.equation.coefficient(aerocalc_chem::balance::OXYGEN)
    }
}

/// Run the full pipeline.
///
/// Fails only if the compound formula is malformed or cannot be balanced;
/// nothing downstream is computed in that case.
pub fn compute(params: &TunnelParams) -> Result<AerationReport, CalcError> {
    let equation = stages::stoichiometric_balance(&params.formula)?;
    let o2 = equation
        .coefficient(aerocalc_chem::balance::OXYGEN)
        .ok_or_else(|| CalcError::MissingSpecies(aerocalc_chem::balance::OXYGEN.to_string()))?;
    debug!(equation = %equation, o2, "stoichiometry");

    let (_, molar_mass) = stages::molecular_mass(&params.formula)?;
    debug!(molar_mass, "molecular mass");

    let oxygen_demand = stages::oxygen_demand(o2, molar_mass);
    let ammonia_oxygen_demand = stages::ammonia_oxygen_demand(molar_mass);
    let cellulose_oxygen_demand = stages::cellulose_oxygen_demand();
    let air_to_oxygen_ratio = stages::air_to_oxygen_ratio(oxygen_demand);
    debug!(
        oxygen_demand,
        ammonia_oxygen_demand, cellulose_oxygen_demand, air_to_oxygen_ratio, "oxygen demand"
    );

    let organic_mass = stages::dry_organic_mass(params);
    let bvs = stages::biodegradable_mass(organic_mass, params.waste.degradability);
    let oxygen_mass = stages::oxygen_mass(bvs, oxygen_demand);
    let air_mass = stages::air_mass(oxygen_mass);
    let air_volume = stages::air_volume(air_mass, params.air.density);
    let average_hourly_flow = stages::average_hourly_flow(air_volume, &params.schedule);
    debug!(
        organic_mass,
        bvs, oxygen_mass, air_mass, air_volume, average_hourly_flow, "oxidation air"
    );

    let oxygen_per_bvs = stages::oxygen_per_bvs(params.waste.degradability, oxygen_demand);
    let oxygen_per_cellulose = stages::oxygen_per_cellulose(cellulose_oxygen_demand);
    let heat_released = stages::heat_released(oxygen_per_bvs, oxygen_per_cellulose);
    let heat_removal_air = stages::heat_removal_air(heat_released);
    let heat_removal_flow = stages::heat_removal_flow(
        heat_removal_air,
        organic_mass,
        params.air.density,
        &params.schedule,
    );
    let peak_hourly_flow = stages::peak_hourly_flow(heat_removal_flow.total);
    debug!(
        heat_released,
        heat_removal_air,
        heat_removal_flow = heat_removal_flow.total,
        peak_hourly_flow,
        "heat removal air"
    );

    Ok(AerationReport {
        params: params.clone(),
        equation,
        molar_mass,
        oxygen_demand,
        ammonia_oxygen_demand,
        cellulose_oxygen_demand,
        air_to_oxygen_ratio,
        organic_mass,
        bvs,
        oxygen_mass,
        air_mass,
        air_volume,
        average_hourly_flow,
        oxygen_per_bvs,
        oxygen_per_cellulose,
        heat_released,
        heat_removal_air,
        heat_removal_flow,
        peak_hourly_flow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerocalc_chem::ChemError;
    use pretty_assertions::assert_eq;

    #[test]
    fn reference_plant() {
        let r = compute(&TunnelParams::default()).unwrap();
        assert_eq!(r.o2_coefficient(), Some(18));
        assert!((r.molar_mass - 361.391).abs() < 1e-9);
        assert_eq!(r.oxygen_demand, 1.59);
        assert_eq!(r.ammonia_oxygen_demand, 0.177);
        assert_eq!(r.cellulose_oxygen_demand, 1.185);
        assert_eq!(r.air_to_oxygen_ratio, 7.6);
        assert_eq!(r.organic_mass, 62.46);
        assert_eq!(r.bvs, 43.722);
        assert_eq!(r.oxygen_mass, 69.52);
        assert_eq!(r.air_mass, 331.0);
        assert_eq!(r.air_volume, 275833.3);
        assert_eq!(r.average_hourly_flow, 548.0);
        assert_eq!(r.oxygen_per_bvs, 1.11);
        assert_eq!(r.oxygen_per_cellulose, 0.3);
        assert_eq!(r.heat_released, 4596.6);
        assert_eq!(r.heat_removal_air, 64.98);
        assert_eq!(r.heat_removal_flow.total, 6711.0);
    }

    #[test]
    fn air_ratio_follows_demand() {
        let r = compute(&TunnelParams::default()).unwrap();
        assert_eq!(
            r.air_to_oxygen_ratio,
            crate::rounding::round_to(r.oxygen_demand / 0.21, 1)
        );
    }

    #[test]
    fn peak_is_exactly_average_times_factor() {
        let r = compute(&TunnelParams::default()).unwrap();
        assert_eq!(r.peak_hourly_flow, r.heat_removal_flow.total * 1.3);
    }

    #[test]
    fn air_density_reaches_both_air_stages() {
        let mut p = TunnelParams::default();
        p.schedule.days = 28;
        p.schedule.hours_per_day = 20;
        p.air.density = 1.29;

        let r = compute(&p).unwrap();
        assert_eq!(r.air_volume, 256589.1);
        assert_eq!(r.average_hourly_flow, 459.0);
        assert_eq!(r.heat_removal_air, 64.98);
        let expected = 64.98e6 / (1.29 * 28.0 * 20.0 * 1000.0);
        assert!((r.heat_removal_flow.per_tonne - expected).abs() < 1e-9);
        assert_eq!(r.heat_removal_flow.total, 5619.0);
        assert!((r.peak_hourly_flow - 7304.7).abs() < 1e-9);
    }

    #[test]
    fn rerun_is_bit_identical() {
        let p = TunnelParams::default();
        let a = compute(&p).unwrap();
        let b = compute(&p).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.peak_hourly_flow.to_bits(), b.peak_hourly_flow.to_bits());
    }

    #[test]
    fn unbalanceable_formula_halts() {
        let p = TunnelParams {
            formula: "C6H12O6".to_string(),
            ..TunnelParams::default()
        };
        assert!(matches!(
            compute(&p),
            Err(CalcError::Chem(ChemError::Unbalanceable(_)))
        ));
    }

    #[test]
    fn malformed_formula_halts() {
        let p = TunnelParams {
            formula: "C16(H27".to_string(),
            ..TunnelParams::default()
        };
        assert!(matches!(
            compute(&p),
            Err(CalcError::Chem(ChemError::UnbalancedParen { .. }))
        ));
    }
}

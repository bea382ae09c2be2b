//! Presentation-neutral views of an [`AerationReport`]: labeled lines for
//! console output and the flat export context for document templates.

use std::fmt;

use serde::Serialize;

use crate::pipeline::AerationReport;

/// One labeled quantity of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    /// Stable machine-readable key.
    pub key: &'static str,
    /// Human-readable meaning.
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
    /// Decimal places the value was rounded to.
    pub precision: usize,
}

impl ReportLine {
    fn new(
        key: &'static str,
        label: &'static str,
        value: f64,
        unit: &'static str,
        precision: usize,
    ) -> Self {
        Self {
            key,
            label,
            value,
            unit,
            precision,
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.*}", self.label, self.precision, self.value)?;
        if !self.unit.is_empty() {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

impl AerationReport {
    /// The computed quantities in stage order (stoichiometry excluded).
    pub fn lines(&self) -> Vec<ReportLine> {
        vec![
            ReportLine::new(
                "molar_mass",
                "Molecular mass of organic compound",
                self.molar_mass,
                "g/mol",
                3,
            ),
            ReportLine::new(
                "oxygen_demand",
                "Oxygen to oxidize 1 g of organic compound",
                self.oxygen_demand,
                "g O2/g",
                2,
            ),
            ReportLine::new(
                "ammonia_oxygen_demand",
                "Oxygen to oxidize ammonia",
                self.ammonia_oxygen_demand,
                "g O2/g",
                3,
            ),
            ReportLine::new(
                "cellulose_oxygen_demand",
                "Oxygen to oxidize cellulose",
                self.cellulose_oxygen_demand,
                "g O2/g",
                3,
            ),
            ReportLine::new(
                "air_to_oxygen_ratio",
                "Air supplying the oxygen for 1 g of organics",
                self.air_to_oxygen_ratio,
                "g air/g",
                1,
            ),
            ReportLine::new(
                "organic_mass",
                "Mass of organic component",
                self.organic_mass,
                "t",
                2,
            ),
            ReportLine::new(
                "bvs",
                "Biodegradable volatile solids (BVS)",
                self.bvs,
                "t",
                3,
            ),
            ReportLine::new(
                "oxygen_mass",
                "Oxygen to decompose BVS",
                self.oxygen_mass,
                "t",
                2,
            ),
            ReportLine::new(
                "air_mass",
                "Air to oxidize BVS",
                self.air_mass,
                "t",
                1,
            ),
            ReportLine::new(
                "air_volume",
                "Air volume to oxidize BVS",
                self.air_volume,
                "m3",
                1,
            ),
            ReportLine::new(
                "average_hourly_flow",
                "Average hourly air flow",
                self.average_hourly_flow,
                "m3/h",
                0,
            ),
            ReportLine::new(
                "oxygen_per_bvs",
                "Oxygen per g dry BVS (biodegradable share)",
                self.oxygen_per_bvs,
                "g O2/g",
                2,
            ),
            ReportLine::new(
                "oxygen_per_cellulose",
                "Oxygen per g cellulose (decomposition 0.25)",
                self.oxygen_per_cellulose,
                "g O2/g",
                2,
            ),
            ReportLine::new(
                "heat_released",
                "Heat released per g dry organics",
                self.heat_released,
                "cal/g",
                1,
            ),
            ReportLine::new(
                "heat_removal_air",
                "Air to remove excess heat",
                self.heat_removal_air,
                "g air/g BVS",
                2,
            ),
            ReportLine::new(
                "heat_removal_flow_per_tonne",
                "Heat-removal air flow per tonne organics",
                self.heat_removal_flow.per_tonne,
                "m3/(h*t)",
                3,
            ),
            ReportLine::new(
                "heat_removal_flow",
                "Average hourly air flow for heat removal",
                self.heat_removal_flow.total,
                "m3/h",
                0,
            ),
            ReportLine::new(
                "peak_hourly_flow",
                "Peak hourly air flow",
                self.peak_hourly_flow,
                "m3/h",
                1,
            ),
        ]
    }

    /// The flat mapping consumed by the report document template.
    pub fn export_context(&self) -> ExportContext {
        let p = &self.params;
        let coefficient = |species: &str| self.equation.coefficient(species).unwrap_or(0);
        ExportContext {
            mol_formula: p.formula.clone(),
            l: p.tunnel.length,
            b: p.tunnel.width,
            h: p.tunnel.height,
            p: p.waste.density,
            air_density: p.air.density,
            del_org: p.waste.organic_pct,
            degradability: p.waste.degradability,
            w: p.waste.moisture_pct,
            day_composting: p.schedule.days,
            t_day: p.schedule.hours_per_day,
            koeff1: self.equation.reactants.first().map_or(0, |t| t.coefficient),
            koeff2: coefficient("O2"),
            koeff3: coefficient("CO2"),
            koeff4: coefficient("H2O"),
            koeff5: coefficient("NH3"),
            molecule_mass: self.molar_mass,
        }
    }
}

/// Named values handed to the report template, keyed as the template
/// expects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportContext {
    pub mol_formula: String,
    /// Tunnel length, m.
    pub l: f64,
    /// Tunnel width, m.
    pub b: f64,
    /// Pile height, m.
    pub h: f64,
    /// Waste density, t/m³.
    pub p: f64,
    pub air_density: f64,
    pub del_org: f64,
    pub degradability: f64,
    /// Moisture, %.
    pub w: f64,
    pub day_composting: u32,
    pub t_day: u32,
    /// Compound coefficient.
    pub koeff1: u64,
    /// O2 coefficient.
    pub koeff2: u64,
    /// CO2 coefficient.
    pub koeff3: u64,
    /// H2O coefficient.
    pub koeff4: u64,
    /// NH3 coefficient.
    pub koeff5: u64,
    pub molecule_mass: f64,
}

impl ExportContext {
    /// Flatten into a JSON object.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TunnelParams;
    use crate::pipeline::compute;
    use pretty_assertions::assert_eq;

    #[test]
    fn lines_in_stage_order() {
        let r = compute(&TunnelParams::default()).unwrap();
        let lines = r.lines();
        assert_eq!(lines.first().map(|l| l.key), Some("molar_mass"));
        assert_eq!(lines.last().map(|l| l.key), Some("peak_hourly_flow"));
        assert_eq!(lines.len(), 18);
    }

    #[test]
    fn line_display_uses_precision_and_unit() {
        let r = compute(&TunnelParams::default()).unwrap();
        let rendered: Vec<String> = r.lines().iter().map(ToString::to_string).collect();
        assert!(rendered.contains(&"Average hourly air flow: 548 m3/h".to_string()));
        assert!(rendered.contains(&"Peak hourly air flow: 8724.3 m3/h".to_string()));
        assert!(rendered.contains(&"Mass of organic component: 62.46 t".to_string()));
    }

    #[test]
    fn export_context_uses_template_keys() {
        let r = compute(&TunnelParams::default()).unwrap();
        let ctx = r.export_context();
        assert_eq!(ctx.mol_formula, "C16H27O8N");
        assert_eq!(
            (ctx.koeff1, ctx.koeff2, ctx.koeff3, ctx.koeff4, ctx.koeff5),
            (1, 18, 16, 12, 1)
        );
        assert_eq!(ctx.day_composting, 21);

        let json = ctx.to_json().unwrap();
        for key in [
            "mol_formula", "l", "b", "h", "p", "air_density", "del_org", "degradability", "w",
            "day_composting", "t_day", "koeff1", "koeff2", "koeff3", "koeff4", "koeff5",
            "molecule_mass",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }
}

//! Input parameters of a calculation run.
//!
//! [`TunnelParams`] is immutable once built. Its `Default` holds the
//! reference plant: a 22 x 7 m tunnel loaded 2.6 m high with waste whose
//! organic component is `C16H27O8N`, composted for 21 days around the clock.
//!
//! All sections deserialize with defaults, so a partially specified
//! parameter file is valid. Values are not checked for physical
//! plausibility.

use serde::{Deserialize, Serialize};

/// Default organic compound to oxidize.
pub const DEFAULT_FORMULA: &str = "C16H27O8N";

/// Tunnel reactor geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelGeometry {
    /// Tunnel length, m.
    pub length: f64,
    /// Tunnel width, m.
    pub width: f64,
    /// Height of the loaded waste pile, m.
    pub height: f64,
}

impl Default for TunnelGeometry {
    fn default() -> Self {
        Self {
            length: 22.0,
            width: 7.0,
            height: 2.6,
        }
    }
}

impl TunnelGeometry {
    /// Loading floor area, m².
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Loaded pile volume, m³.
    pub fn volume(&self) -> f64 {
        self.area() * self.height
    }
}

/// Waste composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WasteProperties {
    /// Bulk density, t/m³.
    pub density: f64,
    /// Moisture content, percent of wet mass.
    pub moisture_pct: f64,
    /// Organic fraction of the dry mass, percent.
    pub organic_pct: f64,
    /// Share of this organic component in all organics (0..=1).
    pub organic_share: f64,
    /// Biodegradable fraction of the organic component (0..=1).
    pub degradability: f64,
}

impl Default for WasteProperties {
    fn default() -> Self {
        Self {
            density: 0.65,
            moisture_pct: 60.0,
            organic_pct: 60.0,
            organic_share: 1.0,
            degradability: 0.7,
        }
    }
}

/// Composting schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    /// Length of the composting cycle, days.
    pub days: u32,
    /// Aeration hours per day.
    pub hours_per_day: u32,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            days: 21,
            hours_per_day: 24,
        }
    }
}

impl Schedule {
    /// Total aeration hours of one cycle.
    pub fn total_hours(&self) -> f64 {
        f64::from(self.days) * f64::from(self.hours_per_day)
    }
}

/// Properties of the supplied air.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirProperties {
    /// Air density at normal conditions, kg/m³.
    pub density: f64,
}

impl Default for AirProperties {
    fn default() -> Self {
        Self { density: 1.2 }
    }
}

/// The complete parameter set of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelParams {
    /// Molecular formula of the organic component.
    pub formula: String,
    pub tunnel: TunnelGeometry,
    pub waste: WasteProperties,
    pub schedule: Schedule,
    pub air: AirProperties,
}

impl Default for TunnelParams {
    fn default() -> Self {
        Self {
            formula: DEFAULT_FORMULA.to_string(),
            tunnel: TunnelGeometry::default(),
            waste: WasteProperties::default(),
            schedule: Schedule::default(),
            air: AirProperties::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_reference_plant() {
        let p = TunnelParams::default();
        assert_eq!(p.formula, "C16H27O8N");
        assert_eq!(p.tunnel.area(), 154.0);
        assert_eq!(p.schedule.total_hours(), 504.0);
        assert_eq!(p.air.density, 1.2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p: TunnelParams =
            serde_json::from_str(r#"{"formula": "C2H5NO2", "waste": {"density": 0.8}}"#).unwrap();
        assert_eq!(p.formula, "C2H5NO2");
        assert_eq!(p.waste.density, 0.8);
        assert_eq!(p.waste.moisture_pct, 60.0);
        assert_eq!(p.tunnel, TunnelGeometry::default());
    }
}

//! Physical and empirical constants of the aeration model.
//!
//! The empirical values (cellulose decomposition fraction, heat yield,
//! specific-heat terms, peak margin) have no derivation in the model; they
//! are used as given.

/// Volume fraction of oxygen in air.
pub const O2_FRACTION_IN_AIR: f64 = 0.21;

/// Molar mass of O2 used by the model, g/mol.
pub const O2_MOLAR_MASS: f64 = 32.0;

/// Grams of O2 per mole of compound for nitrification of its ammonia
/// (2 mol O2 x 32 g/mol).
pub const AMMONIA_O2_PER_MOLE: f64 = 2.0 * O2_MOLAR_MASS;

/// Moles of O2 to oxidize one glucose unit of cellulose.
pub const CELLULOSE_O2_MOLES: f64 = 6.0;

/// Molar mass of a cellulose monomer (C6H10O5), g/mol.
pub const CELLULOSE_MOLAR_MASS: f64 = 162.0;

/// Fraction of cellulose assumed to decompose during composting.
pub const CELLULOSE_DECOMPOSITION: f64 = 0.25;

/// Heat released per gram of O2 consumed, cal/g.
pub const HEAT_PER_GRAM_O2: f64 = 3260.0;

/// Specific-heat terms summed to get the heat carried off per gram of air.
pub const SPECIFIC_HEAT_TERMS: [f64; 3] = [60.57, 1.77, 8.40];

/// Peak demand margin over the average heat-removal flow.
pub const PEAK_MARGIN: f64 = 0.3;

/// Multiplier applied to the average flow to get the peak flow.
pub const PEAK_FACTOR: f64 = 1.0 + PEAK_MARGIN;

/// Kilograms per tonne.
pub const KG_PER_TONNE: f64 = 1000.0;

/// Grams per tonne.
pub const GRAMS_PER_TONNE: f64 = 1_000_000.0;

/// Sum of [`SPECIFIC_HEAT_TERMS`], left to right.
pub fn specific_heat_sum() -> f64 {
    SPECIFIC_HEAT_TERMS.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_factor_is_exactly_one_point_three() {
        assert_eq!(PEAK_FACTOR, 1.3);
    }

    #[test]
    fn specific_heat_sum_matches_terms() {
        assert_eq!(specific_heat_sum(), 60.57 + 1.77 + 8.40);
    }
}

//! Chemistry data model: parsed formulas, balanced reactions, and errors.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::elements;

/// A parsed molecular formula.
///
/// `composition` maps element symbols to atom counts. It is ordered by
/// symbol so that iteration (and therefore molar mass summation) is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Formula {
    /// The formula as written by the user, e.g. `"C16H27O8N"`.
    pub text: String,

    /// Atom count per element symbol.
    pub composition: BTreeMap<String, u32>,
}

impl Formula {
    /// Number of atoms of `symbol` in one molecule (0 if absent).
    pub fn count(&self, symbol: &str) -> u32 {
        self.composition.get(symbol).copied().unwrap_or(0)
    }

    /// Molar mass in g/mol, summed from standard atomic weights.
    pub fn molar_mass(&self) -> f64 {
        self.composition
            .iter()
            .map(|(symbol, &count)| {
                // Symbols are checked against the table at parse time.
                elements::atomic_weight(symbol).unwrap_or(0.0) * f64::from(count)
            })
            .sum()
    }

    /// Element symbols present in the formula.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.composition.keys().map(String::as_str)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One species with its stoichiometric coefficient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub species: String,
    pub coefficient: u64,
}

/// A balanced reaction with minimal positive integer coefficients.
///
/// Species keep the order in which they were given to the reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balanced {
    pub reactants: Vec<Term>,
    pub products: Vec<Term>,
}

impl Balanced {
    /// Coefficient of a species on either side of the equation.
    pub fn coefficient(&self, species: &str) -> Option<u64> {
        self.reactants
            .iter()
            .chain(self.products.iter())
            .find(|t| t.species == species)
            .map(|t| t.coefficient)
    }

    /// Reactant coefficients keyed by species.
    pub fn reactant_map(&self) -> BTreeMap<String, u64> {
        self.reactants
            .iter()
            .map(|t| (t.species.clone(), t.coefficient))
            .collect()
    }

    /// Product coefficients keyed by species.
    pub fn product_map(&self) -> BTreeMap<String, u64> {
        self.products
            .iter()
            .map(|t| (t.species.clone(), t.coefficient))
            .collect()
    }
}

impl fmt::Display for Balanced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side(terms: &[Term]) -> String {
            terms
                .iter()
                .map(|t| {
                    if t.coefficient == 1 {
                        t.species.clone()
                    } else {
                        format!("{} {}", t.coefficient, t.species)
                    }
                })
                .collect::<Vec<_>>()
                .join(" + ")
        }
        write!(f, "{} -> {}", side(&self.reactants), side(&self.products))
    }
}

/// Errors that can occur while parsing formulas or balancing reactions.
#[derive(Debug, thiserror::Error)]
pub enum ChemError {
    #[error("empty formula")]
    EmptyFormula,

    #[error("unexpected character '{ch}' at position {pos} in formula '{formula}'")]
    UnexpectedChar {
        formula: String,
        ch: char,
        pos: usize,
    },

    #[error("unbalanced parenthesis at position {pos} in formula '{formula}'")]
    UnbalancedParen { formula: String, pos: usize },

    #[error("unknown element '{symbol}' in formula '{formula}'")]
    UnknownElement { formula: String, symbol: String },

    #[error("atom count overflow in formula '{0}'")]
    CountOverflow(String),

    #[error("reaction {0} cannot be balanced with positive coefficients")]
    Unbalanceable(String),

    #[error("reaction {0} has no unique balance (coefficients are underdetermined)")]
    Underdetermined(String),

    #[error("coefficient too large in balanced reaction {0}")]
    CoefficientOverflow(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_formula;

    #[test]
    fn molar_mass_of_default_compound() {
        let f = parse_formula("C16H27O8N").unwrap();
        assert!((f.molar_mass() - 361.391).abs() < 1e-9);
    }

    #[test]
    fn count_missing_element_is_zero() {
        let f = parse_formula("H2O").unwrap();
        assert_eq!(f.count("H"), 2);
        assert_eq!(f.count("C"), 0);
    }

    #[test]
    fn equation_display_omits_unit_coefficients() {
        let b = Balanced {
            reactants: vec![
                Term { species: "CH4".into(), coefficient: 1 },
                Term { species: "O2".into(), coefficient: 2 },
            ],
            products: vec![
                Term { species: "CO2".into(), coefficient: 1 },
                Term { species: "H2O".into(), coefficient: 2 },
            ],
        };
        assert_eq!(b.to_string(), "CH4 + 2 O2 -> CO2 + 2 H2O");
        assert_eq!(b.coefficient("H2O"), Some(2));
        assert_eq!(b.coefficient("N2"), None);
    }
}

//! Stoichiometric balancing by exact null-space computation.
//!
//! A reaction with `n` species over `m` elements is balanced when the
//! coefficient vector lies in the null space of the `m x n` composition
//! matrix (reactant columns positive, product columns negative). The
//! reaction is accepted only if that null space is one-dimensional and its
//! basis vector can be scaled so every coefficient is strictly positive.

use std::collections::BTreeSet;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use tracing::debug;

use crate::parser::parse_formula;
use crate::types::{Balanced, ChemError, Formula, Term};

/// Products of complete aerobic oxidation of a nitrogen-bearing compound.
pub const OXIDATION_PRODUCTS: [&str; 3] = ["CO2", "H2O", "NH3"];

/// Oxidant species.
pub const OXYGEN: &str = "O2";

/// An unbalanced reaction: parsed reactant and product species.
#[derive(Debug, Clone)]
pub struct Reaction {
    reactants: Vec<Formula>,
    products: Vec<Formula>,
}

impl Reaction {
    /// Parse the species of a reaction.
    pub fn new(reactants: &[&str], products: &[&str]) -> Result<Self, ChemError> {
        Ok(Self {
            reactants: reactants
                .iter()
                .map(|s| parse_formula(s))
                .collect::<Result<_, _>>()?,
            products: products
                .iter()
                .map(|s| parse_formula(s))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Solve for the minimal positive integer coefficients.
    pub fn balance(&self) -> Result<Balanced, ChemError> {
        let species: Vec<&Formula> = self.reactants.iter().chain(self.products.iter()).collect();
        let n_reactants = self.reactants.len();

        let elements: BTreeSet<&str> = self
            .reactants
            .iter()
            .chain(self.products.iter())
            .flat_map(|f| f.elements())
            .collect();

        let mut matrix: Vec<Vec<BigRational>> = elements
            .iter()
            .map(|el| {
                species
                    .iter()
                    .enumerate()
                    .map(|(j, f)| {
                        let count = i64::from(f.count(el));
                        let signed = if j < n_reactants { count } else { -count };
                        BigRational::from_integer(BigInt::from(signed))
                    })
                    .collect()
            })
            .collect();

        let pivots = reduced_row_echelon(&mut matrix);
        let n = species.len();
        let free: Vec<usize> = (0..n).filter(|c| !pivots.contains(c)).collect();

        match free.len() {
            0 => return Err(ChemError::Unbalanceable(self.label())),
            1 => {}
            _ => return Err(ChemError::Underdetermined(self.label())),
        }
        let free_col = free[0];

        // Free variable = 1; each pivot variable = -rref[row][free].
        let mut solution = vec![BigRational::zero(); n];
        solution[free_col] = BigRational::one();
        for (row, &col) in pivots.iter().enumerate() {
            solution[col] = -matrix[row][free_col].clone();
        }

        if solution.iter().all(|r| r.is_negative()) {
            solution = solution.into_iter().map(|r| -r).collect();
        }
        if !solution.iter().all(|r| r.is_positive()) {
            return Err(ChemError::Unbalanceable(self.label()));
        }

        let integers = scale_to_integers(&solution);
        let mut coefficients = Vec::with_capacity(n);
        for value in &integers {
            let c = value
                .to_u64()
                .ok_or_else(|| ChemError::CoefficientOverflow(self.label()))?;
            coefficients.push(c);
        }

        let term = |(f, c): (&&Formula, &u64)| Term {
            species: f.text.clone(),
            coefficient: *c,
        };
        let balanced = Balanced {
            reactants: species[..n_reactants]
                .iter()
                .zip(&coefficients[..n_reactants])
                .map(term)
                .collect(),
            products: species[n_reactants..]
                .iter()
                .zip(&coefficients[n_reactants..])
                .map(term)
                .collect(),
        };
        debug!(equation = %balanced, "balanced reaction");
        Ok(balanced)
    }

    /// Unbalanced equation text for error messages.
    fn label(&self) -> String {
        let join = |side: &[Formula]| {
            side.iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(" + ")
        };
        format!("{} -> {}", join(&self.reactants), join(&self.products))
    }
}

/// Balance `compound + O2 -> CO2 + H2O + NH3`.
pub fn balance_oxidation(compound: &str) -> Result<Balanced, ChemError> {
    Reaction::new(&[compound, OXYGEN], &OXIDATION_PRODUCTS)?.balance()
}

/// Reduce `matrix` in place to reduced row echelon form.
///
/// Returns the pivot column of each non-zero row, in row order.
fn reduced_row_echelon(matrix: &mut [Vec<BigRational>]) -> Vec<usize> {
    let rows = matrix.len();
    let cols = matrix.first().map_or(0, Vec::len);
    let mut pivots = Vec::new();
    let mut row = 0;

    for col in 0..cols {
        if row >= rows {
            break;
        }
        let Some(sel) = (row..rows).find(|&r| !matrix[r][col].is_zero()) else {
            continue;
        };
        matrix.swap(row, sel);

        let pivot = matrix[row][col].clone();
        for c in col..cols {
            let scaled = &matrix[row][c] / &pivot;
            matrix[row][c] = scaled;
        }

        for r in 0..rows {
            if r == row || matrix[r][col].is_zero() {
                continue;
            }
            let factor = matrix[r][col].clone();
            for c in col..cols {
                let delta = &factor * &matrix[row][c];
                let updated = &matrix[r][c] - &delta;
                matrix[r][c] = updated;
            }
        }

        pivots.push(col);
        row += 1;
    }
    pivots
}

/// Multiply by the LCM of denominators and divide by the GCD of numerators.
fn scale_to_integers(values: &[BigRational]) -> Vec<BigInt> {
    let den_lcm = values
        .iter()
        .fold(BigInt::one(), |acc, v| acc.lcm(v.denom()));
    let scaled: Vec<BigInt> = values
        .iter()
        .map(|v| v.numer() * (&den_lcm / v.denom()))
        .collect();
    let common = scaled.iter().fold(BigInt::zero(), |acc, v| acc.gcd(v));
    if common.is_zero() || common.is_one() {
        scaled
    } else {
        scaled.into_iter().map(|v| v / &common).collect()
    }
}

//! Chemistry primitives for the aerocalc system.
//!
//! Parses molecular formulas into element compositions, computes molar
//! masses from standard atomic weights, and balances reactions exactly with
//! arbitrary-precision rational arithmetic (`num-rational`).

pub mod balance;
pub mod elements;
pub mod parser;
pub mod types;

pub use balance::{Reaction, balance_oxidation};
pub use types::{Balanced, ChemError, Formula, Term};

//! Calculation error types.

use aerocalc_chem::ChemError;

/// Errors that halt the calculation pipeline.
///
/// Numeric inputs are not validated; only the chemistry can fail.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    /// The compound formula could not be parsed or balanced.
    #[error(transparent)]
    Chem(#[from] ChemError),

    /// A species expected in the balanced equation was absent.
    #[error("species {0} missing from balanced equation")]
    MissingSpecies(String),
}

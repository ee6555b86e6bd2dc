#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::mass_error::MassErrorType;
use crate::meta::enzyme::Enzyme;

/// The search settings a result document was produced with
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchParameters {
    /// The enzyme used for the in-silico digest
    pub digestion_enzyme: Enzyme,
    /// The maximum number of missed cleavages permitted per peptide
    pub missed_cleavages: i64,
    /// The path to the sequence database that was searched
    pub db: String,
    /// The precursor (MS1) mass tolerance
    pub precursor_mass_tolerance: f64,
    /// The unit of [`SearchParameters::precursor_mass_tolerance`]
    pub precursor_mass_tolerance_unit: MassErrorType,
}

impl SearchParameters {
    pub fn precursor_mass_tolerance_ppm(&self) -> bool {
        self.precursor_mass_tolerance_unit.is_ppm()
    }
}

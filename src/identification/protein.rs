#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::meta::SearchParameters;

use super::TargetDecoy;

/// A protein referenced by at least one peptide hit
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProteinHit {
    pub accession: String,
    pub target_decoy: TargetDecoy,
}

impl ProteinHit {
    pub fn new<S: Into<String>>(accession: S) -> Self {
        let accession = accession.into();
        let target_decoy = TargetDecoy::from_accession(&accession);
        Self {
            accession,
            target_decoy,
        }
    }

    pub fn is_decoy(&self) -> bool {
        self.target_decoy.is_decoy()
    }
}

/// The container for one identification run: the search settings and every
/// distinct protein seen, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProteinIdentification {
    pub search_parameters: Option<SearchParameters>,
    pub hits: Vec<ProteinHit>,
}

impl ProteinIdentification {
    pub fn push(&mut self, hit: ProteinHit) {
        self.hits.push(hit)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProteinHit> {
        self.hits.iter()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

use indexmap::IndexSet;

use super::TargetDecoy;

/// Tracks which protein accessions have already been emitted so that each
/// one enters the protein catalog exactly once per document.
#[derive(Debug, Clone, Default)]
pub struct AccessionRegistry {
    accessions: IndexSet<String>,
}

impl AccessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `accession`, returning whether it was previously unseen and its
    /// target/decoy classification
    pub fn register_if_absent(&mut self, accession: &str) -> (bool, TargetDecoy) {
        let is_new = if self.accessions.contains(accession) {
            false
        } else {
            self.accessions.insert(accession.to_string())
        };
        (is_new, TargetDecoy::from_accession(accession))
    }

    pub fn len(&self) -> usize {
        self.accessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessions.is_empty()
    }
}

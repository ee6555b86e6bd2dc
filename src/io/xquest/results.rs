use crate::identification::{PeptideIdentification, ProteinHit, ProteinIdentification};
use crate::meta::{SearchParameters, XQuestResultMeta};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One spectrum's candidate identifications, in document order
pub type SpectrumSearch = Vec<PeptideIdentification>;

/// Everything read from an xQuest result document
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct XQuestResults {
    /// One record per `xquest_results` element
    pub metas: Vec<XQuestResultMeta>,
    /// The spectrum searches that met the minimum hit count
    pub spectrum_searches: Vec<SpectrumSearch>,
    /// The identification run container. There is always exactly one.
    pub protein_identifications: Vec<ProteinIdentification>,
    /// The number of `search_hit` elements read, retained or not
    pub n_hits: usize,
    /// The running value of [`XQuestResults::n_hits`] at each retained spectrum search,
    /// present only when tracking was requested
    pub cumulative_hits: Option<Vec<usize>>,
}

impl XQuestResults {
    pub fn new(track_cumulative_hits: bool) -> Self {
        Self {
            protein_identifications: vec![ProteinIdentification::default()],
            cumulative_hits: if track_cumulative_hits {
                Some(Vec::new())
            } else {
                None
            },
            ..Default::default()
        }
    }

    /// The protein catalog in first-seen order
    pub fn proteins(&self) -> &[ProteinHit] {
        self.protein_identifications
            .first()
            .map(|p| p.hits.as_slice())
            .unwrap_or_default()
    }

    pub fn search_parameters(&self) -> Option<&SearchParameters> {
        self.protein_identifications
            .first()
            .and_then(|p| p.search_parameters.as_ref())
    }

    pub fn iter_identifications(&self) -> impl Iterator<Item = &PeptideIdentification> {
        self.spectrum_searches.iter().flatten()
    }

    pub fn num_identifications(&self) -> usize {
        self.spectrum_searches.iter().map(|s| s.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.spectrum_searches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spectrum_searches.is_empty()
    }
}

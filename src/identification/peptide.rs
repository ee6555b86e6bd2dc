#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::impl_meta_described;
use crate::params::{MetaDescribed, MetaInfo};

use super::{keys, CrossLinkType, TargetDecoy};

/// Where a peptide occurs in a protein. xQuest does not report offsets or
/// flanking residues so these are usually left unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeptideEvidence {
    pub protein_accession: String,
    pub start: i64,
    pub end: i64,
    pub aa_before: char,
    pub aa_after: char,
}

impl PeptideEvidence {
    pub const UNKNOWN_POSITION: i64 = -1;
    pub const UNKNOWN_AA: char = 'X';

    /// Evidence linking to `protein_accession` with every position field unknown
    pub fn unlocated<S: Into<String>>(protein_accession: S) -> Self {
        Self {
            protein_accession: protein_accession.into(),
            start: Self::UNKNOWN_POSITION,
            end: Self::UNKNOWN_POSITION,
            aa_before: Self::UNKNOWN_AA,
            aa_after: Self::UNKNOWN_AA,
        }
    }
}

/// One side of a cross-link spectrum match
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeptideHit {
    pub peptide_evidences: Vec<PeptideEvidence>,
    pub meta: MetaInfo,
}

impl_meta_described!(PeptideHit);

impl PeptideHit {
    pub fn target_decoy(&self) -> Option<TargetDecoy> {
        self.get_meta_value(keys::TARGET_DECOY)
            .and_then(|v| v.as_str())
            .and_then(|v| v.parse().ok())
    }

    /// The linked residue position
    pub fn xl_pos(&self) -> Option<i64> {
        self.get_meta_value(keys::XL_POS).and_then(|v| v.as_int())
    }

    /// The second linked residue position, only present for loop-links
    pub fn xl_pos2(&self) -> Option<i64> {
        self.get_meta_value(keys::XL_POS2).and_then(|v| v.as_int())
    }

    pub fn num_matched_ions(&self) -> Option<i64> {
        self.get_meta_value(keys::NUM_MATCHED_IONS)
            .and_then(|v| v.as_int())
    }

    /// The raw comma-separated protein accession string
    pub fn protein_accessions(&self) -> Option<&str> {
        self.get_meta_value(keys::PROT).and_then(|v| v.as_str())
    }

    pub fn accessions(&self) -> impl Iterator<Item = &str> {
        self.peptide_evidences
            .iter()
            .map(|ev| ev.protein_accession.as_str())
    }
}

/// A candidate cross-link identification for one spectrum: the alpha hit
/// always, followed by the beta hit for inter-peptide cross-links.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeptideIdentification {
    pub hits: Vec<PeptideHit>,
    pub meta: MetaInfo,
}

impl_meta_described!(PeptideIdentification);

impl PeptideIdentification {
    pub fn new(hits: Vec<PeptideHit>, meta: MetaInfo) -> Self {
        Self { hits, meta }
    }

    pub fn alpha(&self) -> Option<&PeptideHit> {
        self.hits.first()
    }

    pub fn beta(&self) -> Option<&PeptideHit> {
        self.hits.get(1)
    }

    pub fn cross_link_type(&self) -> Option<CrossLinkType> {
        match self.get_meta_value(keys::XL_TYPE).and_then(|v| v.as_str())? {
            "cross-link" => Some(CrossLinkType::CrossLink),
            "loop-link" => Some(CrossLinkType::LoopLink),
            "mono-link" => Some(CrossLinkType::MonoLink),
            _ => None,
        }
    }

    pub fn target_decoy(&self) -> Option<TargetDecoy> {
        self.get_meta_value(keys::TARGET_DECOY)
            .and_then(|v| v.as_str())
            .and_then(|v| v.parse().ok())
    }

    pub fn is_decoy(&self) -> bool {
        matches!(self.target_decoy(), Some(TargetDecoy::Decoy))
    }

    pub fn rank(&self) -> Option<i64> {
        self.get_meta_value(keys::XL_RANK).and_then(|v| v.as_int())
    }

    pub fn score(&self) -> Option<f64> {
        self.get_meta_value(keys::SCORE).and_then(|v| v.as_float())
    }

    pub fn is_intraprotein(&self) -> bool {
        self.meta_value_exists(keys::IS_INTRAPROTEIN)
    }

    pub fn is_interprotein(&self) -> bool {
        self.meta_value_exists(keys::IS_INTERPROTEIN)
    }
}

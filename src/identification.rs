//! Data structures for cross-linked peptide identifications and the proteins
//! they are evidence for.
mod peptide;
mod protein;
mod registry;

use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use peptide::{PeptideEvidence, PeptideHit, PeptideIdentification};
pub use protein::{ProteinHit, ProteinIdentification};
pub use registry::AccessionRegistry;

/// Metadata keys written onto identifications and peptide hits
pub mod keys {
    pub const TARGET_DECOY: &str = "target_decoy";
    pub const XL_TYPE: &str = "xl_type";
    pub const XL_POS: &str = "xl_pos";
    pub const XL_POS2: &str = "xl_pos2";
    pub const XL_RANK: &str = "xl_rank";

    pub const ID: &str = "OpenXQuest:id";
    pub const XLINKER_MASS: &str = "OpenXQuest:xlinkermass";
    pub const WTIC: &str = "OpenXQuest:wTIC";
    pub const PERC_TIC: &str = "OpenXQuest:percTIC";
    pub const INTSUM: &str = "OpenXQuest:intsum";
    pub const MATCH_ODDS: &str = "OpenXQuest:match-odds";
    pub const SCORE: &str = "OpenXQuest:score";
    pub const ERROR_REL: &str = "OpenXQuest:error_rel";
    pub const STRUCTURE: &str = "OpenXQuest:structure";

    pub const NUM_MATCHED_IONS: &str = "OpenXQuest:num_of_matched_ions";
    pub const PROT: &str = "OpenXQuest:prot";

    pub const IS_INTRAPROTEIN: &str = "OpenXQuest:is_intraprotein";
    pub const IS_INTERPROTEIN: &str = "OpenXQuest:is_interprotein";
}

/// Whether a record comes from the real (target) or the synthetic (decoy) database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TargetDecoy {
    Target,
    Decoy,
}

impl TargetDecoy {
    /// An accession is a decoy iff the text `"decoy"` occurs anywhere in it
    pub fn from_accession(accession: &str) -> Self {
        if accession.contains("decoy") {
            Self::Decoy
        } else {
            Self::Target
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Decoy => "decoy",
        }
    }

    pub fn is_decoy(&self) -> bool {
        matches!(self, Self::Decoy)
    }
}

impl Display for TargetDecoy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetDecoy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "target" => Ok(Self::Target),
            "decoy" => Ok(Self::Decoy),
            _ => Err(format!("Not a target/decoy label: {s}")),
        }
    }
}

/// The three cross-link topologies an xQuest hit may describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CrossLinkType {
    /// Two distinct peptides joined by the linker (`xlink`)
    CrossLink,
    /// Both linker ends on the same peptide (`intralink`)
    LoopLink,
    /// The linker attached to one residue with its other end free (`monolink`)
    MonoLink,
}

impl CrossLinkType {
    /// The label stored under the `xl_type` metadata key
    pub fn xl_type(&self) -> &'static str {
        match self {
            Self::CrossLink => "cross-link",
            Self::LoopLink => "loop-link",
            Self::MonoLink => "mono-link",
        }
    }

    /// The spelling used by the `type` attribute of `search_hit`
    pub fn xquest_name(&self) -> &'static str {
        match self {
            Self::CrossLink => "xlink",
            Self::LoopLink => "intralink",
            Self::MonoLink => "monolink",
        }
    }
}

impl FromStr for CrossLinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xlink" => Ok(Self::CrossLink),
            "intralink" => Ok(Self::LoopLink),
            "monolink" => Ok(Self::MonoLink),
            _ => Err(s.to_string()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_target_decoy_classification() {
        assert_eq!(TargetDecoy::from_accession("decoy"), TargetDecoy::Decoy);
        assert_eq!(
            TargetDecoy::from_accession("decoy_reverse_P02769"),
            TargetDecoy::Decoy
        );
        assert_eq!(TargetDecoy::from_accession("sp|decoyP1|X"), TargetDecoy::Decoy);
        assert_eq!(TargetDecoy::from_accession("P02769"), TargetDecoy::Target);
        assert_eq!(TargetDecoy::from_accession("DECOY_P1"), TargetDecoy::Target);
        assert_eq!("decoy".parse::<TargetDecoy>().unwrap(), TargetDecoy::Decoy);
        assert_eq!(TargetDecoy::Target.to_string(), "target");
    }

    #[test]
    fn test_cross_link_type() {
        for name in ["xlink", "intralink", "monolink"] {
            let t: CrossLinkType = name.parse().unwrap();
            assert_eq!(t.xquest_name(), name);
        }
        assert_eq!(CrossLinkType::LoopLink.xl_type(), "loop-link");
        assert_eq!("foo".parse::<CrossLinkType>().unwrap_err(), "foo");
    }
}

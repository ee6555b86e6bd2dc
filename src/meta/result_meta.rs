use crate::impl_meta_described;
use crate::meta::search_parameters::SearchParameters;
use crate::params::MetaInfo;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Document-level information from the `xquest_results` root element
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct XQuestResultMeta {
    /// The interpreted search settings
    pub search_parameters: SearchParameters,
    /// Every attribute of the root element, verbatim
    pub meta: MetaInfo,
}

impl_meta_described!(XQuestResultMeta);

impl XQuestResultMeta {
    pub fn new(search_parameters: SearchParameters, meta: MetaInfo) -> Self {
        Self {
            search_parameters,
            meta,
        }
    }
}

//! Search settings and document-level metadata.
pub mod enzyme;
mod result_meta;
mod search_parameters;

pub use crate::meta::enzyme::{Enzyme, EnzymeLookup, XQuestEnzymes};
pub use crate::meta::result_meta::XQuestResultMeta;
pub use crate::meta::search_parameters::SearchParameters;

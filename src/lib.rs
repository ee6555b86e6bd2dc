//! `mzxquest` reads the results of cross-linking mass spectrometry searches written by xQuest
//! into a normalized set of cross-link identifications and a deduplicated protein catalog.
//!
//! ```no_run
//! use mzxquest::io::{read_xquest_results, XQuestReaderConfig};
//!
//! let config = XQuestReaderConfig::new().with_min_n_ions_per_spectrum(1);
//! let results = read_xquest_results("./test/data/small.xquest.xml", config).unwrap();
//! for spectrum_search in results.spectrum_searches.iter() {
//!     for ident in spectrum_search {
//!         println!("{:?} {:?}", ident.cross_link_type(), ident.score());
//!     }
//! }
//! ```
pub mod identification;
pub mod io;
pub mod mass_error;
pub mod meta;
pub mod params;
pub mod prelude;

pub use crate::identification::{
    CrossLinkType, PeptideEvidence, PeptideHit, PeptideIdentification, ProteinHit,
    ProteinIdentification, TargetDecoy,
};
pub use crate::io::xquest::{XQuestReaderConfig, XQuestResultReader, XQuestResults};
pub use crate::mass_error::MassErrorType;
pub use crate::params::{MetaDescribed, MetaValue};

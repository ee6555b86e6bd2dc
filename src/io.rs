//! Reading cross-link identification result file formats.

pub mod xquest;

pub use crate::io::xquest::{
    read_xquest_results, XQuestParserError, XQuestReaderConfig, XQuestResultReader,
    XQuestResults,
};

//! Implements a parser for the xQuest cross-link search result XML format.

mod handler;
pub mod reader;
mod reading_shared;
mod results;

pub use crate::io::xquest::handler::{XQuestReaderConfig, XQuestResultHandler};
pub use crate::io::xquest::reader::{
    read_xquest_results, XQuestResultReader, XQuestResultReaderType,
};
pub use crate::io::xquest::reading_shared::{
    AttributeParse, AttributeSource, ParserResult, XQuestParserError, XQuestParserState,
    XQuestSAX, XQuestTag,
};
pub use crate::io::xquest::results::{SpectrumSearch, XQuestResults};

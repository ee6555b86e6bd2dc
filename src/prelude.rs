pub use crate::io::xquest::{AttributeSource, XQuestSAX};
pub use crate::meta::EnzymeLookup;
pub use crate::params::MetaDescribed;
pub use std::io::prelude::*;

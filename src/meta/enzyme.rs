use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A proteolytic digestion enzyme used in a search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Enzyme {
    /// The enzyme's common name, e.g. `"trypsin"`
    pub name: String,
    /// The cleavage rule as a regular expression over the protein sequence, when a
    /// caller-supplied table provides one. xQuest only records the enzyme code.
    pub cleavage_regex: Option<String>,
}

impl Enzyme {
    pub fn new<S: Into<String>>(name: S, cleavage_regex: Option<&str>) -> Self {
        Self {
            name: name.into(),
            cleavage_regex: cleavage_regex.map(|s| s.to_string()),
        }
    }
}

/// Resolve the numeric enzyme codes written by xQuest into [`Enzyme`] definitions.
///
/// The reader takes its lookup at construction so callers can substitute
/// their own table instead of relying on process-wide state.
pub trait EnzymeLookup {
    fn enzyme_by_code(&self, code: i64) -> Option<Enzyme>;
}

/// The enzyme table xQuest uses in its `enzyme_num` attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XQuestEnzymes;

impl XQuestEnzymes {
    pub fn name_for_code(code: i64) -> Option<&'static str> {
        match code {
            0 => Some("no_enzyme"),
            1 => Some("trypsin"),
            2 => Some("chymotrypsin"),
            3 | 9 | 10 | 14..=18 | 20 => Some("unknown_enzyme"),
            _ => None,
        }
    }
}

impl EnzymeLookup for XQuestEnzymes {
    fn enzyme_by_code(&self, code: i64) -> Option<Enzyme> {
        Self::name_for_code(code).map(|name| Enzyme::new(name, None))
    }
}

impl EnzymeLookup for HashMap<i64, Enzyme> {
    fn enzyme_by_code(&self, code: i64) -> Option<Enzyme> {
        self.get(&code).cloned()
    }
}

impl<T: EnzymeLookup + ?Sized> EnzymeLookup for &T {
    fn enzyme_by_code(&self, code: i64) -> Option<Enzyme> {
        (**self).enzyme_by_code(code)
    }
}

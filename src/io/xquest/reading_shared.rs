use std::io;

use quick_xml::events::BytesStart;
use quick_xml::Error as XMLError;

use thiserror::Error;

/**
The different states the [`XQuestResultHandler`](super::XQuestResultHandler) can enter while
parsing different phases of the document. This is mostly useful to the module consumer for
determining where in the document an error occurred.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd)]
pub enum XQuestParserState {
    Start = 0,

    Results,
    SpectrumSearch,
    SearchHit,
    SpectrumSearchDone,
    ResultsDone,

    ParserError,
}

/// The elements of an xQuest result document the parser acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XQuestTag {
    Results,
    SpectrumSearch,
    SearchHit,
    Unknown,
}

impl XQuestTag {
    pub fn from_name(name: &str) -> Self {
        match name {
            "xquest_results" => Self::Results,
            "spectrum_search" => Self::SpectrumSearch,
            "search_hit" => Self::SearchHit,
            _ => Self::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Results => "xquest_results",
            Self::SpectrumSearch => "spectrum_search",
            Self::SearchHit => "search_hit",
            Self::Unknown => "unknown",
        }
    }
}

/**
All the ways that xQuest result parsing can go wrong
*/
#[derive(Debug, Error)]
pub enum XQuestParserError {
    #[error("The required attribute {attribute} is missing from {tag}")]
    MissingAttribute { tag: String, attribute: String },
    #[error("The attribute {attribute} of {tag} has an invalid value {value:?}")]
    InvalidAttributeValue {
        tag: String,
        attribute: String,
        value: String,
    },
    #[error("Expected a pair of comma-separated cross-link positions, got {0:?}")]
    MalformedPositionList(String),
    #[error("Unsupported cross-link type {0:?}")]
    UnsupportedCrosslinkType(String),
    #[error("No enzyme is known for enzyme code {0}")]
    UnknownEnzyme(i64),
    #[error("Failed to decode attribute {0}")]
    AttributeError(String, #[source] XMLError),
    #[error("An XML error {1:?} was encountered in {0:?}")]
    XMLError(XQuestParserState, #[source] XMLError),
    #[error("The document ended before the results were complete in {0:?}")]
    IncompleteDocument(XQuestParserState),
}

impl From<XQuestParserError> for io::Error {
    fn from(value: XQuestParserError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, value)
    }
}

pub type ParserResult = Result<XQuestParserState, XQuestParserError>;

/**
Attribute lookup by name over whatever the tokenizer hands the parser
*/
pub trait AttributeSource {
    fn attribute_value(&self, name: &str) -> Result<Option<String>, XQuestParserError>;

    /// Every attribute as `(name, value)` in document order
    fn attribute_pairs(&self) -> Result<Vec<(String, String)>, XQuestParserError>;
}

impl AttributeSource for BytesStart<'_> {
    fn attribute_value(&self, name: &str) -> Result<Option<String>, XQuestParserError> {
        match self.try_get_attribute(name) {
            Ok(Some(attr)) => match attr.unescape_value() {
                Ok(value) => Ok(Some(value.to_string())),
                Err(err) => Err(XQuestParserError::AttributeError(name.to_string(), err)),
            },
            Ok(None) => Ok(None),
            Err(err) => Err(XQuestParserError::AttributeError(name.to_string(), err)),
        }
    }

    fn attribute_pairs(&self) -> Result<Vec<(String, String)>, XQuestParserError> {
        let mut pairs = Vec::new();
        for attr_parsed in self.attributes() {
            match attr_parsed {
                Ok(attr) => {
                    let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
                    match attr.unescape_value() {
                        Ok(value) => pairs.push((key, value.to_string())),
                        Err(err) => return Err(XQuestParserError::AttributeError(key, err)),
                    }
                }
                Err(err) => {
                    return Err(XQuestParserError::AttributeError(
                        String::from_utf8_lossy(self.name().as_ref()).to_string(),
                        err.into(),
                    ))
                }
            }
        }
        Ok(pairs)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> AttributeSource for [(K, V)] {
    fn attribute_value(&self, name: &str) -> Result<Option<String>, XQuestParserError> {
        Ok(self
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_ref().to_string()))
    }

    fn attribute_pairs(&self) -> Result<Vec<(String, String)>, XQuestParserError> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect())
    }
}

/**
Typed attribute access. A missing attribute is always an error.
*/
pub trait AttributeParse {
    fn attribute_as_string<A: AttributeSource + ?Sized>(
        attributes: &A,
        tag: XQuestTag,
        name: &str,
    ) -> Result<String, XQuestParserError> {
        attributes
            .attribute_value(name)?
            .ok_or_else(|| XQuestParserError::MissingAttribute {
                tag: tag.name().to_string(),
                attribute: name.to_string(),
            })
    }

    fn attribute_as_int<A: AttributeSource + ?Sized>(
        attributes: &A,
        tag: XQuestTag,
        name: &str,
    ) -> Result<i64, XQuestParserError> {
        let value = Self::attribute_as_string(attributes, tag, name)?;
        value
            .trim()
            .parse()
            .map_err(|_| XQuestParserError::InvalidAttributeValue {
                tag: tag.name().to_string(),
                attribute: name.to_string(),
                value,
            })
    }

    fn attribute_as_double<A: AttributeSource + ?Sized>(
        attributes: &A,
        tag: XQuestTag,
        name: &str,
    ) -> Result<f64, XQuestParserError> {
        let value = Self::attribute_as_string(attributes, tag, name)?;
        value
            .trim()
            .parse()
            .map_err(|_| XQuestParserError::InvalidAttributeValue {
                tag: tag.name().to_string(),
                attribute: name.to_string(),
                value,
            })
    }
}

/**
Callback entry points the tokenizer drives in document order
*/
pub trait XQuestSAX {
    fn start_element<A: AttributeSource + ?Sized>(
        &mut self,
        tag: &str,
        attributes: &A,
    ) -> ParserResult;

    fn end_element(&mut self, tag: &str) -> ParserResult;

    fn text(&mut self, text: &str) -> ParserResult;
}

/// Split a `"first,second"` position attribute into exactly two integers
pub(crate) fn parse_position_pair(value: &str) -> Result<(i64, i64), XQuestParserError> {
    let malformed = || XQuestParserError::MalformedPositionList(value.to_string());
    let mut parts = value.split(',');
    let first = parts.next().ok_or_else(malformed)?;
    let second = parts.next().ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }
    let first = first.trim().parse().map_err(|_| malformed())?;
    let second = second.trim().parse().map_err(|_| malformed())?;
    Ok((first, second))
}

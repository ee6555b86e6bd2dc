use std::fs;
use std::io::{self, prelude::*, BufReader};
use std::path::Path;

use log::warn;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::meta::{EnzymeLookup, XQuestEnzymes};

use super::handler::{XQuestReaderConfig, XQuestResultHandler};
use super::reading_shared::{XQuestParserError, XQuestParserState, XQuestSAX};
use super::results::XQuestResults;

pub type Bytes = Vec<u8>;

const BUFFER_SIZE: usize = 10000;

/**
A streaming reader for xQuest cross-link result XML files, with a configurable
[`EnzymeLookup`] for resolving the enzyme the search used.

The whole document is consumed by [`XQuestResultReaderType::read`], which hands back every
retained spectrum search along with the document metadata and protein catalog.
*/
pub struct XQuestResultReaderType<R: Read, E: EnzymeLookup = XQuestEnzymes> {
    handle: BufReader<R>,
    handler: XQuestResultHandler<E>,
    buffer: Bytes,
}

/// An [`XQuestResultReaderType`] using the built-in xQuest enzyme table
pub type XQuestResultReader<R> = XQuestResultReaderType<R, XQuestEnzymes>;

impl<R: Read> XQuestResultReaderType<R, XQuestEnzymes> {
    /// Create a new [`XQuestResultReader`] with the default configuration, wrapping the
    /// [`io::Read`] handle provided with an [`io::BufReader`].
    pub fn new(file: R) -> Self {
        Self::with_config(file, XQuestReaderConfig::default())
    }

    pub fn with_config(file: R, config: XQuestReaderConfig) -> Self {
        Self::with_config_and_enzymes(file, config, XQuestEnzymes)
    }
}

impl XQuestResultReaderType<fs::File, XQuestEnzymes> {
    /// Open the file at `path` for reading with `config`
    pub fn open_path<P: AsRef<Path>>(path: P, config: XQuestReaderConfig) -> io::Result<Self> {
        let file = fs::File::open(path.as_ref())?;
        Ok(Self::with_config(file, config))
    }
}

impl<R: Read, E: EnzymeLookup> XQuestResultReaderType<R, E> {
    pub fn with_config_and_enzymes(file: R, config: XQuestReaderConfig, enzymes: E) -> Self {
        Self {
            handle: BufReader::with_capacity(BUFFER_SIZE, file),
            handler: XQuestResultHandler::with_enzymes(config, enzymes),
            buffer: Bytes::new(),
        }
    }

    pub fn config(&self) -> &XQuestReaderConfig {
        self.handler.config()
    }

    pub fn state(&self) -> XQuestParserState {
        self.handler.state()
    }

    /// Consume the document, stopping at the first error.
    ///
    /// On failure nothing read so far is returned.
    pub fn read(mut self) -> Result<XQuestResults, XQuestParserError> {
        let mut reader = Reader::from_reader(&mut self.handle);
        reader.trim_text(true);
        loop {
            let outcome = match reader.read_event_into(&mut self.buffer) {
                Ok(Event::Start(ref e)) => {
                    let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    self.handler.start_element(&tag, e)
                }
                Ok(Event::Empty(ref e)) => {
                    let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    self.handler
                        .start_element(&tag, e)
                        .and_then(|_| self.handler.end_element(&tag))
                }
                Ok(Event::End(ref e)) => {
                    let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    self.handler.end_element(&tag)
                }
                Ok(Event::Text(ref e)) => self.handler.text(&String::from_utf8_lossy(e)),
                Ok(Event::Eof) => {
                    break;
                }
                Err(err) => Err(XQuestParserError::XMLError(self.handler.state(), err)),
                _ => Ok(self.handler.state()),
            };
            outcome?;
            self.buffer.clear();
        }

        match self.handler.state() {
            XQuestParserState::ResultsDone => Ok(self.handler.into_results()),
            state => {
                warn!("Reached the end of the document in {state:?}");
                Err(XQuestParserError::IncompleteDocument(state))
            }
        }
    }
}

/// Read all results from the xQuest XML file at `path`
pub fn read_xquest_results<P: AsRef<Path>>(
    path: P,
    config: XQuestReaderConfig,
) -> io::Result<XQuestResults> {
    let reader = XQuestResultReader::<fs::File>::open_path(path, config)?;
    Ok(reader.read()?)
}

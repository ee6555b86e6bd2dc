use std::mem;

use log::{debug, error, trace};

use crate::identification::{
    keys, AccessionRegistry, CrossLinkType, PeptideEvidence, PeptideHit, PeptideIdentification,
    ProteinHit, ProteinIdentification, TargetDecoy,
};
use crate::mass_error::MassErrorType;
use crate::meta::{EnzymeLookup, SearchParameters, XQuestEnzymes, XQuestResultMeta};
use crate::params::{MetaDescribed, MetaInfo, MetaValue};

use super::reading_shared::{
    parse_position_pair, AttributeParse, AttributeSource, ParserResult, XQuestParserError,
    XQuestParserState, XQuestSAX, XQuestTag,
};
use super::results::{SpectrumSearch, XQuestResults};

/// Options controlling which records are kept and how metadata is distributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XQuestReaderConfig {
    /// Spectrum searches with fewer hits than this are dropped entirely
    pub min_n_ions_per_spectrum: usize,
    /// Copy the identification-level metadata onto the beta peptide hit as well
    pub load_to_peptide_hit: bool,
    /// Record [`XQuestResults::n_hits`] each time a spectrum search is kept
    pub track_cumulative_hits: bool,
}

impl XQuestReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_n_ions_per_spectrum(mut self, min_n_ions_per_spectrum: usize) -> Self {
        self.min_n_ions_per_spectrum = min_n_ions_per_spectrum;
        self
    }

    pub fn with_load_to_peptide_hit(mut self, load_to_peptide_hit: bool) -> Self {
        self.load_to_peptide_hit = load_to_peptide_hit;
        self
    }

    pub fn with_track_cumulative_hits(mut self, track_cumulative_hits: bool) -> Self {
        self.track_cumulative_hits = track_cumulative_hits;
        self
    }
}

/// Remove the first occurrence of `pattern` from `text`
fn remove_substring(text: &str, pattern: &str) -> String {
    text.replacen(pattern, "", 1)
}

fn split_accessions(accessions: &str) -> impl Iterator<Item = &str> {
    accessions.split(',').filter(|a| !a.is_empty())
}

/// The intra/inter-protein marker key for every pairing of the two sides'
/// accessions, with `reverse_` and `decoy_` prefixes stripped, in pair order.
fn protein_relationship_markers(prot1: &str, prot2: &str) -> Vec<&'static str> {
    let prot1 = remove_substring(&remove_substring(prot1, "reverse_"), "decoy_");
    let prot2 = remove_substring(&remove_substring(prot2, "reverse_"), "decoy_");
    let mut markers = Vec::new();
    for a in split_accessions(&prot1) {
        for b in split_accessions(&prot2) {
            markers.push(if a == b {
                keys::IS_INTRAPROTEIN
            } else {
                keys::IS_INTERPROTEIN
            });
        }
    }
    markers
}

/**
A SAX-style handler that rebuilds cross-link identifications from the start/end events of
an xQuest result document.

Open `search_hit` elements are finalized immediately into [`PeptideIdentification`]s and
buffered until their `spectrum_search` closes, at which point the group is either kept or
dropped according to [`XQuestReaderConfig::min_n_ions_per_spectrum`]. Protein accessions are
collected into a single [`ProteinIdentification`] without duplicates.

Errors are not recovered from. Once a callback fails the handler should be discarded along
with whatever it has buffered.
*/
#[derive(Debug)]
pub struct XQuestResultHandler<E: EnzymeLookup = XQuestEnzymes> {
    config: XQuestReaderConfig,
    enzymes: E,
    state: XQuestParserState,
    current_meta: Option<XQuestResultMeta>,
    current_spectrum_search: SpectrumSearch,
    registry: AccessionRegistry,
    results: XQuestResults,
}

impl Default for XQuestResultHandler<XQuestEnzymes> {
    fn default() -> Self {
        Self::new(XQuestReaderConfig::default())
    }
}

impl XQuestResultHandler<XQuestEnzymes> {
    pub fn new(config: XQuestReaderConfig) -> Self {
        Self::with_enzymes(config, XQuestEnzymes)
    }
}

impl<E: EnzymeLookup> AttributeParse for XQuestResultHandler<E> {}

impl<E: EnzymeLookup> XQuestResultHandler<E> {
    pub fn with_enzymes(config: XQuestReaderConfig, enzymes: E) -> Self {
        Self {
            config,
            enzymes,
            state: XQuestParserState::Start,
            current_meta: None,
            current_spectrum_search: SpectrumSearch::new(),
            registry: AccessionRegistry::new(),
            results: XQuestResults::new(config.track_cumulative_hits),
        }
    }

    pub fn state(&self) -> XQuestParserState {
        self.state
    }

    pub fn config(&self) -> &XQuestReaderConfig {
        &self.config
    }

    /// The results accumulated so far
    pub fn results(&self) -> &XQuestResults {
        &self.results
    }

    /// The identifications buffered for the currently open spectrum search
    pub fn current_spectrum_search(&self) -> &[PeptideIdentification] {
        &self.current_spectrum_search
    }

    /// Hand over the accumulated results. Anything still buffered for an
    /// unclosed spectrum search is dropped.
    pub fn into_results(self) -> XQuestResults {
        self.results
    }

    fn protein_identification_mut(&mut self) -> &mut ProteinIdentification {
        if self.results.protein_identifications.is_empty() {
            self.results
                .protein_identifications
                .push(ProteinIdentification::default());
        }
        &mut self.results.protein_identifications[0]
    }

    fn handle_results_start<A: AttributeSource + ?Sized>(
        &mut self,
        attributes: &A,
    ) -> Result<(), XQuestParserError> {
        const TAG: XQuestTag = XQuestTag::Results;
        let enzyme_code = Self::attribute_as_int(attributes, TAG, "enzyme_num")?;
        let digestion_enzyme = self
            .enzymes
            .enzyme_by_code(enzyme_code)
            .ok_or(XQuestParserError::UnknownEnzyme(enzyme_code))?;

        let search_parameters = SearchParameters {
            digestion_enzyme,
            missed_cleavages: Self::attribute_as_int(attributes, TAG, "missed_cleavages")?,
            db: Self::attribute_as_string(attributes, TAG, "database")?,
            precursor_mass_tolerance: Self::attribute_as_double(attributes, TAG, "ms1tolerance")?,
            precursor_mass_tolerance_unit: MassErrorType::from_measure(
                &Self::attribute_as_string(attributes, TAG, "tolerancemeasure")?,
            ),
        };

        let mut meta = MetaInfo::new();
        for (key, value) in attributes.attribute_pairs()? {
            meta.insert(key, MetaValue::String(value));
        }

        self.protein_identification_mut().search_parameters = Some(search_parameters.clone());
        self.current_meta = Some(XQuestResultMeta::new(search_parameters, meta));
        Ok(())
    }

    /// Read the metadata shared by the identification and its peptide hits
    fn read_hit_metadata<A: AttributeSource + ?Sized>(
        attributes: &A,
    ) -> Result<MetaInfo, XQuestParserError> {
        const TAG: XQuestTag = XQuestTag::SearchHit;
        let mut meta = MetaInfo::new();
        meta.insert(
            keys::ID.into(),
            Self::attribute_as_string(attributes, TAG, "id")?.into(),
        );
        meta.insert(
            keys::XLINKER_MASS.into(),
            Self::attribute_as_double(attributes, TAG, "xlinkermass")?.into(),
        );
        meta.insert(
            keys::WTIC.into(),
            Self::attribute_as_double(attributes, TAG, "wTIC")?.into(),
        );
        meta.insert(
            keys::PERC_TIC.into(),
            Self::attribute_as_double(attributes, TAG, "TIC")?.into(),
        );
        meta.insert(
            keys::XL_RANK.into(),
            Self::attribute_as_int(attributes, TAG, "search_hit_rank")?.into(),
        );
        meta.insert(
            keys::INTSUM.into(),
            (Self::attribute_as_double(attributes, TAG, "intsum")? / 100.0).into(),
        );
        meta.insert(
            keys::MATCH_ODDS.into(),
            Self::attribute_as_double(attributes, TAG, "match_odds")?.into(),
        );
        meta.insert(
            keys::SCORE.into(),
            Self::attribute_as_double(attributes, TAG, "score")?.into(),
        );
        meta.insert(
            keys::ERROR_REL.into(),
            Self::attribute_as_double(attributes, TAG, "error_rel")?.into(),
        );
        meta.insert(
            keys::STRUCTURE.into(),
            Self::attribute_as_string(attributes, TAG, "structure")?.into(),
        );
        Ok(meta)
    }

    /// One evidence per accession in `accessions`, registering any accession not seen before
    /// in the protein catalog.
    fn build_evidences(&mut self, accessions: &str) -> Vec<PeptideEvidence> {
        let mut evidences = Vec::new();
        for accession in split_accessions(accessions) {
            let (is_new, target_decoy) = self.registry.register_if_absent(accession);
            if is_new {
                self.protein_identification_mut().push(ProteinHit {
                    accession: accession.to_string(),
                    target_decoy,
                });
            }
            evidences.push(PeptideEvidence::unlocated(accession));
        }
        evidences
    }

    fn handle_search_hit<A: AttributeSource + ?Sized>(
        &mut self,
        attributes: &A,
    ) -> Result<(), XQuestParserError> {
        const TAG: XQuestTag = XQuestTag::SearchHit;
        self.results.n_hits += 1;

        let mut identification = PeptideIdentification::default();
        let mut alpha = PeptideHit::default();

        let xlink_type = Self::attribute_as_string(attributes, TAG, "type")?;
        let prot1 = Self::attribute_as_string(attributes, TAG, "prot1")?;

        let alpha_target_decoy = TargetDecoy::from_accession(&prot1);
        identification.set_meta_value(keys::TARGET_DECOY, alpha_target_decoy.as_str());
        alpha.set_meta_value(keys::TARGET_DECOY, alpha_target_decoy.as_str());

        let hit_meta = Self::read_hit_metadata(attributes)?;
        identification.extend_meta(&hit_meta);
        alpha.extend_meta(&hit_meta);

        alpha.set_meta_value(
            keys::NUM_MATCHED_IONS,
            Self::attribute_as_int(attributes, TAG, "num_of_matched_ions_alpha")?,
        );
        alpha.set_meta_value(keys::PROT, prot1.as_str());
        alpha.peptide_evidences = self.build_evidences(&prot1);

        let cross_link_type: CrossLinkType = match xlink_type.parse() {
            Ok(t) => t,
            Err(_) => {
                error!("Unsupported cross-link type: {xlink_type}");
                return Err(XQuestParserError::UnsupportedCrosslinkType(xlink_type));
            }
        };

        let beta = match cross_link_type {
            CrossLinkType::CrossLink => {
                let mut beta = PeptideHit::default();
                if self.config.load_to_peptide_hit {
                    beta.extend_meta(&hit_meta);
                }
                let xl_type = cross_link_type.xl_type();
                identification.set_meta_value(keys::XL_TYPE, xl_type);
                alpha.set_meta_value(keys::XL_TYPE, xl_type);
                beta.set_meta_value(keys::XL_TYPE, xl_type);

                let (first, second) = parse_position_pair(&Self::attribute_as_string(
                    attributes,
                    TAG,
                    "xlinkposition",
                )?)?;
                alpha.set_meta_value(keys::XL_POS, first);
                beta.set_meta_value(keys::XL_POS, second);

                let prot2 = Self::attribute_as_string(attributes, TAG, "prot2")?;
                let beta_target_decoy = TargetDecoy::from_accession(&prot2);
                if beta_target_decoy.is_decoy() {
                    identification.set_meta_value(keys::TARGET_DECOY, beta_target_decoy.as_str());
                }
                beta.set_meta_value(keys::TARGET_DECOY, beta_target_decoy.as_str());

                beta.set_meta_value(
                    keys::NUM_MATCHED_IONS,
                    Self::attribute_as_int(attributes, TAG, "num_of_matched_ions_beta")?,
                );
                beta.set_meta_value(keys::PROT, prot2.as_str());
                beta.peptide_evidences = self.build_evidences(&prot2);

                for marker in protein_relationship_markers(&prot1, &prot2) {
                    identification.set_meta_value(marker, MetaValue::Empty);
                    alpha.set_meta_value(marker, MetaValue::Empty);
                    beta.set_meta_value(marker, MetaValue::Empty);
                }
                Some(beta)
            }
            CrossLinkType::LoopLink => {
                let xl_type = cross_link_type.xl_type();
                identification.set_meta_value(keys::XL_TYPE, xl_type);
                alpha.set_meta_value(keys::XL_TYPE, xl_type);

                let (first, second) = parse_position_pair(&Self::attribute_as_string(
                    attributes,
                    TAG,
                    "xlinkposition",
                )?)?;
                alpha.set_meta_value(keys::XL_POS, first);
                alpha.set_meta_value(keys::XL_POS2, second);
                None
            }
            CrossLinkType::MonoLink => {
                let xl_type = cross_link_type.xl_type();
                identification.set_meta_value(keys::XL_TYPE, xl_type);
                alpha.set_meta_value(keys::XL_TYPE, xl_type);

                alpha.set_meta_value(
                    keys::XL_POS,
                    Self::attribute_as_int(attributes, TAG, "xlinkposition")?,
                );
                None
            }
        };

        identification.hits.push(alpha);
        if let Some(beta) = beta {
            identification.hits.push(beta);
        }
        self.current_spectrum_search.push(identification);
        Ok(())
    }

    fn handle_spectrum_search_end(&mut self) {
        let n_buffered = self.current_spectrum_search.len();
        if n_buffered >= self.config.min_n_ions_per_spectrum {
            let group = mem::take(&mut self.current_spectrum_search);
            self.results.spectrum_searches.push(group);
            let n_hits = self.results.n_hits;
            if let Some(cumulative_hits) = self.results.cumulative_hits.as_mut() {
                cumulative_hits.push(n_hits);
            }
            debug!("Retained spectrum search with {n_buffered} hits");
        } else {
            debug!(
                "Discarded spectrum search with {n_buffered} hits, fewer than {}",
                self.config.min_n_ions_per_spectrum
            );
        }
        self.current_spectrum_search.clear();
    }

    fn handle_results_end(&mut self) {
        let meta = self.current_meta.take().unwrap_or_default();
        self.results.metas.push(meta);
        debug!(
            "Finished results with {} hits in {} retained spectrum searches",
            self.results.n_hits,
            self.results.spectrum_searches.len()
        );
    }

    fn fail(&mut self, error: XQuestParserError) -> XQuestParserError {
        self.state = XQuestParserState::ParserError;
        error
    }
}

impl<E: EnzymeLookup> XQuestSAX for XQuestResultHandler<E> {
    fn start_element<A: AttributeSource + ?Sized>(
        &mut self,
        tag: &str,
        attributes: &A,
    ) -> ParserResult {
        let outcome = match XQuestTag::from_name(tag) {
            XQuestTag::Results => self
                .handle_results_start(attributes)
                .map(|()| XQuestParserState::Results),
            XQuestTag::SpectrumSearch => Ok(XQuestParserState::SpectrumSearch),
            XQuestTag::SearchHit => self
                .handle_search_hit(attributes)
                .map(|()| XQuestParserState::SearchHit),
            XQuestTag::Unknown => {
                trace!("Ignoring start of {tag}");
                Ok(self.state)
            }
        };
        match outcome {
            Ok(state) => {
                self.state = state;
                Ok(state)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn end_element(&mut self, tag: &str) -> ParserResult {
        self.state = match XQuestTag::from_name(tag) {
            XQuestTag::Results => {
                self.handle_results_end();
                XQuestParserState::ResultsDone
            }
            XQuestTag::SpectrumSearch => {
                self.handle_spectrum_search_end();
                XQuestParserState::SpectrumSearchDone
            }
            XQuestTag::SearchHit => XQuestParserState::SpectrumSearch,
            XQuestTag::Unknown => {
                trace!("Ignoring end of {tag}");
                self.state
            }
        };
        Ok(self.state)
    }

    fn text(&mut self, _text: &str) -> ParserResult {
        Ok(self.state)
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;
    use crate::meta::Enzyme;

    type Attrs = Vec<(&'static str, String)>;

    fn results_attrs() -> Attrs {
        vec![
            ("enzyme_num", "1".into()),
            ("missed_cleavages", "2".into()),
            ("database", "/data/db/BSA_plus_decoy.fasta".into()),
            ("ms1tolerance", "10".into()),
            ("tolerancemeasure", "ppm".into()),
            ("xlinkername", "DSS".into()),
        ]
    }

    fn hit_attrs(xl_type: &str, prot1: &str, prot2: &str, position: &str) -> Attrs {
        let mut attrs: Attrs = vec![
            ("type", xl_type.into()),
            ("prot1", prot1.into()),
            ("id", "LKECCDKPLLEK-HLVDEPQNLIK-a7-b1".into()),
            ("xlinkermass", "138.0680796".into()),
            ("wTIC", "0.253".into()),
            ("TIC", "0.1841".into()),
            ("search_hit_rank", "1".into()),
            ("intsum", "250".into()),
            ("match_odds", "21.64".into()),
            ("score", "34.12".into()),
            ("error_rel", "-1.8".into()),
            ("structure", "LKECCDKPLLEK-HLVDEPQNLIK".into()),
            ("xlinkposition", position.into()),
            ("num_of_matched_ions_alpha", "14".into()),
        ];
        if xl_type == "xlink" {
            attrs.push(("prot2", prot2.into()));
            attrs.push(("num_of_matched_ions_beta", "9".into()));
        }
        attrs
    }

    fn drive<E: EnzymeLookup>(
        handler: &mut XQuestResultHandler<E>,
        groups: &[Vec<Attrs>],
    ) -> Result<(), XQuestParserError> {
        handler.start_element("xquest_results", results_attrs().as_slice())?;
        for group in groups {
            handler.start_element("spectrum_search", Attrs::new().as_slice())?;
            for hit in group {
                handler.start_element("search_hit", hit.as_slice())?;
                handler.end_element("search_hit")?;
            }
            handler.end_element("spectrum_search")?;
        }
        handler.end_element("xquest_results")?;
        Ok(())
    }

    fn two_xlink_document() -> Vec<Vec<Attrs>> {
        vec![vec![
            hit_attrs("xlink", "P02769", "P02769", "5,12"),
            hit_attrs("xlink", "P02769,P68082", "decoy_P00004", "3,1"),
        ]]
    }

    #[test_log::test]
    fn test_round_trip_two_xlinks() {
        let mut handler =
            XQuestResultHandler::new(XQuestReaderConfig::new().with_min_n_ions_per_spectrum(1));
        drive(&mut handler, &two_xlink_document()).unwrap();
        assert_eq!(handler.state(), XQuestParserState::ResultsDone);
        let results = handler.into_results();

        assert_eq!(results.metas.len(), 1);
        let meta = &results.metas[0];
        assert_eq!(meta.search_parameters.digestion_enzyme.name, "trypsin");
        assert_eq!(meta.search_parameters.missed_cleavages, 2);
        assert!(meta.search_parameters.precursor_mass_tolerance_ppm());
        assert_eq!(meta.search_parameters.precursor_mass_tolerance, 10.0);
        assert_eq!(
            meta.get_meta_value("xlinkername").and_then(|v| v.as_str()),
            Some("DSS")
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results.spectrum_searches[0].len(), 2);
        assert_eq!(results.n_hits, 2);
        assert!(results.cumulative_hits.is_none());

        assert_eq!(results.protein_identifications.len(), 1);
        assert_eq!(
            results.search_parameters().unwrap().db,
            "/data/db/BSA_plus_decoy.fasta"
        );
        let accessions: Vec<_> = results.proteins().iter().map(|p| p.accession.as_str()).collect();
        assert_eq!(accessions, ["P02769", "P68082", "decoy_P00004"]);
        assert!(results.proteins()[2].is_decoy());
        assert!(!results.proteins()[0].is_decoy());
    }

    #[test_log::test]
    fn test_xlink_hit() {
        let mut handler = XQuestResultHandler::default();
        drive(&mut handler, &two_xlink_document()).unwrap();
        let results = handler.into_results();
        let ident = &results.spectrum_searches[0][0];

        assert_eq!(ident.hits.len(), 2);
        assert_eq!(ident.cross_link_type(), Some(CrossLinkType::CrossLink));
        let alpha = ident.alpha().unwrap();
        let beta = ident.beta().unwrap();
        assert_eq!(alpha.xl_pos(), Some(5));
        assert_eq!(beta.xl_pos(), Some(12));
        assert_eq!(alpha.num_matched_ions(), Some(14));
        assert_eq!(beta.num_matched_ions(), Some(9));
        assert_eq!(alpha.protein_accessions(), Some("P02769"));
        assert_eq!(
            beta.get_meta_value(keys::XL_TYPE).and_then(|v| v.as_str()),
            Some("cross-link")
        );

        assert_eq!(
            ident.get_meta_value(keys::INTSUM).and_then(|v| v.as_float()),
            Some(2.5)
        );
        assert_eq!(ident.rank(), Some(1));
        assert_eq!(ident.score(), Some(34.12));
        assert_eq!(
            ident.get_meta_value(keys::STRUCTURE).and_then(|v| v.as_str()),
            Some("LKECCDKPLLEK-HLVDEPQNLIK")
        );

        assert!(ident.is_intraprotein());
        assert!(alpha.meta_value_exists(keys::IS_INTRAPROTEIN));
        assert!(beta.meta_value_exists(keys::IS_INTRAPROTEIN));
        assert!(!ident.is_interprotein());
        assert_eq!(ident.target_decoy(), Some(TargetDecoy::Target));

        // Identification metadata always reaches alpha, but only reaches beta when asked
        assert!(alpha.meta_value_exists(keys::SCORE));
        assert!(!beta.meta_value_exists(keys::SCORE));
    }

    #[test_log::test]
    fn test_decoy_beta_takes_precedence() {
        let mut handler = XQuestResultHandler::default();
        drive(&mut handler, &two_xlink_document()).unwrap();
        let results = handler.into_results();
        let ident = &results.spectrum_searches[0][1];

        assert_eq!(ident.alpha().unwrap().target_decoy(), Some(TargetDecoy::Target));
        assert_eq!(ident.beta().unwrap().target_decoy(), Some(TargetDecoy::Decoy));
        assert!(ident.is_decoy());
        assert!(ident.is_interprotein());

        let evidences: Vec<_> = ident.alpha().unwrap().accessions().collect();
        assert_eq!(evidences, ["P02769", "P68082"]);
        for ev in ident.alpha().unwrap().peptide_evidences.iter() {
            assert_eq!(ev.start, PeptideEvidence::UNKNOWN_POSITION);
            assert_eq!(ev.end, PeptideEvidence::UNKNOWN_POSITION);
            assert_eq!(ev.aa_before, PeptideEvidence::UNKNOWN_AA);
        }

        let mut handler = XQuestResultHandler::default();
        drive(
            &mut handler,
            &[vec![hit_attrs("xlink", "decoy_P1", "P2", "1,2")]],
        )
        .unwrap();
        let ident = &handler.results().spectrum_searches[0][0];
        assert!(ident.is_decoy());
        assert_eq!(ident.beta().unwrap().target_decoy(), Some(TargetDecoy::Target));
    }

    #[test_log::test]
    fn test_load_to_peptide_hit() {
        let config = XQuestReaderConfig::new().with_load_to_peptide_hit(true);
        let mut handler = XQuestResultHandler::new(config);
        drive(&mut handler, &two_xlink_document()).unwrap();
        let ident = &handler.results().spectrum_searches[0][0];
        let beta = ident.beta().unwrap();
        assert_eq!(
            beta.get_meta_value(keys::SCORE).and_then(|v| v.as_float()),
            Some(34.12)
        );
        assert_eq!(
            beta.get_meta_value(keys::ID),
            ident.get_meta_value(keys::ID)
        );
    }

    #[test_log::test]
    fn test_loop_link_hit() {
        let mut handler = XQuestResultHandler::default();
        drive(
            &mut handler,
            &[vec![hit_attrs("intralink", "P02769", "", "4,11")]],
        )
        .unwrap();
        let ident = &handler.results().spectrum_searches[0][0];
        assert_eq!(ident.hits.len(), 1);
        assert_eq!(ident.cross_link_type(), Some(CrossLinkType::LoopLink));
        let alpha = ident.alpha().unwrap();
        assert_eq!(alpha.xl_pos(), Some(4));
        assert_eq!(alpha.xl_pos2(), Some(11));
        assert!(!ident.is_intraprotein() && !ident.is_interprotein());
    }

    #[test_log::test]
    fn test_mono_link_hit() {
        let mut handler = XQuestResultHandler::default();
        drive(
            &mut handler,
            &[vec![hit_attrs("monolink", "reverse_decoy_P1", "", "7")]],
        )
        .unwrap();
        let ident = &handler.results().spectrum_searches[0][0];
        assert_eq!(ident.hits.len(), 1);
        assert_eq!(ident.cross_link_type(), Some(CrossLinkType::MonoLink));
        let alpha = ident.alpha().unwrap();
        assert_eq!(alpha.xl_pos(), Some(7));
        assert_eq!(alpha.xl_pos2(), None);
        assert!(ident.is_decoy());

        let mut handler = XQuestResultHandler::default();
        let err = drive(
            &mut handler,
            &[vec![hit_attrs("monolink", "P1", "", "7,8")]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            XQuestParserError::InvalidAttributeValue { attribute, .. } if attribute == "xlinkposition"
        ));
    }

    #[test_log::test]
    fn test_unsupported_type() {
        let mut handler = XQuestResultHandler::default();
        handler
            .start_element("xquest_results", results_attrs().as_slice())
            .unwrap();
        handler
            .start_element("spectrum_search", Attrs::new().as_slice())
            .unwrap();
        let err = handler
            .start_element("search_hit", hit_attrs("foo", "P1", "", "1").as_slice())
            .unwrap_err();
        assert!(matches!(err, XQuestParserError::UnsupportedCrosslinkType(ref t) if t == "foo"));
        assert!(handler.current_spectrum_search().is_empty());
        assert_eq!(handler.state(), XQuestParserState::ParserError);
    }

    #[test_log::test]
    fn test_missing_score() {
        let mut handler = XQuestResultHandler::default();
        handler
            .start_element("xquest_results", results_attrs().as_slice())
            .unwrap();
        handler
            .start_element("spectrum_search", Attrs::new().as_slice())
            .unwrap();
        let mut attrs = hit_attrs("xlink", "P1", "P2", "1,2");
        attrs.retain(|(k, _)| *k != "score");
        let err = handler
            .start_element("search_hit", attrs.as_slice())
            .unwrap_err();
        match err {
            XQuestParserError::MissingAttribute { tag, attribute } => {
                assert_eq!(tag, "search_hit");
                assert_eq!(attribute, "score");
            }
            other => panic!("Expected a missing attribute, got {other:?}"),
        }
        assert!(handler.current_spectrum_search().is_empty());
    }

    #[test_log::test]
    fn test_malformed_position_pair() {
        let mut handler = XQuestResultHandler::default();
        let err = drive(&mut handler, &[vec![hit_attrs("xlink", "P1", "P2", "5")]]).unwrap_err();
        assert!(matches!(err, XQuestParserError::MalformedPositionList(ref v) if v == "5"));

        let mut handler = XQuestResultHandler::default();
        let err =
            drive(&mut handler, &[vec![hit_attrs("intralink", "P1", "", "5,6,7")]]).unwrap_err();
        assert!(matches!(err, XQuestParserError::MalformedPositionList(_)));
    }

    #[test_log::test]
    fn test_min_ions_policy() {
        let groups = vec![
            vec![hit_attrs("monolink", "P1", "", "1")],
            vec![
                hit_attrs("monolink", "P2", "", "1"),
                hit_attrs("xlink", "P2", "P3", "1,2"),
                hit_attrs("intralink", "P4", "", "1,2"),
            ],
            vec![],
        ];

        for (minimum, expected) in [(0, vec![1usize, 3, 0]), (1, vec![1, 3]), (2, vec![3]), (4, vec![])] {
            let config = XQuestReaderConfig::new()
                .with_min_n_ions_per_spectrum(minimum)
                .with_track_cumulative_hits(true);
            let mut handler = XQuestResultHandler::new(config);
            drive(&mut handler, &groups).unwrap();
            let results = handler.into_results();
            let sizes: Vec<_> = results.spectrum_searches.iter().map(|s| s.len()).collect();
            assert_eq!(sizes, expected, "minimum = {minimum}");
            assert!(results.len() <= groups.len());
            assert_eq!(results.n_hits, 4);

            let expected_cumulative: Vec<usize> = match minimum {
                0 => vec![1, 4, 4],
                1 => vec![1, 4],
                2 => vec![4],
                _ => vec![],
            };
            assert_eq!(results.cumulative_hits, Some(expected_cumulative));
            // Proteins are registered whether or not their group survives
            assert_eq!(results.proteins().len(), 4);
        }
    }

    #[test_log::test]
    fn test_accession_deduplication() {
        let mut handler = XQuestResultHandler::default();
        drive(
            &mut handler,
            &[
                vec![hit_attrs("xlink", "P1,P2", "P1", "1,2")],
                vec![
                    hit_attrs("monolink", "P2", "", "3"),
                    hit_attrs("xlink", "decoy", "P1", "1,2"),
                ],
            ],
        )
        .unwrap();
        let results = handler.into_results();
        let accessions: Vec<_> = results.proteins().iter().map(|p| p.accession.as_str()).collect();
        assert_eq!(accessions, ["P1", "P2", "decoy"]);
        assert_eq!(
            results.proteins().iter().filter(|p| p.accession == "P1").count(),
            1
        );
        assert!(results.proteins()[2].is_decoy());

        let ident = &results.spectrum_searches[0][0];
        assert_eq!(ident.alpha().unwrap().peptide_evidences.len(), 2);
        assert_eq!(ident.beta().unwrap().peptide_evidences.len(), 1);
    }

    #[test]
    fn test_protein_relationship_markers() {
        assert_eq!(
            protein_relationship_markers("P1", "P1"),
            vec![keys::IS_INTRAPROTEIN]
        );
        assert_eq!(
            protein_relationship_markers("decoy_P1", "reverse_P1"),
            vec![keys::IS_INTRAPROTEIN]
        );
        assert_eq!(
            protein_relationship_markers("P1,P2", "P2"),
            vec![keys::IS_INTERPROTEIN, keys::IS_INTRAPROTEIN]
        );
        // Only the first prefix of each kind is stripped
        assert_eq!(
            protein_relationship_markers("decoy_P1,decoy_P2", "P1,P2"),
            vec![
                keys::IS_INTRAPROTEIN,
                keys::IS_INTERPROTEIN,
                keys::IS_INTERPROTEIN,
                keys::IS_INTERPROTEIN
            ]
        );
    }

    #[test_log::test]
    fn test_relationship_markers_overwrite_per_pair() {
        let mut handler = XQuestResultHandler::default();
        drive(
            &mut handler,
            &[vec![
                hit_attrs("xlink", "P1,P2", "P2", "1,2"),
                hit_attrs("xlink", "P1,P1", "P1", "1,2"),
            ]],
        )
        .unwrap();
        let results = handler.into_results();

        // (P1, P2) sets the inter marker, (P2, P2) the intra marker; neither replaces the other
        let mixed = &results.spectrum_searches[0][0];
        assert!(mixed.is_intraprotein());
        assert!(mixed.is_interprotein());
        for hit in &mixed.hits {
            assert!(hit.meta_value_exists(keys::IS_INTRAPROTEIN));
            assert!(hit.meta_value_exists(keys::IS_INTERPROTEIN));
        }
        assert_eq!(
            mixed.meta().keys().filter(|k| *k == keys::IS_INTRAPROTEIN).count(),
            1
        );

        // Repeated pairs of the same kind write the same key once
        let same = &results.spectrum_searches[0][1];
        assert!(same.is_intraprotein());
        assert!(!same.is_interprotein());
        assert!(same
            .get_meta_value(keys::IS_INTRAPROTEIN)
            .unwrap()
            .is_empty());
    }

    #[test_log::test]
    fn test_unknown_tags_and_text() {
        let mut handler = XQuestResultHandler::default();
        handler
            .start_element("xquest_results", results_attrs().as_slice())
            .unwrap();
        let state = handler
            .start_element("xquest_spectrum", Attrs::new().as_slice())
            .unwrap();
        assert_eq!(state, XQuestParserState::Results);
        assert_eq!(handler.text("ignored").unwrap(), XQuestParserState::Results);
        assert_eq!(
            handler.end_element("xquest_spectrum").unwrap(),
            XQuestParserState::Results
        );
        handler.end_element("xquest_results").unwrap();
        assert_eq!(handler.results().metas.len(), 1);
        assert!(handler.results().is_empty());
    }

    #[test_log::test]
    fn test_enzyme_lookup() {
        let mut enzymes: HashMap<i64, Enzyme> = HashMap::new();
        enzymes.insert(1, Enzyme::new("Trypsin/P", Some("(?<=[KR])")));
        let mut handler = XQuestResultHandler::with_enzymes(XQuestReaderConfig::default(), enzymes);
        handler
            .start_element("xquest_results", results_attrs().as_slice())
            .unwrap();
        handler.end_element("xquest_results").unwrap();
        assert_eq!(
            handler.results().metas[0].search_parameters.digestion_enzyme.name,
            "Trypsin/P"
        );

        let mut attrs = results_attrs();
        attrs[0].1 = "99".into();
        let mut handler = XQuestResultHandler::default();
        let err = handler
            .start_element("xquest_results", attrs.as_slice())
            .unwrap_err();
        assert!(matches!(err, XQuestParserError::UnknownEnzyme(99)));
    }
}

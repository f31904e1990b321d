use std::collections::HashSet;

use regex::Regex;
use sim_types::{Delay, Pair, SimulationDocument, WriteReport};
use tracing::warn;

use crate::error::{StoreError, StoreResult};

/// Import validation shared by every store backend.
///
/// Turns an incoming document into the document that will actually be
/// stored plus the warnings describing what was dropped or suspicious.
/// Individual bad pairs never fail the import; only a capacity overflow
/// does.
#[derive(Clone, Debug, Default)]
pub struct Importer {
    max_pairs: Option<usize>,
}

impl Importer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_pairs(max_pairs: usize) -> Self {
        Self { max_pairs: Some(max_pairs) }
    }

    pub fn max_pairs(&self) -> Option<usize> {
        self.max_pairs
    }

    pub fn prepare(
        &self,
        document: SimulationDocument,
    ) -> StoreResult<(SimulationDocument, WriteReport)> {
        let mut report = WriteReport::clean();
        let SimulationDocument { mut data, meta } = document;

        let mut seen_ids = HashSet::new();
        let mut pairs = Vec::with_capacity(data.pairs.len());
        for (index, pair) in data.pairs.into_iter().enumerate() {
            if !(100..=599).contains(&pair.response.status) {
                report.warn(format!(
                    "pair {index} skipped: response status {} is not a valid HTTP status",
                    pair.response.status
                ));
                continue;
            }
            if pair.is_managed() && !seen_ids.insert(pair.id.clone()) {
                report.warn(format!(
                    "pair {index} skipped: id {:?} is already used by an earlier pair",
                    pair.id
                ));
                continue;
            }
            if let Some(problem) = content_length_problem(&pair) {
                report.warn(format!("pair {index}: {problem}"));
            }
            pairs.push(pair);
        }

        if let Some(max) = self.max_pairs {
            if pairs.len() > max {
                return Err(StoreError::CapacityExceeded { pairs: pairs.len(), max });
            }
        }

        let delays = std::mem::take(&mut data.global_actions.delays);
        data.global_actions.delays = delays
            .into_iter()
            .enumerate()
            .filter_map(|(index, delay)| match check_delay(&delay) {
                Ok(()) => Some(delay),
                Err(reason) => {
                    report.warn(format!("delay {index} skipped: {reason}"));
                    None
                }
            })
            .collect();

        for warning in &report.warnings {
            warn!(%warning, "simulation import warning");
        }

        data.pairs = pairs;
        Ok((SimulationDocument { data, meta }, report))
    }
}

fn content_length_problem(pair: &Pair) -> Option<String> {
    let response = &pair.response;
    // Encoded and templated bodies are rewritten before they are sent.
    if response.encoded_body || response.templated {
        return None;
    }
    let declared = response.header("Content-Length")?;
    match declared.trim().parse::<usize>() {
        Ok(len) if len == response.body.len() => None,
        Ok(len) => Some(format!(
            "Content-Length header is {len} but the body is {} bytes",
            response.body.len()
        )),
        Err(_) => Some(format!("Content-Length header {declared:?} is not a number")),
    }
}

fn check_delay(delay: &Delay) -> Result<(), String> {
    Regex::new(&delay.url_pattern)
        .map(|_| ())
        .map_err(|e| format!("url pattern {:?} is invalid: {e}", delay.url_pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_types::{RequestMatcher, ResponseDetails};

    fn pair(id: &str, status: u16) -> Pair {
        Pair::new(RequestMatcher::default(), ResponseDetails::new(status, "body")).with_id(id)
    }

    #[test]
    fn valid_document_is_clean() {
        let doc = SimulationDocument::with_pairs(vec![pair("a", 200), pair("", 404)]);
        let (stored, report) = Importer::new().prepare(doc.clone()).unwrap();
        assert!(report.is_clean());
        assert_eq!(stored, doc);
    }

    #[test]
    fn invalid_status_is_skipped_with_warning() {
        let doc = SimulationDocument::with_pairs(vec![pair("a", 200), pair("b", 42)]);
        let (stored, report) = Importer::new().prepare(doc).unwrap();
        assert_eq!(stored.pairs().len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("pair 1 skipped"));
    }

    #[test]
    fn duplicate_id_keeps_first() {
        let mut second = pair("a", 201);
        second.response.body = "second".into();
        let doc = SimulationDocument::with_pairs(vec![pair("a", 200), second, pair("", 200), pair("", 200)]);
        let (stored, report) = Importer::new().prepare(doc).unwrap();
        assert_eq!(stored.pairs().len(), 3);
        assert_eq!(stored.pairs()[0].response.status, 200);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("\"a\""));
    }

    #[test]
    fn content_length_mismatch_warns_but_keeps_pair() {
        let mut p = pair("a", 200);
        p.response.headers.insert("Content-Length".into(), vec!["99".into()]);
        let (stored, report) = Importer::new()
            .prepare(SimulationDocument::with_pairs(vec![p]))
            .unwrap();
        assert_eq!(stored.pairs().len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("Content-Length"));
    }

    #[test]
    fn matching_content_length_is_clean() {
        let mut p = pair("a", 200);
        p.response.headers.insert("content-length".into(), vec!["4".into()]);
        let (_, report) = Importer::new()
            .prepare(SimulationDocument::with_pairs(vec![p]))
            .unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn bad_delay_pattern_is_skipped() {
        let mut doc = SimulationDocument::default();
        doc.data.global_actions.delays = vec![
            Delay { url_pattern: "(".into(), http_method: String::new(), delay: 5 },
            Delay { url_pattern: "ok".into(), http_method: "GET".into(), delay: 10 },
        ];
        let (stored, report) = Importer::new().prepare(doc).unwrap();
        assert_eq!(stored.data.global_actions.delays.len(), 1);
        assert_eq!(stored.data.global_actions.delays[0].url_pattern, "ok");
        assert!(report.warnings[0].starts_with("delay 0 skipped"));
    }

    #[test]
    fn capacity_overflow_is_a_hard_error() {
        let doc = SimulationDocument::with_pairs(vec![pair("a", 200), pair("b", 200)]);
        let err = Importer::with_max_pairs(1).prepare(doc).unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded { pairs: 2, max: 1 }));
    }

    #[test]
    fn skipped_pairs_do_not_count_towards_capacity() {
        let doc = SimulationDocument::with_pairs(vec![pair("a", 200), pair("b", 0)]);
        assert!(Importer::with_max_pairs(1).prepare(doc).is_ok());
    }
}

//! Receivers for parsed triples.

use crate::parser::event::{Flow, Pair};

/// Receives the triples of one parse.
///
/// `on_start` runs before the first triple and `on_end` after the last one,
/// also when the sink stopped the parse or reading failed halfway.
pub trait PairSink {
    fn on_start(&mut self, _source: &str) {}

    fn on_pair(&mut self, source: &str, key: &str, value: Option<&str>, depth: usize) -> Flow;

    fn on_end(&mut self, _source: &str) {}
}

impl<F> PairSink for F
where
    F: FnMut(&str, &str, Option<&str>, usize) -> Flow,
{
    fn on_pair(&mut self, source: &str, key: &str, value: Option<&str>, depth: usize) -> Flow {
        self(source, key, value, depth)
    }
}

/// Collects every triple into a vector.
#[derive(Debug, Default)]
pub struct PairCollector {
    pub pairs: Vec<Pair>,
}

impl PairSink for PairCollector {
    fn on_pair(&mut self, _source: &str, key: &str, value: Option<&str>, depth: usize) -> Flow {
        self.pairs.push(Pair::new(key, value, depth));
        Flow::Continue
    }
}

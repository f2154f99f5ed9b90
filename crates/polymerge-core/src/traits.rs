//! Traits for per-grammar runners.

use crate::codec::TransportUnit;
use crate::language::Grammar;

/// Error that can occur while merging two payloads.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error(
        "Merging {first} and {second} is not supported. Only Python and JavaScript files can be merged."
    )]
    UnsupportedPair { first: String, second: String },

    #[error("compression failed: {0}")]
    Compression(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(String),
}

/// A runner emits the code that executes one payload under its own grammar.
///
/// Everything a runner emits ends up inside text that the *other* grammar
/// also has to lex, so implementations must stay within the quoting rules
/// documented on each method.
pub trait Runner: Send + Sync {
    /// Grammar this runner targets.
    fn grammar(&self) -> Grammar;

    /// File extensions classified as this grammar (e.g., &["py"]).
    fn extensions(&self) -> &'static [&'static str];

    /// Decode-and-execute idiom for a transport unit.
    ///
    /// The result is placed between double quotes in an array literal read by
    /// both grammars, so it must contain neither `"` nor `\`.
    fn transport_idiom(&self, unit: &TransportUnit) -> String;

    /// Deferred zero-argument call that evaluates `source` from an escaped
    /// string literal. The result must fit on a single physical line.
    fn deferred_literal(&self, source: &str) -> String;
}

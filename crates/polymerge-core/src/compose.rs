//! Composers: turn a [`PayloadPair`] into one file valid in both grammars.

use crate::codec;
use crate::language::{Grammar, PayloadPair};
use crate::precedence::dispatch_rule;
use crate::registry::runner_for;
use crate::traits::MergeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How payloads are carried in the composed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Base64 payloads dispatched by the precedence selector.
    #[default]
    RawTransport,
    /// Like `RawTransport`, but each payload is zlib-compressed first.
    ///
    /// The JavaScript branch needs a runtime with `DecompressionStream`.
    CompressedTransport,
    /// Escaped, readable payloads kept apart by comment syntax.
    LiteralEmbed,
}

impl Strategy {
    /// Pick a strategy from the two user-facing flags.
    ///
    /// Literal embedding has no transport stage, so it wins over `compress`.
    pub fn select(compress: bool, literal: bool) -> Self {
        match (compress, literal) {
            (_, true) => Strategy::LiteralEmbed,
            (true, false) => Strategy::CompressedTransport,
            (false, false) => Strategy::RawTransport,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::RawTransport => "raw-transport",
            Strategy::CompressedTransport => "compressed-transport",
            Strategy::LiteralEmbed => "literal-embed",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The composed file. Opaque text, written verbatim by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedOutput(String);

impl ComposedOutput {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComposedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compose `pair` with the given strategy.
pub fn merge(pair: &PayloadPair, strategy: Strategy) -> Result<ComposedOutput, MergeError> {
    let text = match strategy {
        Strategy::RawTransport => compose_transport(pair, false)?,
        Strategy::CompressedTransport => compose_transport(pair, true)?,
        Strategy::LiteralEmbed => compose_literal(pair),
    };

    tracing::debug!(
        %strategy,
        python_bytes = pair.python().len(),
        javascript_bytes = pair.javascript().len(),
        output_bytes = text.len(),
        "composed polyglot output"
    );

    Ok(ComposedOutput(text))
}

/// `eval(["<python idiom>","<javascript idiom>"][1|0==2]);`
///
/// Both grammars evaluate the same array literal; the selector picks the
/// element whose idiom belongs to the evaluating grammar, and only that
/// string is ever executed.
pub fn compose_transport(pair: &PayloadPair, compress: bool) -> Result<String, MergeError> {
    let rule = dispatch_rule(Grammar::Python, Grammar::JavaScript).ok_or_else(|| {
        MergeError::UnsupportedPair {
            first: Grammar::Python.to_string(),
            second: Grammar::JavaScript.to_string(),
        }
    })?;

    let mut elements = Vec::with_capacity(rule.order.len());
    for grammar in rule.order {
        let unit = codec::encode(pair.get(grammar), compress)?;
        let idiom = runner_for(grammar).transport_idiom(&unit);
        debug_assert!(!idiom.contains(['"', '\\']), "{grammar} idiom breaks quoting");
        elements.push(format!("\"{idiom}\""));
    }

    Ok(format!(
        "eval([{}][{}]);\n",
        elements.join(","),
        rule.index_expr
    ))
}

/// Three physical lines:
///
/// ```text
/// 1 // 1; (lambda: exec("""<python>""", globals()))(); '''
/// ;(() => eval("<javascript>"))()
/// // '''
/// ```
///
/// JavaScript reads line 1 as `1` plus a comment; Python reads it as a floor
/// division, the deferred call, and the start of a `'''` string that swallows
/// line 2 and ends on line 3, which JavaScript reads as a comment. The leading
/// `;` on line 2 keeps JavaScript from calling the `1` of line 1.
pub fn compose_literal(pair: &PayloadPair) -> String {
    let python = runner_for(Grammar::Python).deferred_literal(&pair.text(Grammar::Python));
    let javascript =
        runner_for(Grammar::JavaScript).deferred_literal(&pair.text(Grammar::JavaScript));

    format!("1 // 1; {python}; '''\n;{javascript}\n// '''\n")
}

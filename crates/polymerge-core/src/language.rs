//! Grammar families and payload classification.

use crate::registry::runner_for_extension;
use crate::traits::MergeError;
use std::fmt;

/// One of the two grammar families a composed file must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// Python 3: `|` binds tighter than `==`.
    Python,
    /// JavaScript: `==` binds tighter than `|`.
    JavaScript,
}

impl Grammar {
    /// Language identifier (e.g., "python").
    pub fn name(self) -> &'static str {
        match self {
            Grammar::Python => "python",
            Grammar::JavaScript => "javascript",
        }
    }

    /// Classify a file extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        runner_for_extension(&ext).map(|r| r.grammar())
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw source of the two payloads, exactly one per grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPair {
    python: Vec<u8>,
    javascript: Vec<u8>,
}

impl PayloadPair {
    pub fn new(python: impl Into<Vec<u8>>, javascript: impl Into<Vec<u8>>) -> Self {
        Self {
            python: python.into(),
            javascript: javascript.into(),
        }
    }

    /// Build a pair from two inputs given in either order, classified by
    /// extension.
    pub fn classify(
        first_ext: &str,
        first: Vec<u8>,
        second_ext: &str,
        second: Vec<u8>,
    ) -> Result<Self, MergeError> {
        match (
            Grammar::from_extension(first_ext),
            Grammar::from_extension(second_ext),
        ) {
            (Some(Grammar::Python), Some(Grammar::JavaScript)) => Ok(Self::new(first, second)),
            (Some(Grammar::JavaScript), Some(Grammar::Python)) => Ok(Self::new(second, first)),
            _ => Err(MergeError::UnsupportedPair {
                first: first_ext.trim_start_matches('.').to_string(),
                second: second_ext.trim_start_matches('.').to_string(),
            }),
        }
    }

    pub fn python(&self) -> &[u8] {
        &self.python
    }

    pub fn javascript(&self) -> &[u8] {
        &self.javascript
    }

    /// Payload belonging to `grammar`.
    pub fn get(&self, grammar: Grammar) -> &[u8] {
        match grammar {
            Grammar::Python => &self.python,
            Grammar::JavaScript => &self.javascript,
        }
    }

    /// Payload belonging to `grammar` as text.
    ///
    /// Invalid UTF-8 becomes U+FFFD. Every strategy behaves this way: the
    /// literal embedding uses this method, Python transport decodes with
    /// `errors='replace'` and JavaScript transport uses `TextDecoder`, whose
    /// default is replacement.
    pub fn text(&self, grammar: Grammar) -> String {
        String::from_utf8_lossy(self.get(grammar)).into_owned()
    }
}

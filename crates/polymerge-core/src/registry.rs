//! Registry of the built-in runners.
//!
//! The set is closed: composition is only defined for the pairs listed in
//! [`crate::precedence::DISPATCH_TABLE`], so there is no runtime registration.

use crate::language::Grammar;
use crate::output::{JAVASCRIPT_RUNNER, PYTHON_RUNNER};
use crate::traits::Runner;

static RUNNERS: [&dyn Runner; 2] = [&PYTHON_RUNNER, &JAVASCRIPT_RUNNER];

/// Get the runner for a grammar.
pub fn runner_for(grammar: Grammar) -> &'static dyn Runner {
    match grammar {
        Grammar::Python => &PYTHON_RUNNER,
        Grammar::JavaScript => &JAVASCRIPT_RUNNER,
    }
}

/// Get a runner by file extension (lowercase, without the dot).
pub fn runner_for_extension(ext: &str) -> Option<&'static dyn Runner> {
    RUNNERS
        .iter()
        .find(|r| r.extensions().contains(&ext))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_lookup() {
        assert_eq!(runner_for(Grammar::Python).grammar(), Grammar::Python);
        assert_eq!(runner_for(Grammar::JavaScript).grammar(), Grammar::JavaScript);
    }

    #[test]
    fn test_extension_lookup() {
        let runner = runner_for_extension("mjs").expect("mjs extension");
        assert_eq!(runner.grammar(), Grammar::JavaScript);
        assert!(runner_for_extension("ts").is_none());
    }

    #[test]
    fn test_extensions_are_disjoint() {
        let all: Vec<_> = RUNNERS.iter().flat_map(|r| r.extensions()).collect();
        let mut dedup = all.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(all.len(), dedup.len());
    }
}

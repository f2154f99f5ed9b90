//! Python runner.
//!
//! Transport idioms use only the standard library (`base64`, `zlib`) through
//! `__import__`, so they are single expressions that need no import statement.

use crate::codec::{CompressionFlag, TransportUnit};
use crate::escape::escape_python_block;
use crate::language::Grammar;
use crate::traits::Runner;

/// Static instance of the Python runner for the registry.
pub static PYTHON_RUNNER: PythonRunner = PythonRunner;

/// Python runner implementing the Runner trait.
pub struct PythonRunner;

impl Runner for PythonRunner {
    fn grammar(&self) -> Grammar {
        Grammar::Python
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn transport_idiom(&self, unit: &TransportUnit) -> String {
        let bytes = match unit.compression {
            CompressionFlag::Raw => format!("__import__('base64').b64decode('{}')", unit.encoded),
            CompressionFlag::Deflate => format!(
                "__import__('zlib').decompress(__import__('base64').b64decode('{}'))",
                unit.encoded
            ),
        };
        // Same replacement policy as `PayloadPair::text` and `TextDecoder`.
        format!("exec({bytes}.decode(encoding='utf-8',errors='replace'))")
    }

    fn deferred_literal(&self, source: &str) -> String {
        // Executing against globals() keeps top-level definitions visible to
        // each other, as they would be in a module.
        format!(
            "(lambda: exec(\"\"\"{}\"\"\", globals()))()",
            escape_python_block(source)
        )
    }
}

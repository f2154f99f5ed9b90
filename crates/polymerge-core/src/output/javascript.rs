//! JavaScript runner.
//!
//! The compressed idiom depends on `DecompressionStream`, `Blob`, `Response`,
//! `atob` and `TextDecoder` being globals: Node.js 18+ and current browsers.
//! On older runtimes the composed file still parses but fails when the
//! JavaScript branch runs.

use crate::codec::{CompressionFlag, TransportUnit};
use crate::escape::escape_javascript_string;
use crate::language::Grammar;
use crate::traits::Runner;

/// Static instance of the JavaScript runner for the registry.
pub static JAVASCRIPT_RUNNER: JavaScriptRunner = JavaScriptRunner;

/// JavaScript runner implementing the Runner trait.
pub struct JavaScriptRunner;

/// Expression yielding the decoded bytes of a base64 literal as a `Uint8Array`.
fn bytes_of(encoded: &str) -> String {
    format!("Uint8Array.from(atob('{encoded}'),c=>c.charCodeAt(0))")
}

impl Runner for JavaScriptRunner {
    fn grammar(&self) -> Grammar {
        Grammar::JavaScript
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["js", "cjs", "mjs"]
    }

    fn transport_idiom(&self, unit: &TransportUnit) -> String {
        let bytes = bytes_of(&unit.encoded);
        match unit.compression {
            // atob alone yields Latin-1; TextDecoder restores UTF-8.
            CompressionFlag::Raw => format!("eval(new TextDecoder().decode({bytes}))"),
            // Direct eval inside the arrow, so the payload keeps the enclosing
            // module scope (`require`, `__filename`) once the stream resolves.
            CompressionFlag::Deflate => format!(
                "new Response(new Blob([{bytes}]).stream().pipeThrough(new DecompressionStream('deflate'))).text().then(s=>eval(s))"
            ),
        }
    }

    fn deferred_literal(&self, source: &str) -> String {
        format!("(() => eval(\"{}\"))()", escape_javascript_string(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;

    #[test]
    fn test_raw_idiom() {
        let unit = encode(b"console.log(\"hi\")", false).unwrap();
        assert_eq!(
            JAVASCRIPT_RUNNER.transport_idiom(&unit),
            "eval(new TextDecoder().decode(Uint8Array.from(atob('Y29uc29sZS5sb2coImhpIik='),c=>c.charCodeAt(0))))"
        );
    }

    #[test]
    fn test_deflate_idiom() {
        let unit = encode(b"console.log(1)", true).unwrap();
        let idiom = JAVASCRIPT_RUNNER.transport_idiom(&unit);
        assert!(idiom.contains("new DecompressionStream('deflate')"));
        assert!(idiom.ends_with(".then(s=>eval(s))"));
        assert!(idiom.contains(&format!("atob('{}')", unit.encoded)));
        assert!(!idiom.contains(['"', '\\']));
    }

    #[test]
    fn test_deferred_literal() {
        assert_eq!(
            JAVASCRIPT_RUNNER.deferred_literal("console.log(\"it's\")"),
            r#"(() => eval("console.log(\"it\'s\")"))()"#
        );
    }
}

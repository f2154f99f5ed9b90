//! Polyglot source composition.
//!
//! `polymerge-core` takes one Python payload and one JavaScript payload and
//! produces a single text that runs the Python payload under `python3` and
//! the JavaScript payload under `node` (or a browser), with no branch on
//! language identity at run time.
//!
//! # Architecture
//!
//! ```text
//! PayloadPair ──> Strategy ─┬─> RawTransport ────────┐
//!                           ├─> CompressedTransport ─┼─> codec ─> runners ─> eval([..][1|0==2])
//!                           └─> LiteralEmbed ────────┴─> escape ─> runners ─> comment-split lines
//! ```
//!
//! The transport strategies rely on the two grammars disagreeing about the
//! relative precedence of `|` and `==` (see [`precedence`]). Literal
//! embedding instead hides each payload on a line the other grammar reads as
//! a comment or a string.
//!
//! # Example
//!
//! ```
//! use polymerge_core::{PayloadPair, Strategy, merge};
//!
//! let pair = PayloadPair::new("print('hi')", "console.log('hi')");
//! let out = merge(&pair, Strategy::RawTransport).unwrap();
//! assert!(out.as_str().starts_with("eval(["));
//! ```
//!
//! Payloads are never parsed or validated: bytes in, text out.

pub mod codec;
pub mod compose;
pub mod escape;
pub mod language;
pub mod output;
pub mod precedence;
pub mod registry;
pub mod traits;

// Re-exports: composition
pub use compose::{ComposedOutput, Strategy, compose_literal, compose_transport, merge};

// Re-exports: data model
pub use codec::{CompressionFlag, TransportUnit};
pub use language::{Grammar, PayloadPair};

// Re-exports: traits
pub use traits::{MergeError, Runner};

// Re-exports: dispatch
pub use precedence::{DISPATCH_TABLE, DispatchRule, dispatch_rule};

// Re-exports: registry
pub use registry::{runner_for, runner_for_extension};

//! Runners - emit code that executes a payload under one grammar.

pub mod javascript;
pub mod python;

pub use javascript::{JAVASCRIPT_RUNNER, JavaScriptRunner};
pub use python::{PYTHON_RUNNER, PythonRunner};

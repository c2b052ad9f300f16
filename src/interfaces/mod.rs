//! Host-facing adapters used by the CLI: CSV invocation input and JSON-lines
//! outcome output.

pub mod csv;
pub mod jsonl;

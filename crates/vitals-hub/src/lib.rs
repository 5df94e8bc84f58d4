//! # vitals hub
//!
//! Concrete pieces behind the core traits: the Ollama chat transport and
//! the two host probes.

pub mod providers;
pub mod tools;

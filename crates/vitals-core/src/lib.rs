//! # vitals core
//!
//! Shared types, traits, and the two-turn conversation driver.
//! The hub and cli crates build on it.

pub mod agent;
pub mod config;
pub mod error;
pub mod message;
pub mod provider;
pub mod report;
pub mod tool;

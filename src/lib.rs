//! Storefront - relational query reference
//!
//! This library crate exposes configuration, the run orchestration and
//! rendering for the binary and for integration testing.

pub mod config;
pub mod render;
pub mod runner;

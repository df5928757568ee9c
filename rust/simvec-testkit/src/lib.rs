//! Test utilities and helpers for the simvec crates.
//!
//! This crate provides:
//! - Instance-tracking element types for leak and double-release detection
//! - Randomized operation sequences for model-based container tests
//!
//! # Usage
//!
//! This crate is intended for use as a dev-dependency within the simvec
//! workspace only.

pub mod ops;
pub mod tracked;

//! # Utilities Module
//!
//! Random sources shared by every game system.

pub mod rng;

pub use rng::*;

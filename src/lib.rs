//! Inkwash - e-paper ink simulation for captured PNG frames.
//!
//! This library exposes modules for integration testing.

pub mod capture;
pub mod config;
pub mod error;
pub mod present;

//! # Cardpack Server Library
//!
//! Wiring for the `cardpack` binary: command-line parsing, dependency
//! injection modules, catalog seeding and application assembly.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod di;
pub mod startup;

//! `amber-lights` library crate.
//!
//! The binary (`amber-lights`) is a thin wrapper around this library so that
//! the threshold rule and the fetch/apply sequence are testable without
//! hardware or a live price API.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod gpio;
pub mod indicator;
pub mod report;

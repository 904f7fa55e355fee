//! External data sources.

pub mod amber;

pub use amber::{AmberClient, ApiConfig, PriceSource};

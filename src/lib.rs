//! IP enrichment and risk reporting library

pub mod cli;
pub mod config;
pub mod enrich;
pub mod error;
pub mod input;
pub mod output;

pub use config::Config;
pub use error::{IpIntelError, Result};

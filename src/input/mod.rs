//! Input processing module
//! Handles input file discovery and CSV record loading

pub mod loader;

//! Output module
//! Report row structures and CSV report writing

pub mod report;
pub mod writer;

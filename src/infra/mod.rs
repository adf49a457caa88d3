pub mod config;
pub mod enrichment;
pub mod logging;

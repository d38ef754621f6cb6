// LogTally - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: app, platform, or perform any I/O directly.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod parser;
pub mod table;

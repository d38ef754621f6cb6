// LogTally - platform/mod.rs
//
// Platform abstraction layer: filesystem access and config resolution.
// Dependencies: standard library, directories crate, util.
// Must NOT depend on: core, app.

pub mod config;
pub mod fs;

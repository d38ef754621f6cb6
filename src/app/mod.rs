// LogTally - app/mod.rs
//
// Application layer: orchestration of a single run.
// Dependencies: core, platform, util.

pub mod pipeline;

// steplog - core/mod.rs
//
// Core layer: levels, timing aggregation, text layout.
// Dependencies: standard library, serde.
// Must NOT depend on: app, platform, or perform any I/O.

pub mod format;
pub mod level;
pub mod timetable;

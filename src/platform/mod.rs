// steplog - platform/mod.rs
//
// Platform abstraction layer: config files, data directory, output streams,
// process environment.
// Must NOT depend on: app.

pub mod config;
pub mod data_dir;
pub mod destination;
pub mod environment;

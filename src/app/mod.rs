// steplog - app/mod.rs
//
// Application layer: the logger, its sections, and the banner text.
// Dependencies: core, platform.

pub mod banner;
pub mod logger;
pub mod section;

// steplog - lib.rs
//
// Library entry point. The binary in `main.rs` is a thin demonstration
// driver; everything it uses is exposed here.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::app::logger::Logger;
pub use crate::app::section::Section;
pub use crate::core::level::VerbosityLevel;
pub use crate::platform::destination::Destination;

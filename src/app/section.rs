// steplog - app/section.rs
//
// Scoped logging context. A `Section` installs its label and level on the
// logger when created and puts the previous ones back when dropped, adding
// its elapsed time to the timetable if it carries a timer key.
//
// A timer key claims its timetable position when the section is entered, so
// an enclosing timer is listed before the timers nested inside it.
//
// The logger keeps a single current label/level rather than a stack; correct
// nesting comes from every section restoring exactly what it replaced. A
// section holds the logger (or its parent section) by mutable borrow, so
// sections can only be released in reverse order of creation.

use crate::app::logger::Logger;
use crate::core::level::VerbosityLevel;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

/// RAII guard for one nested logging context.
///
/// Dereferences to the [`Logger`], so messages are emitted and nested
/// sections opened through the guard itself:
///
/// ```no_run
/// # use steplog::app::logger::Logger;
/// # use steplog::core::level::VerbosityLevel;
/// # fn main() -> steplog::util::error::Result<()> {
/// let mut log = Logger::new(VerbosityLevel::Low);
/// let mut run = log.timed("RUN", VerbosityLevel::Low, "total");
/// run.emit("starting")?;
/// {
///     let mut step = run.timed("STEP", VerbosityLevel::Low, "step");
///     step.emit("working")?;
/// }
/// # Ok(())
/// # }
/// ```
#[must_use = "a section is released as soon as it is dropped"]
pub struct Section<'a> {
    logger: &'a mut Logger,
    saved_label: Option<String>,
    saved_level: Option<VerbosityLevel>,
    timer_key: Option<String>,
    start: Instant,
}

impl<'a> Section<'a> {
    pub(crate) fn enter(
        logger: &'a mut Logger,
        label: String,
        level: VerbosityLevel,
        timer_key: Option<String>,
    ) -> Self {
        let (saved_label, saved_level) = logger.install_context(label, level);
        if let Some(key) = &timer_key {
            logger.reserve_timing(key);
        }
        Self {
            logger,
            saved_label,
            saved_level,
            timer_key,
            start: Instant::now(),
        }
    }

    /// Time since the section was entered.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn timer_key(&self) -> Option<&str> {
        self.timer_key.as_deref()
    }
}

impl Deref for Section<'_> {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        self.logger
    }
}

impl DerefMut for Section<'_> {
    fn deref_mut(&mut self) -> &mut Logger {
        self.logger
    }
}

impl Drop for Section<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        self.logger
            .restore_context(self.saved_label.take(), self.saved_level.take());
        if let Some(key) = self.timer_key.take() {
            self.logger.record_timing(&key, elapsed);
        }
    }
}

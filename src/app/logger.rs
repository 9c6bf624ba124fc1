// steplog - app/logger.rs
//
// The progress logger: threshold gating, label gutter layout, lazy startup
// banner, and the timing summary written at shutdown.
//
// Single-threaded by construction. Every mutating operation takes
// `&mut self`, and sections borrow the logger mutably for their lifetime.

use crate::app::banner;
use crate::app::section::Section;
use crate::core::format;
use crate::core::level::{LevelValue, VerbosityLevel};
use crate::core::timetable::Timetable;
use crate::platform::destination::{Destination, Sink};
use crate::platform::environment::RunEnvironment;
use crate::util::constants;
use crate::util::error::Result;
use std::time::Duration;

/// Leveled, sectioned progress logger.
///
/// Constructed once per run. The banner is written lazily on the first
/// emitted message; [`Logger::exit`] (also run on drop) writes the timing
/// summary and the footer and closes the destination. A logger that never
/// emitted anything writes nothing at all.
pub struct Logger {
    threshold: VerbosityLevel,
    label: Option<String>,
    section_level: Option<VerbosityLevel>,
    sink: Sink,
    started: bool,
    closed: bool,
    pending_blank_line: bool,
    timetable: Timetable,
    label_width: usize,
    line_width: usize,
    environment: Option<RunEnvironment>,
}

impl Logger {
    /// Logger writing to stdout with the default layout.
    pub fn new(threshold: VerbosityLevel) -> Self {
        Self {
            threshold,
            label: None,
            section_level: None,
            sink: Sink::stdout(),
            started: false,
            closed: false,
            pending_blank_line: false,
            timetable: Timetable::new(),
            label_width: constants::DEFAULT_LABEL_WIDTH,
            line_width: constants::DEFAULT_LINE_WIDTH,
            environment: None,
        }
    }

    /// Override the gutter and total line widths.
    pub fn with_widths(mut self, label_width: usize, line_width: usize) -> Self {
        self.label_width = label_width;
        self.line_width = line_width;
        self
    }

    /// Use fixed identity facts in the banner instead of probing the process.
    pub fn with_environment(mut self, environment: RunEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Change the threshold from an ordinal or a level name.
    pub fn set_level<'v>(&mut self, value: impl Into<LevelValue<'v>>) -> Result<()> {
        self.threshold = VerbosityLevel::from_value(value)?;
        Ok(())
    }

    /// Send subsequent output to `target`. The previous destination is
    /// flushed first.
    pub fn bind_destination(&mut self, target: Destination) -> Result<()> {
        let next = Sink::open(target)?;
        self.sink.flush()?;
        self.sink = next;
        Ok(())
    }

    pub fn level(&self) -> VerbosityLevel {
        self.threshold
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn section_level(&self) -> Option<VerbosityLevel> {
        self.section_level
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn blank_line_pending(&self) -> bool {
        self.pending_blank_line
    }

    // -------------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------------

    /// Enter an untimed section. It is left when the returned guard drops.
    pub fn section(&mut self, label: impl Into<String>, level: VerbosityLevel) -> Section<'_> {
        Section::enter(self, label.into(), level, None)
    }

    /// Enter a section whose lifetime is added to the timetable under
    /// `timer_key`.
    pub fn timed(
        &mut self,
        label: impl Into<String>,
        level: VerbosityLevel,
        timer_key: impl Into<String>,
    ) -> Section<'_> {
        Section::enter(self, label.into(), level, Some(timer_key.into()))
    }

    /// Install a section's context, returning the one it replaces.
    pub(crate) fn install_context(
        &mut self,
        label: String,
        level: VerbosityLevel,
    ) -> (Option<String>, Option<VerbosityLevel>) {
        if self.label.as_deref() != Some(label.as_str()) && self.threshold.is_audible() {
            self.pending_blank_line = true;
        }
        let saved_label = self.label.replace(label);
        let saved_level = self.section_level.replace(level);
        (saved_label, saved_level)
    }

    pub(crate) fn restore_context(
        &mut self,
        label: Option<String>,
        level: Option<VerbosityLevel>,
    ) {
        self.label = label;
        self.section_level = level;
    }

    pub(crate) fn reserve_timing(&mut self, key: &str) {
        self.timetable.reserve(key);
    }

    pub(crate) fn record_timing(&mut self, key: &str, elapsed: Duration) {
        self.timetable.record(key, elapsed);
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// Write `message` under the current label, preceded by a blank line if
    /// the label changed since the last message.
    ///
    /// Messages from a section above the threshold are dropped silently.
    /// After [`Logger::exit`] this does nothing.
    pub fn emit(&mut self, message: &str) -> Result<()> {
        self.dump(message, true)
    }

    /// Like [`Logger::emit`] but never inserts the pending blank line.
    pub fn emit_inline(&mut self, message: &str) -> Result<()> {
        self.dump(message, false)
    }

    fn accepts(&self) -> bool {
        self.section_level
            .map_or(true, |level| level <= self.threshold)
    }

    fn dump(&mut self, message: &str, new_line: bool) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        if !self.started {
            self.started = true;
            self.write_header()?;
        }
        if !self.accepts() {
            return Ok(());
        }
        if new_line && self.pending_blank_line {
            self.sink.write_str("\n")?;
            self.pending_blank_line = false;
        }

        let mut text = format::layout(
            self.label.as_deref().unwrap_or(""),
            message,
            self.label_width,
            self.line_width,
        );
        text.push('\n');
        self.sink.write_str(&text)?;
        self.sink.flush()
    }

    fn write_header(&mut self) -> Result<()> {
        let audible = self.threshold.is_audible();
        if audible {
            self.sink.write_str(banner::HEADER)?;
            self.sink.write_str("\n\n")?;
        }

        let env = self
            .environment
            .clone()
            .unwrap_or_else(RunEnvironment::capture);
        let saved_width = self.label_width;
        self.label_width = constants::BANNER_LABEL_WIDTH;
        let identity = self.write_identity(&env);
        self.label_width = saved_width;
        identity?;

        if audible {
            self.sink.write_str("\n")?;
            self.sink.write_str(&format::rule(constants::RULE_WIDTH))?;
            self.sink.write_str("\n")?;
        }
        Ok(())
    }

    fn write_identity(&mut self, env: &RunEnvironment) -> Result<()> {
        for (label, value) in banner::identity_rows(env) {
            let mut section = self.section(label, VerbosityLevel::Low);
            section.emit_inline(value)?;
        }
        Ok(())
    }

    fn write_timetable(&mut self) -> Result<()> {
        if self.threshold.is_audible() {
            self.sink.write_str(&format::rule(constants::RULE_WIDTH))?;
            self.sink.write_str("\n\n")?;
        }
        let lines = self.timetable.summary_lines();
        let mut section = self.section(constants::LABEL_TIMING, VerbosityLevel::Low);
        for line in &lines {
            section.emit(line)?;
        }
        Ok(())
    }

    fn write_footer(&mut self) -> Result<()> {
        if self.threshold.is_audible() {
            self.sink.write_str(banner::FOOTER)?;
            self.sink.write_str("\n")?;
        }
        Ok(())
    }

    /// Finish the run: timing summary, footer, flush, close.
    ///
    /// Only the first call has any effect. If nothing was ever emitted the
    /// logger closes without writing anything.
    pub fn exit(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        let written = if self.started {
            self.write_timetable().and_then(|()| self.write_footer())
        } else {
            Ok(())
        };
        self.closed = true;
        let flushed = self.sink.flush();
        self.sink.out = Box::new(std::io::sink());
        tracing::debug!(
            started = self.started,
            timers = self.timetable.len(),
            "Progress log closed"
        );
        written.and(flushed)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            tracing::error!(error = %e, "Failed to finish progress log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn fixed_env() -> RunEnvironment {
        RunEnvironment {
            user: "alice".into(),
            machine: "Linux node1 6.1 #1 x86_64".into(),
            time: "2026-10-16 09:00:00.000000".into(),
            runtime: "steplog 1.0.0 (rustc)".into(),
            current_dir: "/work".into(),
            command_line: "steplog --level low".into(),
        }
    }

    fn capture(level: VerbosityLevel) -> (Logger, SharedBuffer) {
        let buf = SharedBuffer::default();
        let mut log = Logger::new(level).with_environment(fixed_env());
        log.bind_destination(Destination::writer(buf.clone())).unwrap();
        (log, buf)
    }

    /// Output after the banner's closing rule.
    fn body(text: &str) -> &str {
        let rule = format::rule(constants::RULE_WIDTH);
        let idx = text.rfind(&rule).unwrap();
        &text[idx + rule.len() + 1..]
    }

    #[test]
    fn test_set_level_accepts_names_and_ordinals() {
        let mut log = Logger::new(VerbosityLevel::Medium);
        log.set_level("HIGHEST").unwrap();
        assert_eq!(log.level(), VerbosityLevel::Highest);
        log.set_level(1_i64).unwrap();
        assert_eq!(log.level(), VerbosityLevel::Low);
        assert!(log.set_level(5_i64).is_err());
        assert!(log.set_level("verbose").is_err());
        assert_eq!(log.level(), VerbosityLevel::Low);
    }

    #[test]
    fn test_threshold_gating() {
        let (mut log, buf) = capture(VerbosityLevel::Medium);
        {
            let mut s = log.section("HI", VerbosityLevel::High);
            s.emit("dropped").unwrap();
        }
        {
            let mut s = log.section("LO", VerbosityLevel::Low);
            s.emit("kept low").unwrap();
        }
        {
            let mut s = log.section("MED", VerbosityLevel::Medium);
            s.emit("kept medium").unwrap();
        }
        let text = buf.text();
        assert!(!text.contains("dropped"));
        assert!(text.contains(" LO     kept low\n"));
        assert!(text.contains(" MED    kept medium\n"));
    }

    #[test]
    fn test_first_emit_writes_banner_once() {
        let (mut log, buf) = capture(VerbosityLevel::Low);
        assert!(!log.is_started());
        log.emit("one").unwrap();
        log.emit("two").unwrap();
        assert!(log.is_started());

        let text = buf.text();
        assert_eq!(text.matches("sectioned progress log").count(), 1);
        assert!(text.contains(" USER               alice\n"));
        assert!(text.contains(" RUNTIME VERSION    steplog 1.0.0 (rustc)\n"));
        assert!(text.contains(" COMMAND LINE       steplog --level low\n"));
    }

    #[test]
    fn test_blank_line_on_label_change_only() {
        let (mut log, buf) = capture(VerbosityLevel::Low);
        {
            let mut s = log.section("A", VerbosityLevel::Low);
            s.emit("a1").unwrap();
            s.emit("a2").unwrap();
        }
        {
            let mut s = log.section("B", VerbosityLevel::Low);
            s.emit("b1").unwrap();
        }
        let text = buf.text();
        assert_eq!(body(&text), "\n A      a1\n A      a2\n\n B      b1\n");
    }

    #[test]
    fn test_emit_inline_skips_blank_line() {
        let (mut log, buf) = capture(VerbosityLevel::Low);
        log.emit("warm up").unwrap();
        let before = buf.text().len();
        let mut s = log.section("X", VerbosityLevel::Low);
        s.emit_inline("no gap").unwrap();
        assert!(s.blank_line_pending());
        drop(s);
        assert_eq!(&buf.text()[before..], " X      no gap\n");
    }

    #[test]
    fn test_long_message_wraps_with_gutter() {
        let (mut log, buf) = capture(VerbosityLevel::Low);
        log.emit("warm up").unwrap();
        let before = buf.text().len();
        let msg = "z".repeat(150);
        log.emit(&msg).unwrap();
        let out = buf.text()[before..].to_string();
        let lines: Vec<_> = out.trim_end_matches('\n').split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.starts_with("        ")));
        assert_eq!(lines[2], format!("        {}", "z".repeat(6)));
    }

    #[test]
    fn test_custom_widths() {
        let buf = SharedBuffer::default();
        let mut log = Logger::new(VerbosityLevel::Low)
            .with_widths(4, 10)
            .with_environment(fixed_env());
        log.bind_destination(Destination::writer(buf.clone())).unwrap();
        log.emit("warm").unwrap();
        let before = buf.text().len();
        let mut s = log.section("LONG", VerbosityLevel::Low);
        s.emit_inline("abcdefghij").unwrap();
        drop(s);
        assert_eq!(&buf.text()[before..], " LO abcdef\n LO ghij\n");
    }

    #[test]
    fn test_exit_without_start_writes_nothing() {
        let (mut log, buf) = capture(VerbosityLevel::Highest);
        {
            let _s = log.timed("T", VerbosityLevel::Low, "unused");
        }
        log.exit().unwrap();
        assert!(log.is_closed());
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_exit_is_idempotent_and_final() {
        let (mut log, buf) = capture(VerbosityLevel::Low);
        for _ in 0..3 {
            let mut s = log.timed("W", VerbosityLevel::Low, "work");
            s.emit("tick").unwrap();
        }
        log.exit().unwrap();
        log.exit().unwrap();
        log.emit("after close").unwrap();
        drop(log);

        let text = buf.text();
        assert_eq!(text.matches("End of log").count(), 1);
        assert_eq!(text.matches(" TIMING ").count(), 1);
        assert!(!text.contains("after close"));
        assert_eq!(text.matches("sectioned progress log").count(), 1);
    }

    #[test]
    fn test_silent_threshold_suppresses_everything_sectioned() {
        let (mut log, buf) = capture(VerbosityLevel::Silent);
        {
            let mut s = log.timed("RUN", VerbosityLevel::Low, "total");
            s.emit("hidden").unwrap();
        }
        log.exit().unwrap();
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_unsectioned_message_written_at_silent() {
        let (mut log, buf) = capture(VerbosityLevel::Silent);
        log.emit("outside any section").unwrap();
        {
            let mut s = log.section("RUN", VerbosityLevel::Low);
            s.emit("inside a section").unwrap();
        }
        log.emit_inline("outside again").unwrap();
        log.exit().unwrap();

        let text = buf.text();
        assert_eq!(
            text,
            format!("{}outside any section\n{}outside again\n", " ".repeat(8), " ".repeat(8))
        );
    }

    #[test]
    fn test_each_message_flushed_as_one_write() {
        #[derive(Clone, Default)]
        struct Recorder(Rc<RefCell<Vec<String>>>);
        impl Write for Recorder {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0
                    .borrow_mut()
                    .push(String::from_utf8_lossy(buf).into_owned());
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                self.0.borrow_mut().push("<flush>".into());
                Ok(())
            }
        }

        let rec = Recorder::default();
        let mut log = Logger::new(VerbosityLevel::Low).with_environment(fixed_env());
        log.bind_destination(Destination::writer(io::sink())).unwrap();
        log.emit("banner goes to the first destination").unwrap();
        log.bind_destination(Destination::writer(rec.clone())).unwrap();
        {
            let mut s = log.section("RUN", VerbosityLevel::Low);
            s.emit_inline("one piece").unwrap();
        }
        let calls = rec.0.borrow().clone();
        assert_eq!(calls, vec![" RUN    one piece\n".to_string(), "<flush>".to_string()]);
    }

    #[test]
    fn test_drop_runs_finalizer() {
        let (mut log, buf) = capture(VerbosityLevel::Low);
        log.emit("hello").unwrap();
        drop(log);
        assert!(buf.text().contains("End of log"));
    }

    #[test]
    fn test_write_failure_propagates() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut log = Logger::new(VerbosityLevel::Low).with_environment(fixed_env());
        log.bind_destination(Destination::writer(Broken)).unwrap();
        let err = log.emit("lost").unwrap_err();
        assert!(matches!(err, crate::util::error::LogError::Io { .. }));
    }
}

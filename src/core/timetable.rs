// steplog - core/timetable.rs
//
// Cumulative wall-clock totals keyed by description, in first-seen order.

use crate::core::format::format_duration;
use crate::util::constants;
use std::time::Duration;

/// One timetable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingEntry {
    pub description: String,
    pub total: Duration,
}

/// Insertion-ordered accumulator of elapsed time per description.
///
/// Descriptions are unique: recording an existing description adds to its
/// total and keeps its original position. A description can claim its
/// position before its first measurement completes (see [`Timetable::reserve`]);
/// it stays invisible until something is recorded for it.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    slots: Vec<Slot>,
}

#[derive(Debug, Clone)]
struct Slot {
    entry: TimingEntry,
    recorded: bool,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the position of `description` without recording any time.
    /// Does nothing if it already has a position.
    pub fn reserve(&mut self, description: &str) {
        if self.slot_mut(description).is_none() {
            self.slots.push(Slot {
                entry: TimingEntry {
                    description: description.to_string(),
                    total: Duration::ZERO,
                },
                recorded: false,
            });
        }
    }

    /// Add `elapsed` to the total for `description`, appending a new row if
    /// it has not been seen before.
    pub fn record(&mut self, description: &str, elapsed: Duration) {
        match self.slot_mut(description) {
            Some(slot) => {
                slot.entry.total += elapsed;
                slot.recorded = true;
            }
            None => self.slots.push(Slot {
                entry: TimingEntry {
                    description: description.to_string(),
                    total: elapsed,
                },
                recorded: true,
            }),
        }
    }

    // Linear scan: a run has a handful of timers, not thousands.
    fn slot_mut(&mut self, description: &str) -> Option<&mut Slot> {
        self.slots
            .iter_mut()
            .find(|s| s.entry.description == description)
    }

    pub fn get(&self, description: &str) -> Option<Duration> {
        self.iter()
            .find(|e| e.description == description)
            .map(|e| e.total)
    }

    /// Recorded entries in position order.
    pub fn iter(&self) -> impl Iterator<Item = &TimingEntry> {
        self.slots
            .iter()
            .filter(|s| s.recorded)
            .map(|s| &s.entry)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Summary rows: description left-aligned in a fixed column, two
    /// spaces, then the accumulated duration.
    pub fn summary_lines(&self) -> Vec<String> {
        self.iter()
            .map(|e| {
                format!(
                    "{:<width$}  {}",
                    e.description,
                    format_duration(e.total),
                    width = constants::TIMING_COLUMN_WIDTH
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_key_accumulates_in_place() {
        let mut t = Timetable::new();
        t.record("setup", Duration::from_millis(10));
        t.record("solve", Duration::from_millis(5));
        t.record("setup", Duration::from_millis(32));

        assert_eq!(t.len(), 2);
        assert_eq!(t.get("setup"), Some(Duration::from_millis(42)));
        let order: Vec<_> = t.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(order, vec!["setup", "solve"]);
    }

    #[test]
    fn test_reserved_slot_hidden_until_recorded() {
        let mut t = Timetable::new();
        t.reserve("outer");
        t.reserve("inner");
        assert!(t.is_empty());

        t.record("inner", Duration::from_millis(3));
        let order: Vec<_> = t.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(order, vec!["inner"]);
        assert_eq!(t.get("outer"), None);

        t.record("outer", Duration::from_millis(9));
        let order: Vec<_> = t.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(order, vec!["outer", "inner"]);
    }

    #[test]
    fn test_reserve_keeps_existing_total() {
        let mut t = Timetable::new();
        t.record("solve", Duration::from_millis(4));
        t.reserve("solve");
        assert_eq!(t.get("solve"), Some(Duration::from_millis(4)));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_missing_key() {
        let t = Timetable::new();
        assert!(t.is_empty());
        assert_eq!(t.get("anything"), None);
    }

    #[test]
    fn test_summary_line_layout() {
        let mut t = Timetable::new();
        t.record("total", Duration::from_secs(65));
        let lines = t.summary_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], format!("total{}  0:01:05", " ".repeat(25)));
    }

    #[test]
    fn test_summary_long_description_not_truncated() {
        let mut t = Timetable::new();
        let long = "d".repeat(35);
        t.record(&long, Duration::ZERO);
        assert_eq!(t.summary_lines()[0], format!("{long}  0:00:00"));
    }
}
